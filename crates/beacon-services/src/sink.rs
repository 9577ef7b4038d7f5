// Copyright 2025 Beacon Fleet Contributors
// SPDX-License-Identifier: Apache-2.0

//! Registry adapter for the reaper's status seam

use std::sync::Arc;

use beacon_core::{DeviceId, StatusSink};
use beacon_store::{DeviceRegistry, DeviceStatus};

/// Mirrors reaper demotions into the durable registry
pub struct RegistrySink {
    registry: Arc<dyn DeviceRegistry>,
}

impl RegistrySink {
    pub fn new(registry: Arc<dyn DeviceRegistry>) -> Self {
        Self { registry }
    }
}

impl StatusSink for RegistrySink {
    fn mark_offline(&self, id: &DeviceId) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.registry
            .set_status(id, DeviceStatus::Offline)
            .map_err(|e| -> Box<dyn std::error::Error + Send + Sync> { Box::new(e) })
    }
}
