// Copyright 2025 Beacon Fleet Contributors
// SPDX-License-Identifier: Apache-2.0

//! Device service implementation

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use beacon_core::sanitize::{sanitize_text, MAX_DESCRIPTOR_LEN};
use beacon_core::{DeviceId, LivenessTracker};
use beacon_store::{DeviceRegistry, DeviceStatus, PayloadStore};

use crate::traits::device_service::*;
use crate::{ServiceError, ServiceResult};

/// Implementation of the device lifecycle service
pub struct DeviceServiceImpl {
    registry: Arc<dyn DeviceRegistry>,
    tracker: Arc<LivenessTracker>,
    payloads: Arc<dyn PayloadStore>,
}

impl DeviceServiceImpl {
    pub fn new(
        registry: Arc<dyn DeviceRegistry>,
        tracker: Arc<LivenessTracker>,
        payloads: Arc<dyn PayloadStore>,
    ) -> Self {
        Self {
            registry,
            tracker,
            payloads,
        }
    }
}

#[async_trait]
impl DeviceService for DeviceServiceImpl {
    async fn poll(
        &self,
        claimed_id: Option<String>,
        source_addr: String,
        client_descriptor: String,
    ) -> ServiceResult<PollOutcome> {
        // A malformed claimed identity is not an error on this path: the
        // agent simply gets a fresh one, exactly as if it presented none.
        let id = claimed_id
            .as_deref()
            .and_then(|raw| DeviceId::parse(raw).ok())
            .unwrap_or_else(DeviceId::generate);

        let descriptor = sanitize_text(&client_descriptor, MAX_DESCRIPTOR_LEN);
        let device = self.registry.upsert_seen(&id, &source_addr, &descriptor)?;
        self.tracker.mark_alive(&id);

        info!("Poll from device {} ({})", id, source_addr);
        Ok(PollOutcome { device })
    }

    async fn heartbeat(&self, id: DeviceId) -> ServiceResult<()> {
        self.tracker.mark_alive(&id);

        // The registry mirror is best-effort; the tracker already has the
        // truth this process needs.
        if let Err(e) = self.registry.set_status(&id, DeviceStatus::Online) {
            warn!("Heartbeat registry update failed for {}: {}", id, e);
        }
        Ok(())
    }

    async fn list_devices(&self) -> ServiceResult<Vec<beacon_store::Device>> {
        Ok(self.registry.list()?)
    }

    async fn device_detail(&self, id: DeviceId) -> ServiceResult<DeviceDetail> {
        let device = self.registry.get(&id)?.ok_or_else(|| ServiceError::NotFound {
            resource: "device".to_string(),
            id: id.to_string(),
        })?;
        let records = self.registry.list_data_records(&id)?;
        Ok(DeviceDetail {
            online: self.tracker.is_online(&id),
            device,
            records,
        })
    }

    async fn stats(&self) -> ServiceResult<FleetStats> {
        let total = self.registry.count()?;
        let online = self.tracker.online_count() as u64;
        Ok(FleetStats {
            total,
            online,
            offline: total.saturating_sub(online),
        })
    }

    async fn delete_device(&self, id: DeviceId) -> ServiceResult<()> {
        self.registry.delete(&id)?;
        self.tracker.remove(&id);
        self.payloads.delete_prefix(&id.to_string())?;
        info!("Device deleted: {}", id);
        Ok(())
    }

    async fn clear_fleet(&self) -> ServiceResult<()> {
        for device in self.registry.list()? {
            self.payloads.delete_prefix(&device.id.to_string())?;
        }
        self.registry.clear()?;
        self.tracker.clear();
        info!("Fleet cleared");
        Ok(())
    }
}
