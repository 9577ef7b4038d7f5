// Copyright 2025 Beacon Fleet Contributors
// SPDX-License-Identifier: Apache-2.0

//! Command dispatch implementation

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use beacon_core::{DeviceId, LivenessTracker};

use crate::traits::CommandService;
use crate::ServiceResult;

/// Implementation of the command dispatch service
pub struct CommandServiceImpl {
    tracker: Arc<LivenessTracker>,
}

impl CommandServiceImpl {
    pub fn new(tracker: Arc<LivenessTracker>) -> Self {
        Self { tracker }
    }
}

#[async_trait]
impl CommandService for CommandServiceImpl {
    async fn enqueue(&self, id: DeviceId, command: String) -> ServiceResult<()> {
        self.tracker.enqueue(&id, &command)?;
        info!("Command queued for {}", id);
        Ok(())
    }

    async fn drain(&self, id: DeviceId) -> ServiceResult<Vec<String>> {
        let commands = self.tracker.drain_commands(&id);
        if !commands.is_empty() {
            debug!("Drained {} command(s) for {}", commands.len(), id);
        }
        Ok(commands)
    }
}
