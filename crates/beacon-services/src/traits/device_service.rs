// Copyright 2025 Beacon Fleet Contributors
// SPDX-License-Identifier: Apache-2.0

//! Device lifecycle service trait
//!
//! Covers the agent-facing contact paths (poll, heartbeat) and the
//! operator-facing fleet views (list, detail, stats, delete, clear).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use beacon_core::DeviceId;
use beacon_store::{DataRecord, Device};

use crate::ServiceResult;

/// Outcome of an agent poll: the identity under which the device is now
/// registered (freshly generated when the agent presented nothing usable).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollOutcome {
    pub device: Device,
}

/// Registry view of one device plus its uploaded-data index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceDetail {
    pub device: Device,
    pub online: bool,
    pub records: Vec<DataRecord>,
}

/// Fleet-wide counters for reporting.
///
/// `total` comes from the registry, `online` from the liveness tracker; the
/// two may transiently disagree and callers must not assume anything stronger
/// than eventual reconciliation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FleetStats {
    pub total: u64,
    pub online: u64,
    pub offline: u64,
}

/// Service managing device registration and liveness
#[async_trait]
pub trait DeviceService: Send + Sync {
    /// Handle an agent poll: upsert the registry row and refresh liveness.
    /// An absent or malformed claimed identity gets a server-generated one.
    async fn poll(
        &self,
        claimed_id: Option<String>,
        source_addr: String,
        client_descriptor: String,
    ) -> ServiceResult<PollOutcome>;

    /// Record a liveness-only signal. The registry status write is
    /// best-effort; the tracker update is what matters.
    async fn heartbeat(&self, id: DeviceId) -> ServiceResult<()>;

    /// All registered devices, newest first.
    async fn list_devices(&self) -> ServiceResult<Vec<Device>>;

    /// One device with its data records and current tracker view.
    async fn device_detail(&self, id: DeviceId) -> ServiceResult<DeviceDetail>;

    /// Fleet-wide counters.
    async fn stats(&self) -> ServiceResult<FleetStats>;

    /// Remove a device: registry row, tracker entry, and stored payloads.
    async fn delete_device(&self, id: DeviceId) -> ServiceResult<()>;

    /// Wipe the whole fleet: every device, record, and payload.
    async fn clear_fleet(&self) -> ServiceResult<()>;
}
