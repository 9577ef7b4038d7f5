// Copyright 2025 Beacon Fleet Contributors
// SPDX-License-Identifier: Apache-2.0

//! Request and response shapes for the HTTP contract

use serde::{Deserialize, Serialize};

use beacon_services::{DeviceDetail, FleetStats};
use beacon_store::Device;

/// `POST /poll` request body. Everything is optional: a first-contact agent
/// has no identity yet and may not know how to describe itself.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PollRequest {
    pub device_id: Option<String>,
    pub client_descriptor: Option<String>,
}

/// `POST /heartbeat` request body
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HeartbeatRequest {
    pub device_id: String,
}

/// `POST /data` request body
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IngestRequest {
    pub device_id: String,
    #[serde(rename = "type")]
    pub data_type: String,
    pub content: String,
}

/// `POST /data` response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IngestResponse {
    pub stored_path: String,
    pub bytes_written: u64,
}

/// `POST /commands` request body (operator)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EnqueueRequest {
    pub device_id: String,
    pub command: String,
}

/// `GET /commands/:device_id` response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CommandsResponse {
    pub commands: Vec<String>,
}

/// Simple acknowledgement for operations with nothing else to report
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AckResponse {
    pub status: String,
}

impl AckResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// `GET /devices` response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeviceListResponse {
    pub devices: Vec<Device>,
}

/// `GET /devices/:device_id` response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeviceDetailResponse {
    #[serde(flatten)]
    pub detail: DeviceDetail,
}

/// `GET /stats` response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: FleetStats,
}

/// `GET /health_check` response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub version: String,
    pub tracked_devices: u64,
}
