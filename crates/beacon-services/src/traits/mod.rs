// Copyright 2025 Beacon Fleet Contributors
// SPDX-License-Identifier: Apache-2.0

//! Service traits - what transport adapters are allowed to ask for

pub mod command_service;
pub mod device_service;
pub mod ingest_service;

pub use command_service::CommandService;
pub use device_service::{DeviceDetail, DeviceService, FleetStats, PollOutcome};
pub use ingest_service::IngestService;
