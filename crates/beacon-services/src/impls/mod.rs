// Copyright 2025 Beacon Fleet Contributors
// SPDX-License-Identifier: Apache-2.0

//! Service implementations wiring the core and storage crates together

pub mod command_service_impl;
pub mod device_service_impl;
pub mod ingest_service_impl;

pub use command_service_impl::CommandServiceImpl;
pub use device_service_impl::DeviceServiceImpl;
pub use ingest_service_impl::IngestServiceImpl;
