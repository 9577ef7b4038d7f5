// Copyright 2025 Beacon Fleet Contributors
// SPDX-License-Identifier: Apache-2.0

/*!
Beacon service layer.

The stable application boundary between transport adapters (HTTP today,
whatever comes next) and the core/storage crates. Adapters see `async_trait`
service traits and a transport-agnostic `ServiceError`; everything about
locks, SQLite, and the filesystem stays behind this line.
*/

pub mod error;
pub mod impls;
pub mod sink;
pub mod traits;

pub use error::{ServiceError, ServiceResult};
pub use impls::{CommandServiceImpl, DeviceServiceImpl, IngestServiceImpl};
pub use sink::RegistrySink;
pub use traits::{
    CommandService, DeviceDetail, DeviceService, FleetStats, IngestService, PollOutcome,
};
