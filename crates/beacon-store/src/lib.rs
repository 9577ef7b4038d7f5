// Copyright 2025 Beacon Fleet Contributors
// SPDX-License-Identifier: Apache-2.0

//! Durable storage for the fleet server
//!
//! Two concerns live here, each behind a trait so the service layer depends
//! only on the interface:
//!
//! - the device registry: every device ever seen, with its last-known status,
//!   plus the data-record index for uploaded payloads (SQLite);
//! - the payload store: the decoded upload bytes themselves (filesystem).
//!
//! Registry writes and payload writes are committed independently; there is no
//! cross-component transaction, and callers reconcile eventually.

pub mod payload;
pub mod registry;

pub use payload::{FsPayloadStore, PayloadStore, StoredRef};
pub use registry::{
    DataRecord, Device, DeviceRegistry, DeviceStatus, NewDataRecord, SqliteRegistry,
};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Device not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Refusing unsafe storage path: {0}")]
    UnsafePath(String),

    #[error("Corrupt registry row: {0}")]
    Corrupt(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
