// Copyright 2025 Beacon Fleet Contributors
// SPDX-License-Identifier: Apache-2.0

//! Transport-agnostic device liveness tracking and command dispatch
//!
//! This crate holds the in-memory core of the fleet server: which devices are
//! currently reachable, the per-device backlog of pending commands, and the
//! background reaper that demotes stale devices. None of this state is
//! durable; liveness is a statement about the current process's connectivity
//! and is rebuilt from scratch on restart. Durable collaborators (the device
//! registry) are reached through the `StatusSink` trait so the core stays
//! decoupled from any particular storage backend.

pub mod identity;
pub mod ingest;
pub mod reaper;
pub mod sanitize;
pub mod tracker;

pub use identity::DeviceId;
pub use ingest::{decode_content, safe_filename, DataCategory};
pub use reaper::{Reaper, StatusSink};
pub use tracker::LivenessTracker;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid device identity: '{0}'")]
    InvalidIdentity(String),

    #[error("Device not active: {0}")]
    DeviceNotActive(String),

    #[error("Payload decode failed: {0}")]
    DecodeFailed(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
