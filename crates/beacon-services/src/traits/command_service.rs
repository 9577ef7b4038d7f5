// Copyright 2025 Beacon Fleet Contributors
// SPDX-License-Identifier: Apache-2.0

//! Command dispatch service trait
//!
//! Delivery is pull-based and at-most-once: a command sits in the device's
//! queue until the device drains it, and a drained command is considered
//! delivered whether or not the device acts on it.

use async_trait::async_trait;

use beacon_core::DeviceId;

use crate::ServiceResult;

/// Service queueing commands for devices and draining them on poll
#[async_trait]
pub trait CommandService: Send + Sync {
    /// Queue a command for a device. Fails with `DeviceNotActive` when the
    /// device has no live tracker entry this process lifetime.
    async fn enqueue(&self, id: DeviceId, command: String) -> ServiceResult<()>;

    /// Take every pending command, oldest first. Never blocks waiting for
    /// work; unknown devices yield an empty list.
    async fn drain(&self, id: DeviceId) -> ServiceResult<Vec<String>>;
}
