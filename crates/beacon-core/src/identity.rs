// Copyright 2025 Beacon Fleet Contributors
// SPDX-License-Identifier: Apache-2.0

//! Device identity
//!
//! A device is addressed by an opaque 128-bit token in canonical UUID text
//! form. The token is generated by the agent on first contact, or by the
//! server when the agent presents nothing usable. Parsing is the only way to
//! build a `DeviceId` from untrusted input, so a malformed identity is
//! rejected before it can reach the registry or the tracker.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::CoreError;

/// Opaque device identity (canonical UUID text form)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(Uuid);

impl DeviceId {
    /// Generate a fresh random identity
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identity from untrusted input
    pub fn parse(input: &str) -> crate::Result<Self> {
        Uuid::try_parse(input)
            .map(Self)
            .map_err(|_| CoreError::InvalidIdentity(input.to_string()))
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for DeviceId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
