// Copyright 2025 Beacon Fleet Contributors
// SPDX-License-Identifier: Apache-2.0

//! Data ingestion service trait

use async_trait::async_trait;

use beacon_core::DeviceId;
use beacon_store::StoredRef;

use crate::ServiceResult;

/// Service persisting device-uploaded payloads
#[async_trait]
pub trait IngestService: Send + Sync {
    /// Classify, decode, and persist one upload, then index it as a data
    /// record. A storage failure aborts the whole operation; no record is
    /// written without its payload.
    async fn ingest(
        &self,
        id: DeviceId,
        declared_type: String,
        content: String,
    ) -> ServiceResult<StoredRef>;

    /// Read back the bytes of a payload the device previously uploaded.
    /// `relative_path` is the stored path without the leading device segment,
    /// so one device can never address another device's payloads.
    async fn fetch_payload(&self, id: DeviceId, relative_path: String) -> ServiceResult<Vec<u8>>;
}
