// Copyright 2025 Beacon Fleet Contributors
// SPDX-License-Identifier: Apache-2.0

//! Ingestion implementation
//!
//! Orchestrates the pure classification/decoding from the core with the two
//! durable writes: payload bytes first, data record second. The order matters
//! since a data record must never reference a payload that was not stored.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use beacon_core::sanitize::{sanitize_text, MAX_TYPE_TAG_LEN};
use beacon_core::{decode_content, safe_filename, DataCategory, DeviceId};
use beacon_store::{DeviceRegistry, NewDataRecord, PayloadStore, StoreError, StoredRef};

use crate::traits::IngestService;
use crate::{ServiceError, ServiceResult};

/// Inline preview length kept in the data-record index
const MAX_PREVIEW_LEN: usize = 500;

/// Implementation of the ingestion service
pub struct IngestServiceImpl {
    registry: Arc<dyn DeviceRegistry>,
    payloads: Arc<dyn PayloadStore>,
}

impl IngestServiceImpl {
    pub fn new(registry: Arc<dyn DeviceRegistry>, payloads: Arc<dyn PayloadStore>) -> Self {
        Self { registry, payloads }
    }
}

#[async_trait]
impl IngestService for IngestServiceImpl {
    async fn ingest(
        &self,
        id: DeviceId,
        declared_type: String,
        content: String,
    ) -> ServiceResult<StoredRef> {
        let type_tag = sanitize_text(&declared_type, MAX_TYPE_TAG_LEN);
        let category = DataCategory::classify(&type_tag);
        let bytes = decode_content(&content)?;

        let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
        let filename = safe_filename(&format!(
            "{}_{}.{}",
            type_tag,
            timestamp,
            category.extension()
        ));
        let relative_path = format!("{}/{}/{}", id, category.dir_name(), filename);

        let stored = self.payloads.write(&relative_path, &bytes)?;

        let preview: String = content.chars().take(MAX_PREVIEW_LEN).collect();
        self.registry.insert_data_record(&NewDataRecord {
            device_id: id,
            data_type: type_tag.clone(),
            preview,
            stored_path: stored.relative_path.clone(),
        })?;

        info!(
            "Ingested {} bytes of '{}' from {} -> {}",
            stored.bytes_written, type_tag, id, stored.relative_path
        );
        Ok(stored)
    }

    async fn fetch_payload(&self, id: DeviceId, relative_path: String) -> ServiceResult<Vec<u8>> {
        let stored_path = format!("{}/{}", id, relative_path);
        match self.payloads.read(&stored_path) {
            Ok(bytes) => Ok(bytes),
            // A missing file and a traversal attempt both surface as "no such
            // payload"; the caller learns nothing about the store layout.
            Err(StoreError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ServiceError::NotFound {
                    resource: "payload".to_string(),
                    id: stored_path,
                })
            }
            Err(StoreError::UnsafePath(_)) => Err(ServiceError::NotFound {
                resource: "payload".to_string(),
                id: stored_path,
            }),
            Err(e) => Err(e.into()),
        }
    }
}
