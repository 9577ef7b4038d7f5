// Copyright 2025 Beacon Fleet Contributors
// SPDX-License-Identifier: Apache-2.0

//! Payload classification and decoding for uploaded device data
//!
//! A device declares a type tag with every upload. The tag selects a storage
//! category (a closed enumeration with an explicit catch-all, so an
//! unrecognized tag can never fail the upload) and a file extension. Content
//! arrives either as a `data:` URI with a base64 body or as plain text.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::CoreError;

/// Maximum length of a derived filename
pub const MAX_FILENAME_LEN: usize = 100;

/// Storage category for an uploaded payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataCategory {
    Photos,
    Audios,
    Locations,
    BrowserData,
    SystemInfo,
    Other,
}

impl DataCategory {
    /// Classify a declared type tag. Unrecognized tags land in `Other`;
    /// classification never fails closed.
    pub fn classify(declared_type: &str) -> Self {
        match declared_type {
            "photo_front" | "photo_back" => DataCategory::Photos,
            "audio" => DataCategory::Audios,
            "location" => DataCategory::Locations,
            "history" => DataCategory::BrowserData,
            "network" | "battery" | "device_info" => DataCategory::SystemInfo,
            _ => DataCategory::Other,
        }
    }

    /// Directory name the category maps to under a device's storage prefix.
    pub fn dir_name(&self) -> &'static str {
        match self {
            DataCategory::Photos => "photos",
            DataCategory::Audios => "audios",
            DataCategory::Locations => "locations",
            DataCategory::BrowserData => "browser_data",
            DataCategory::SystemInfo => "system_info",
            DataCategory::Other => "other_data",
        }
    }

    /// File extension for payloads in this category.
    pub fn extension(&self) -> &'static str {
        match self {
            DataCategory::Photos => "jpg",
            DataCategory::Audios => "wav",
            DataCategory::Locations => "json",
            DataCategory::BrowserData => "json",
            DataCategory::SystemInfo => "json",
            DataCategory::Other => "txt",
        }
    }
}

/// Decode uploaded content into raw bytes.
///
/// A `data:` URI is split on its first comma and the remainder base64-decoded;
/// anything else is taken as raw text. Content that claims an encoding it does
/// not honor fails with `DecodeFailed`.
pub fn decode_content(raw: &str) -> crate::Result<Vec<u8>> {
    if let Some(rest) = raw.strip_prefix("data:") {
        let (_, encoded) = rest
            .split_once(',')
            .ok_or_else(|| CoreError::DecodeFailed("data URI has no comma separator".into()))?;
        BASE64
            .decode(encoded)
            .map_err(|e| CoreError::DecodeFailed(format!("invalid base64 body: {}", e)))
    } else {
        Ok(raw.as_bytes().to_vec())
    }
}

/// Derive a filesystem-safe filename from an attacker-influenced name.
///
/// Everything outside `[A-Za-z0-9._-]` is stripped and the result truncated,
/// so neither the type tag nor the content can steer the storage path.
pub fn safe_filename(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .take(MAX_FILENAME_LEN)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_types() {
        assert_eq!(DataCategory::classify("photo_front"), DataCategory::Photos);
        assert_eq!(DataCategory::classify("photo_back"), DataCategory::Photos);
        assert_eq!(DataCategory::classify("audio"), DataCategory::Audios);
        assert_eq!(DataCategory::classify("location"), DataCategory::Locations);
        assert_eq!(DataCategory::classify("history"), DataCategory::BrowserData);
        assert_eq!(DataCategory::classify("battery"), DataCategory::SystemInfo);
        assert_eq!(DataCategory::classify("network"), DataCategory::SystemInfo);
        assert_eq!(DataCategory::classify("device_info"), DataCategory::SystemInfo);
    }

    #[test]
    fn test_classify_unknown_type_falls_through_to_other() {
        assert_eq!(DataCategory::classify("telemetry_v2"), DataCategory::Other);
        assert_eq!(DataCategory::classify(""), DataCategory::Other);
    }

    #[test]
    fn test_decode_plain_text_passes_through() {
        assert_eq!(decode_content("hello").unwrap(), b"hello");
    }

    #[test]
    fn test_decode_data_uri() {
        // "hi" base64-encoded
        let decoded = decode_content("data:text/plain;base64,aGk=").unwrap();
        assert_eq!(decoded, b"hi");
    }

    #[test]
    fn test_decode_data_uri_without_comma_fails() {
        assert!(matches!(
            decode_content("data:text/plain;base64"),
            Err(CoreError::DecodeFailed(_))
        ));
    }

    #[test]
    fn test_decode_malformed_base64_fails() {
        assert!(matches!(
            decode_content("data:image/jpeg;base64,@@@not base64@@@"),
            Err(CoreError::DecodeFailed(_))
        ));
    }

    #[test]
    fn test_safe_filename_strips_traversal() {
        assert_eq!(safe_filename("../../etc/passwd"), "....etcpasswd");
        assert_eq!(safe_filename("photo front_01.jpg"), "photofront_01.jpg");
    }

    #[test]
    fn test_safe_filename_truncates() {
        let long = "a".repeat(500);
        assert_eq!(safe_filename(&long).len(), MAX_FILENAME_LEN);
    }
}
