// Copyright 2025 Beacon Fleet Contributors
// SPDX-License-Identifier: Apache-2.0

//! HTTP handlers, grouped by concern

pub mod command;
pub mod device;
pub mod ingest;

use axum::extract::ConnectInfo;
use axum::http::HeaderMap;
use std::net::SocketAddr;

/// Best-effort client address: the first `X-Forwarded-For` hop when present
/// (the usual deployment has a reverse proxy in front), otherwise the socket
/// peer address.
pub(crate) fn client_addr(
    headers: &HeaderMap,
    connect_info: Option<&ConnectInfo<SocketAddr>>,
) -> String {
    if let Some(forwarded) = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
    {
        let first = forwarded.trim();
        if !first.is_empty() {
            return first.to_string();
        }
    }
    connect_info
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_forwarded_header_wins() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.9, 10.0.0.1"),
        );
        let connect = ConnectInfo("10.0.0.1:5000".parse().unwrap());
        assert_eq!(client_addr(&headers, Some(&connect)), "203.0.113.9");
    }

    #[test]
    fn test_falls_back_to_peer_address() {
        let headers = HeaderMap::new();
        let connect = ConnectInfo("192.0.2.4:6000".parse().unwrap());
        assert_eq!(client_addr(&headers, Some(&connect)), "192.0.2.4");
    }

    #[test]
    fn test_unknown_without_any_source() {
        assert_eq!(client_addr(&HeaderMap::new(), None), "unknown");
    }
}
