// Copyright 2025 The Tari Project
// SPDX-License-Identifier: BSD-3-Clause

use serde::Deserialize;
use serde_json::Value;
use std::fmt::Display;

/// Request parameters: a JSON body for POST/PUT, a query string for GET/DELETE.
pub type Params = serde_json::Map<String, Value>;

/// Why a request failed before any HTTP status was received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportCause {
    Proxy,
    Tls,
    Connection,
    Timeout,
    /// Anything else reported by the HTTP stack (malformed request, broken body stream, ...).
    Other,
}

impl Display for TransportCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportCause::Proxy => write!(f, "proxy"),
            TransportCause::Tls => write!(f, "tls"),
            TransportCause::Connection => write!(f, "connection"),
            TransportCause::Timeout => write!(f, "timeout"),
            TransportCause::Other => write!(f, "other"),
        }
    }
}

/// Shape of BitGo's error responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<Value>,
}
