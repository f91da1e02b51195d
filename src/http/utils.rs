//! Helpers shared by the transport and the endpoint resolver.
//!
//! Covers verb validation, query string encoding for GET/DELETE parameters, extraction of the
//! service's error message and classification of transport failures.

use std::error::Error as StdError;

use reqwest::Method;
use serde_json::Value;

use super::types::{ErrorBody, Params, TransportCause};
use crate::Error;

/// Parses a verb case-insensitively. Only GET, POST, PUT and DELETE are accepted.
pub fn parse_method(method: &str) -> Result<Method, Error> {
    match method.trim().to_ascii_uppercase().as_str() {
        "GET" => Ok(Method::GET),
        "POST" => Ok(Method::POST),
        "PUT" => Ok(Method::PUT),
        "DELETE" => Ok(Method::DELETE),
        _ => Err(Error::InvalidMethod(method.to_string())),
    }
}

pub fn is_supported_method(method: &Method) -> bool {
    [Method::GET, Method::POST, Method::PUT, Method::DELETE].contains(method)
}

/// Whether requests with this verb carry a JSON body.
pub fn carries_body(method: &Method) -> bool {
    *method == Method::POST || *method == Method::PUT
}

/// Flattens parameters into query pairs. Strings are sent unquoted, nulls are skipped and
/// anything else uses its JSON text.
pub fn query_pairs(params: &Params) -> Vec<(String, String)> {
    params
        .iter()
        .filter_map(|(key, value)| match value {
            Value::Null => None,
            Value::String(s) => Some((key.clone(), s.clone())),
            other => Some((key.clone(), other.to_string())),
        })
        .collect()
}

/// Extracts the `error` field from a failing response body, or an empty string.
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            error: Some(Value::String(message)),
        }) => message,
        Ok(ErrorBody {
            error: Some(Value::Null) | None,
        }) => String::new(),
        Ok(ErrorBody { error: Some(other) }) => other.to_string(),
        Err(_) => String::new(),
    }
}

/// Classifies a failure that happened before a status was received.
///
/// `reqwest` reports TLS problems as connect errors, so the source chain is inspected first.
/// A connect error while a proxy is configured means the proxy could not be reached.
pub fn classify_transport_error(err: &reqwest::Error, proxied: bool) -> TransportCause {
    if err.is_timeout() {
        return TransportCause::Timeout;
    }
    if is_tls_failure(err) {
        return TransportCause::Tls;
    }
    if err.is_connect() {
        return if proxied {
            TransportCause::Proxy
        } else {
            TransportCause::Connection
        };
    }
    TransportCause::Other
}

fn is_tls_failure(err: &reqwest::Error) -> bool {
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string().to_lowercase();
        if ["certificate", "tls", "ssl", "handshake"]
            .iter()
            .any(|marker| text.contains(marker))
        {
            return true;
        }
        source = cause.source();
    }
    false
}
