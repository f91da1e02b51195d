//! Error types for responses returned by the BitGo API.
//!
//! This module defines the [`HttpError`] enum which covers every way the service can answer a
//! request unsuccessfully once an HTTP status has been received. Failures that happen before a
//! status exists (refused connections, TLS, proxies, timeouts) are reported as
//! [`Error::Transport`](crate::Error::Transport) instead.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors derived from an HTTP response.
///
/// The five client errors BitGo documents are classified into their own variants, each carrying
/// the `error` field of the response body (empty when the body has none). Any other failing
/// status is reported as [`Status`](HttpError::Status).
///
/// # Example
///
/// ```rust,no_run
/// use bitgo::http::HttpError;
///
/// fn describe(err: &HttpError) -> String {
///     match err {
///         HttpError::NotFound { message } => format!("missing: {message}"),
///         HttpError::Unauthorized { .. } => "log in again".to_string(),
///         other => format!("{} ({})", other, other.status()),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum HttpError {
    /// HTTP 400: Bad Request
    #[error("BitGo API call failed with 400 Bad Request: {message}")]
    BadRequest { message: String },

    /// HTTP 401: Unauthorized
    #[error("BitGo API call failed with 401 Unauthorized: {message}")]
    Unauthorized { message: String },

    /// HTTP 403: Forbidden
    #[error("BitGo API call failed with 403 Forbidden: {message}")]
    Forbidden { message: String },

    /// HTTP 404: Not Found
    #[error("BitGo API call failed with 404 Not Found: {message}")]
    NotFound { message: String },

    /// HTTP 406: Not Acceptable
    #[error("BitGo API call failed with 406 Not Acceptable: {message}")]
    NotAcceptable { message: String },

    /// Any failing status outside the classified set.
    #[error("BitGo returned an unexpected {status} http status: {body}")]
    Status {
        status: StatusCode,
        /// Raw response body, kept for debugging.
        body: String,
    },

    /// A successful response whose body is not valid JSON.
    #[error("BitGo returned a {status} response that is not valid JSON: {source}")]
    InvalidBody {
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },
}

impl HttpError {
    /// Maps a failing status and the service's error message to the matching variant.
    pub(crate) fn from_response(status: StatusCode, message: String, body: String) -> Self {
        match status {
            StatusCode::BAD_REQUEST => HttpError::BadRequest { message },
            StatusCode::UNAUTHORIZED => HttpError::Unauthorized { message },
            StatusCode::FORBIDDEN => HttpError::Forbidden { message },
            StatusCode::NOT_FOUND => HttpError::NotFound { message },
            StatusCode::NOT_ACCEPTABLE => HttpError::NotAcceptable { message },
            status => HttpError::Status { status, body },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            HttpError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            HttpError::Forbidden { .. } => StatusCode::FORBIDDEN,
            HttpError::NotFound { .. } => StatusCode::NOT_FOUND,
            HttpError::NotAcceptable { .. } => StatusCode::NOT_ACCEPTABLE,
            HttpError::Status { status, .. } | HttpError::InvalidBody { status, .. } => *status,
        }
    }

    /// The service's `error` message for classified client errors.
    pub fn message(&self) -> Option<&str> {
        match self {
            HttpError::BadRequest { message }
            | HttpError::Unauthorized { message }
            | HttpError::Forbidden { message }
            | HttpError::NotFound { message }
            | HttpError::NotAcceptable { message } => Some(message),
            HttpError::Status { .. } | HttpError::InvalidBody { .. } => None,
        }
    }
}
