//! Crate-wide error type.
//!
//! Every fallible operation in the SDK returns [`Error`]. Failures are never retried or
//! swallowed; they surface to the caller exactly where they happened.

use thiserror::Error;

use crate::http::{HttpError, TransportCause};

#[derive(Debug, Error)]
pub enum Error {
    /// Malformed client or proxy configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The access token cannot be used as a bearer credential.
    #[error("Invalid access token: {0}")]
    InvalidAccessToken(String),

    /// The resource has no endpoint table, or the table has no entry for the action.
    #[error("Invalid resource endpoint: {0}")]
    InvalidEndpoint(String),

    /// The endpoint template is unusable or could not be mapped with the given path arguments.
    #[error("Invalid resource endpoint url: {0}")]
    InvalidEndpointUrl(String),

    /// Only GET, POST, PUT and DELETE are accepted.
    #[error("Invalid HTTP method '{0}', only GET, POST, PUT or DELETE are accepted")]
    InvalidMethod(String),

    /// The request never produced an HTTP status.
    #[error("Transport error ({cause}): {source}")]
    Transport {
        cause: TransportCause,
        #[source]
        source: reqwest::Error,
    },

    #[error(transparent)]
    Http(#[from] HttpError),

    /// A JSON document could not be rehydrated into a resource.
    #[error("Resource error: {0}")]
    Resource(String),

    #[error("Unknown property '{0}'")]
    UnknownProperty(String),

    #[error("Property '{name}' has an unexpected type: {source}")]
    PropertyType {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// HTTP status attached to the failure, if the service answered at all.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Error::Http(e) => Some(e.status()),
            _ => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
