//! HTTP transport for the BitGo REST API.
//!
//! [`ApiClient`] performs one request per call against a versioned base URL, attaching the
//! JSON content type, the configured user agent and, when a token is supplied, a bearer
//! `Authorization` header. Outcomes are normalized into typed errors:
//!
//! - failures before any status (connection, TLS, proxy, timeout) become
//!   [`Error::Transport`](crate::Error::Transport) tagged with a [`TransportCause`];
//! - 400, 401, 403, 404 and 406 become the matching [`HttpError`] variant with the service's
//!   `error` message, every other failing status becomes [`HttpError::Status`];
//! - successful bodies are decoded as JSON.
//!
//! # Example
//!
//! ```rust,no_run
//! use bitgo::{AccessToken, ApiClient, config::Environment};
//!
//! # async fn example() -> Result<(), bitgo::Error> {
//! let client = ApiClient::configure(Some(Environment::Test), None, None)?;
//! let token = AccessToken::from("v2x...");
//!
//! let wallets = client.get("wallet", Some(&token)).await?;
//! println!("{wallets}");
//! # Ok(())
//! # }
//! ```

mod error;
mod http_client;
mod types;
mod utils;

pub use error::HttpError;
pub use http_client::ApiClient;
pub use types::{Params, TransportCause};
pub use utils::parse_method;
