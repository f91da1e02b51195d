//! Rust client for the BitGo REST API.
//!
//! The crate is a thin resource-mapping layer: [`ApiClient`] speaks HTTP to a versioned base URL,
//! and each BitGo resource ([`resources`]) is described by an endpoint table that maps actions
//! such as `LIST` or `READ` to a path template and verb. Responses come back as [`Resource`]
//! instances whose properties are read with strict, typed accessors.
//!
//! ```rust,no_run
//! use bitgo::{AccessToken, ApiClient, params, resources::Wallet};
//!
//! # async fn example() -> bitgo::Result<()> {
//! let client = ApiClient::configure(None, None, None)?;
//! let token = AccessToken::from("v2x...");
//!
//! for wallet in Wallet::list_all(&client, &token, params! { "limit" => 10 }).await? {
//!     println!("{}: {}", wallet.id()?, wallet.balance()?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
mod error;
pub mod http;
pub mod logging;
pub mod resource;
pub mod resources;
mod token;

pub use serde_json;

pub use crate::error::{Error, Result};
pub use crate::http::{ApiClient, HttpError, Params, TransportCause};
pub use crate::resource::{Action, Endpoint, EndpointTable, Properties, Resource, ResourceKind};
pub use crate::token::AccessToken;
