//! Generic resource engine.
//!
//! A BitGo resource type is nothing more than configuration: a [`ResourceKind`] names the
//! resource and carries its immutable [`EndpointTable`]. All behaviour lives in the single generic
//! [`Resource`] type:
//!
//! 1. [`Resource::request_resource`] resolves an [`Action`] against the table,
//! 2. sends the request through the [`ApiClient`],
//! 3. and rehydrates the JSON answer with [`Resource::from_json`].
//!
//! The conventional verbs (`create`, `get`, `update`, `delete`, `list`) are thin wrappers defined
//! in [`capabilities`](self::capabilities). They exist on every resource type; whether a type
//! supports one is decided by its endpoint table when the call is made.
//!
//! # Example
//!
//! ```rust,no_run
//! use bitgo::{AccessToken, ApiClient, params, resources::Wallet};
//!
//! # async fn example() -> Result<(), bitgo::Error> {
//! let client = ApiClient::configure(None, None, None)?;
//! let token = AccessToken::from("v2x...");
//!
//! let wallet = Wallet::get(&client, &token, "2N8ryDAob6Qn8uCsWvkkQDhyeCQTqybGUFe", params! {}).await?;
//! println!("{} holds {}", wallet.label()?, wallet.balance()?);
//!
//! let renamed = wallet.save_changes(params! { "label" => "cold storage" }).await?;
//! # let _ = renamed;
//! # Ok(())
//! # }
//! ```

mod capabilities;
pub mod endpoint;

use std::{fmt, marker::PhantomData};

use log::trace;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use self::endpoint::{Action, Endpoint, EndpointTable, ResolvedEndpoint};
use crate::{AccessToken, ApiClient, Error, http::Params};

/// Properties of a resource as returned by the service.
pub type Properties = serde_json::Map<String, Value>;

/// Static description of a BitGo resource type.
pub trait ResourceKind {
    /// Short name used in logs and error messages.
    const NAME: &'static str;
    const ENDPOINTS: EndpointTable;
    /// Property holding the identifier used by `READ`, `UPDATE` and `DELETE`.
    const ID_PROPERTY: &'static str = "id";
}

/// Builds request [`Params`] from `key => value` pairs. Values may be anything serializable.
///
/// ```rust
/// use bitgo::params;
///
/// let params = params! { "limit" => 100, "label" => "cold" };
/// assert_eq!(params["limit"], 100);
/// assert!(params! {}.is_empty());
/// ```
#[macro_export]
macro_rules! params {
    () => {
        $crate::http::Params::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut params = $crate::http::Params::new();
        $(
            params.insert(::std::string::ToString::to_string(&$key), $crate::serde_json::json!($value));
        )+
        params
    }};
}

/// A typed resource instance: the properties returned by BitGo, bound to the client and token
/// that fetched them so follow-up calls can be made on it.
pub struct Resource<'a, K> {
    client: &'a ApiClient,
    token: &'a AccessToken,
    properties: Properties,
    kind: PhantomData<fn() -> K>,
}

impl<'a, K: ResourceKind> Resource<'a, K> {
    /// Wraps caller supplied properties, e.g. to build a resource before sending it.
    pub fn new(client: &'a ApiClient, token: &'a AccessToken, properties: Properties) -> Self {
        Self {
            client,
            token,
            properties,
            kind: PhantomData,
        }
    }

    pub fn client(&self) -> &'a ApiClient {
        self.client
    }

    pub fn access_token(&self) -> &'a AccessToken {
        self.token
    }

    /// Resolves the request path and verb of `action` for this resource type.
    pub fn endpoint(action: Action, path_args: &[&str]) -> Result<ResolvedEndpoint, Error> {
        K::ENDPOINTS.resolve(action, path_args)
    }

    /// Main entry point for requesting BitGo resources.
    ///
    /// `path_args` fill the endpoint's path parameters in order. `params` become the JSON body for
    /// POST/PUT endpoints and the query string for GET/DELETE endpoints.
    pub async fn request_resource(
        action: Action,
        client: &'a ApiClient,
        token: &'a AccessToken,
        path_args: &[&str],
        params: Params,
    ) -> Result<Self, Error> {
        let endpoint = Self::endpoint(action, path_args)?;
        trace!(
            resource = K::NAME,
            action:% = action,
            path = &*endpoint.path;
            "Resolved resource endpoint"
        );
        let response = client
            .send_request(endpoint.method, &endpoint.path, Some(&params), Some(token))
            .await?;
        Self::from_json(client, token, response)
    }

    /// Rehydrates a JSON object into a resource. Any other JSON shape is rejected.
    pub fn from_json(client: &'a ApiClient, token: &'a AccessToken, json: Value) -> Result<Self, Error> {
        match json {
            Value::Object(properties) => Ok(Self::new(client, token, properties)),
            other => Err(Error::Resource(format!(
                "cannot create a {} from a JSON {}",
                K::NAME,
                json_type(&other)
            ))),
        }
    }

    /// Parses a raw JSON document and rehydrates it with [`from_json`](Self::from_json).
    pub fn from_json_str(client: &'a ApiClient, token: &'a AccessToken, json: &str) -> Result<Self, Error> {
        let value = serde_json::from_str(json)
            .map_err(|e| Error::Resource(format!("invalid JSON for {}: {e}", K::NAME)))?;
        Self::from_json(client, token, value)
    }

    /// Strict property lookup; unknown names are an error, never a default.
    pub fn property(&self, name: &str) -> Result<&Value, Error> {
        self.properties
            .get(name)
            .ok_or_else(|| Error::UnknownProperty(name.to_string()))
    }

    /// Reads a property and converts it to `T`.
    pub fn property_as<T: DeserializeOwned>(&self, name: &str) -> Result<T, Error> {
        let value = self.property(name)?;
        T::deserialize(value).map_err(|source| Error::PropertyType {
            name: name.to_string(),
            source,
        })
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn into_properties(self) -> Properties {
        self.properties
    }

    /// The resource identifier, read from [`ResourceKind::ID_PROPERTY`].
    pub fn id(&self) -> Result<String, Error> {
        self.property_as(K::ID_PROPERTY)
    }

    /// Rehydrates an array property into resources of kind `C`, bound to the same client and token.
    pub fn collection<C: ResourceKind>(&self, name: &str) -> Result<Vec<Resource<'a, C>>, Error> {
        match self.property(name)? {
            Value::Array(items) => items
                .iter()
                .cloned()
                .map(|item| Resource::<C>::from_json(self.client, self.token, item))
                .collect(),
            other => Err(Error::Resource(format!(
                "property '{name}' is a JSON {}, expected an array",
                json_type(other)
            ))),
        }
    }

    /// Fetches the current state of this resource.
    pub async fn refresh(&self) -> Result<Self, Error> {
        let id = self.id()?;
        Self::get(self.client, self.token, &id, Params::new()).await
    }

    /// Sends `changes` to the resource's `UPDATE` endpoint and returns the updated resource.
    pub async fn save_changes(&self, changes: Params) -> Result<Self, Error> {
        let id = self.id()?;
        Self::update(self.client, self.token, &id, changes).await
    }

    /// Deletes this resource, returning the service's answer.
    pub async fn remove(self) -> Result<Self, Error> {
        let id = self.id()?;
        Self::delete(self.client, self.token, &id).await
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl<K> Clone for Resource<'_, K> {
    fn clone(&self) -> Self {
        Self {
            client: self.client,
            token: self.token,
            properties: self.properties.clone(),
            kind: PhantomData,
        }
    }
}

impl<K: ResourceKind> fmt::Debug for Resource<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("kind", &K::NAME)
            .field("token", self.token)
            .field("properties", &self.properties)
            .finish()
    }
}
