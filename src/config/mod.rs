//! Client configuration.
//!
//! [`ClientConfig`] is the explicit configuration value an [`ApiClient`](crate::ApiClient) is
//! built from. It can be assembled in code or deserialized from a configuration file through
//! [`loader::load_configuration`].

pub mod loader;

use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::Error;

pub const DEFAULT_USER_AGENT: &str = concat!("BitGoRS RustClient v", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Named BitGo environments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Test,
    Prod,
}

impl Environment {
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Test => "https://test.bitgo.com/api/v1",
            Environment::Prod => "https://bitgo.com/api/v1",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Test => write!(f, "test"),
            Environment::Prod => write!(f, "prod"),
        }
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "test" => Ok(Environment::Test),
            "prod" => Ok(Environment::Prod),
            other => Err(Error::Config(format!(
                "Unknown environment '{other}', expected 'test' or 'prod'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    pub environment: Environment,
    /// Overrides the environment's base URL when set.
    pub base_url: Option<String>,
    pub user_agent: String,
    pub proxy: Option<ProxyConfig>,
    /// Per-call timeout in milliseconds. Must be positive.
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            base_url: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            proxy: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ClientConfig {
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_proxy(mut self, proxy: ProxyConfig) -> Self {
        self.proxy = Some(proxy);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Rejects a zero timeout and inconsistent proxy settings.
    pub fn validate(&self) -> Result<(), Error> {
        if self.timeout_ms == 0 {
            return Err(Error::Config("timeout_ms must be greater than zero".to_string()));
        }
        match &self.proxy {
            Some(proxy) => proxy.validate(),
            None => Ok(()),
        }
    }

    /// Resolves the base URL all request paths are appended to.
    pub fn resolve_base_url(&self) -> Result<Url, Error> {
        let raw = self
            .base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url());
        Url::parse(raw).map_err(|e| Error::Config(format!("Invalid base url '{raw}': {e}")))
    }
}

/// Proxy used for both http and https traffic.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProxyConfig {
    #[serde(alias = "ip")]
    pub host: String,
    pub port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ProxyConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            username: None,
            password: None,
        }
    }

    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.host.trim().is_empty() {
            return Err(Error::Config("Missing host in proxy settings".to_string()));
        }
        if self.username.is_some() != self.password.is_some() {
            return Err(Error::Config(
                "Proxy credentials need both a username and a password".to_string(),
            ));
        }
        Ok(())
    }

    /// Proxy URL in the form `http://[username:password@]host:port`.
    pub fn url(&self) -> String {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => {
                format!("http://{}:{}@{}:{}", username, password, self.host, self.port)
            },
            _ => format!("http://{}:{}", self.host, self.port),
        }
    }
}

impl fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

impl TryFrom<&Value> for ProxyConfig {
    type Error = Error;

    /// Accepts a loose descriptor such as `{"ip": "10.0.0.1", "port": 8080}`.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let map = value.as_object().ok_or_else(|| {
            Error::Config(
                "Invalid proxy settings, expected a mapping with 'host' and 'port' keys at minimum".to_string(),
            )
        })?;

        let host = map
            .get("host")
            .or_else(|| map.get("ip"))
            .and_then(Value::as_str)
            .ok_or_else(|| Error::Config("Missing host or port key in proxy settings".to_string()))?;

        let port = match map.get("port") {
            Some(Value::Number(n)) => n.as_u64().and_then(|p| u16::try_from(p).ok()),
            Some(Value::String(s)) => s.parse::<u16>().ok(),
            _ => None,
        }
        .ok_or_else(|| Error::Config("Missing host or port key in proxy settings".to_string()))?;

        let credential = |key: &str| -> Result<Option<String>, Error> {
            match map.get(key) {
                None | Some(Value::Null) => Ok(None),
                Some(Value::String(s)) => Ok(Some(s.clone())),
                Some(_) => Err(Error::Config(format!("Proxy {key} must be a string"))),
            }
        };

        let proxy = ProxyConfig {
            host: host.to_string(),
            port,
            username: credential("username")?,
            password: credential("password")?,
        };
        proxy.validate()?;
        Ok(proxy)
    }
}
