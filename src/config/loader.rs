use std::{fs, fs::File, io::Write, path::Path};

use anyhow::{Context, Result};
use ::config::{Config, Environment as EnvironmentSource};
use log::info;
use serde::{Deserialize, Serialize};

use super::ClientConfig;

/// Settings read by the `bitgo` binary: the client configuration plus an optional token.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SdkConfig {
    pub client: ClientConfig,
    pub access_token: Option<String>,
}

impl SdkConfig {
    /// Access token, ignoring blank values left in a config file.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}

pub fn get_default_config() -> &'static str {
    include_str!("../../config/config.toml")
}

/// Loads configuration from `path` (creating it from defaults when missing), with
/// `BITGO_`-prefixed environment variables taking precedence, e.g. `BITGO_ACCESS_TOKEN` or
/// `BITGO_CLIENT__ENVIRONMENT`.
pub fn load_configuration(path: &Path) -> Result<SdkConfig> {
    if !path.exists() {
        write_config_to(path, get_default_config()).context("Could not create default config")?;
        info!(path:% = path.display(); "Created new configuration file");
    }

    let filename = path.to_str().context("Invalid config file path")?;

    let cfg = Config::builder()
        .add_source(::config::File::with_name(filename))
        .add_source(
            EnvironmentSource::with_prefix("BITGO")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .context("Could not build configuration")?;

    let sdk_config: SdkConfig = cfg
        .try_deserialize()
        .context("Could not deserialize configuration")?;
    sdk_config
        .client
        .validate()
        .context("Invalid client configuration")?;
    Ok(sdk_config)
}

pub fn write_config_to(path: &Path, source: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create parent directories")?;
    };

    let mut file = File::create(path).context("Failed to create config file")?;
    file.write_all(source.as_bytes())
        .context("Failed to write config content")?;
    file.write_all(b"\n").context("Failed to write newline")?;
    Ok(())
}
