//! Options menu configuration.
//!
//! Provides `MenuConfig`, loaded from a JSON file and then adjusted by
//! environment overrides, used by the options controller and the CLI.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::options::DeviceClass;
use crate::util::{is_http_url, normalize_text_option};

/// Public host that serves published notes; the stored suffix is appended to it
pub const DEFAULT_PUBLISH_BASE_URL: &str = "https://simp.ly/publish/";

/// Environment variable overriding `publish_base_url`
pub const PUBLISH_BASE_URL_ENV: &str = "JOTTER_PUBLISH_BASE_URL";

/// Settings consumed by the options menu.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MenuConfig {
    /// Base path of public links; always ends with `/` once validated
    #[serde(default = "default_publish_base_url")]
    pub publish_base_url: String,
    /// Device class deciding how follow-on screens are presented
    #[serde(default)]
    pub device_class: DeviceClass,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            publish_base_url: default_publish_base_url(),
            device_class: DeviceClass::default(),
        }
    }
}

impl MenuConfig {
    /// Parse and validate a config from a raw JSON payload.
    pub fn parse(payload: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(payload)
            .map_err(|error| Error::Config(format!("invalid menu config JSON: {error}")))?;
        config.validated()
    }

    /// Load a config file, falling back to defaults when it does not exist.
    ///
    /// Environment overrides are applied after the file is read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_file(path)?.with_env_overrides(std::env::var(PUBLISH_BASE_URL_ENV).ok())
    }

    /// Read a config file without consulting the environment.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No menu config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let payload = std::fs::read_to_string(path)?;
        tracing::debug!("Loaded menu config from {}", path.display());
        Self::parse(&payload)
    }

    /// Apply an override for `publish_base_url` (normally read from the environment).
    pub fn with_env_overrides(mut self, publish_base_url: Option<String>) -> Result<Self> {
        if let Some(url) = normalize_text_option(publish_base_url) {
            self.publish_base_url = url;
        }
        self.validated()
    }

    fn validated(mut self) -> Result<Self> {
        let url = normalize_text_option(Some(self.publish_base_url)).ok_or_else(|| {
            Error::Config("menu config field 'publish_base_url' is required".to_string())
        })?;
        if !is_http_url(&url) {
            return Err(Error::Config(
                "menu config field 'publish_base_url' must include http:// or https://"
                    .to_string(),
            ));
        }
        self.publish_base_url = if url.ends_with('/') {
            url
        } else {
            format!("{url}/")
        };
        Ok(self)
    }
}

fn default_publish_base_url() -> String {
    DEFAULT_PUBLISH_BASE_URL.to_string()
}
