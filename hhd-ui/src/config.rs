//! Client configuration.
//!
//! Configuration is read from `.hhd-ui.toml` in the working directory. Every
//! field is optional:
//!
//! ```toml
//! endpoint = "http://localhost:5335"
//! token = "${env:HHD_TOKEN}"
//! lang = "en"
//! poll_interval_ms = 150
//! state_file = ".hhd-ui-state.json"
//! ```
//!
//! String values may reference environment variables as `${env:NAME}`.

use std::{
    env,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::fs;

/// Default config file name.
pub const CONFIG_FILE: &str = ".hhd-ui.toml";

/// Default Handheld Daemon API address.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5335";

/// Default controller poll period.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 150;

/// Settings for talking to the daemon and for the local UI state.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    /// Base URL of the Handheld Daemon API.
    pub endpoint: String,
    /// Bearer token, required when the daemon has authentication enabled.
    pub token: Option<String>,
    /// Language code the daemon should translate titles into.
    pub lang: Option<String>,
    /// Controller poll period in milliseconds.
    pub poll_interval_ms: u64,
    /// File backing persisted UI flags. Relative paths are resolved against
    /// the working directory.
    pub state_file: PathBuf,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token: None,
            lang: None,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            state_file: PathBuf::from(".hhd-ui-state.json"),
        }
    }
}

impl UiConfig {
    /// Load the config at `path`, falling back to defaults when the file does
    /// not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Parse TOML text and expand `${env:NAME}` placeholders.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let mut config: UiConfig = toml::from_str(content)?;
        config.endpoint = expand_env(&config.endpoint);
        config.token = config.token.as_deref().map(expand_env).filter(|t| !t.is_empty());
        config.lang = config.lang.as_deref().map(expand_env).filter(|l| !l.is_empty());
        Ok(config)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    /// JSON schema of the config file.
    pub fn json_schema() -> anyhow::Result<String> {
        let schema = schemars::schema_for!(UiConfig);
        Ok(serde_json::to_string_pretty(&schema)?)
    }
}

/// Replace `${env:NAME}` with the value of `NAME`, or nothing when unset.
///
/// Anything else, including unterminated placeholders, is left untouched.
pub fn expand_env(input: &str) -> String {
    const OPEN: &str = "${env:";

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let after = &rest[start + OPEN.len()..];
        match after.find('}') {
            Some(end) => {
                let name = &after[..end];
                out.push_str(&env::var(name).unwrap_or_default());
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
