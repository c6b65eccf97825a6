//! Application context.
//!
//! [`AppContext`] holds the working directory and the loaded [`UiConfig`],
//! and builds the sources and stores the commands need.

use std::path::{Path, PathBuf};

use crate::{
    api::HttpSettingsSource,
    config::{CONFIG_FILE, UiConfig},
    prefs::PrefStore,
};

#[derive(Debug, Clone, Default)]
pub struct AppContext {
    /// Directory relative paths are resolved against.
    pub workspace: PathBuf,
    /// Config file in use. It may not exist.
    pub config_path: PathBuf,
    pub config: UiConfig,
}

impl AppContext {
    /// Load the context for `workspace`.
    ///
    /// `config_path` defaults to `.hhd-ui.toml` in the workspace. An
    /// `endpoint` given here overrides the one in the file.
    pub async fn load(
        workspace: PathBuf,
        config_path: Option<PathBuf>,
        endpoint: Option<String>,
    ) -> anyhow::Result<Self> {
        let config_path = config_path.unwrap_or_else(|| workspace.join(CONFIG_FILE));
        let mut config = UiConfig::load(&config_path).await?;
        if let Some(endpoint) = endpoint {
            config.endpoint = endpoint;
        }
        debug!("Using endpoint {}", config.endpoint);

        Ok(Self {
            workspace,
            config_path,
            config,
        })
    }

    pub fn settings_source(&self) -> HttpSettingsSource {
        HttpSettingsSource::new(&self.config.endpoint)
            .with_token(self.config.token.clone())
            .with_lang(self.config.lang.clone())
    }

    /// Absolute path of the UI state file.
    pub fn state_path(&self) -> PathBuf {
        self.resolve(&self.config.state_file)
    }

    pub fn pref_store(&self) -> anyhow::Result<PrefStore> {
        PrefStore::open(self.state_path())
    }

    /// Resolve `path` against the workspace unless it is absolute.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace.join(path)
        }
    }
}
