//! Settings schema sources.
//!
//! The daemon serves its settings schema at `GET /api/v1/settings`. The
//! [`SettingsSource`] trait separates fetching from rendering so the renderer
//! can be fed from HTTP, from a file, or from a fixture in tests.

use std::{future::Future, path::PathBuf};

use hhd_form::data::SettingsSchema;
use reqwest::StatusCode;
use serde_json::Value;

/// Path of the settings endpoint.
pub const SETTINGS_PATH: &str = "/api/v1/settings";

/// Failure to obtain a settings schema.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("Failed to fetch settings: HTTP {status}")]
    Fetch { status: StatusCode },
    /// The request did not complete.
    #[error("Settings request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Reading a local schema file failed.
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    /// The body is not a JSON object.
    #[error("Settings body is not a valid schema: {0}")]
    Parse(String),
}

/// Something that can produce a settings schema.
pub trait SettingsSource {
    /// Fetch and parse the schema once. Implementations do not retry.
    fn fetch_settings(&self) -> impl Future<Output = Result<SettingsSchema, ApiError>> + Send;
}

/// Parse a response body into a schema.
pub fn parse_schema(body: &[u8]) -> Result<SettingsSchema, ApiError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| ApiError::Parse(e.to_string()))?;
    SettingsSchema::try_from(value).map_err(|e| ApiError::Parse(e.to_string()))
}

/// Fetches the schema from a running daemon over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSettingsSource {
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
    lang: Option<String>,
}

impl HttpSettingsSource {
    /// Source for the daemon at `endpoint`, e.g. `http://localhost:5335`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            token: None,
            lang: None,
        }
    }

    /// Send `Authorization: Bearer <token>` with every request.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Ask the daemon to translate titles into `lang`.
    pub fn with_lang(mut self, lang: Option<String>) -> Self {
        self.lang = lang;
        self
    }

    /// Full URL of the settings endpoint.
    pub fn settings_url(&self) -> String {
        format!("{}{SETTINGS_PATH}", self.endpoint.trim_end_matches('/'))
    }
}

impl SettingsSource for HttpSettingsSource {
    async fn fetch_settings(&self) -> Result<SettingsSchema, ApiError> {
        let url = self.settings_url();
        debug!("GET {url}");

        let mut request = self.client.get(&url);
        if let Some(lang) = &self.lang {
            request = request.query(&[("lang", lang.as_str())]);
        }
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Fetch { status });
        }

        let body = response.bytes().await?;
        parse_schema(&body)
    }
}

/// Reads a schema saved to disk, e.g. from `curl .../api/v1/settings`.
#[derive(Debug, Clone)]
pub struct FileSettingsSource {
    path: PathBuf,
}

impl FileSettingsSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SettingsSource for FileSettingsSource {
    async fn fetch_settings(&self) -> Result<SettingsSchema, ApiError> {
        debug!("Reading settings from {}", self.path.display());
        let body = tokio::fs::read(&self.path).await?;
        parse_schema(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_url() {
        assert_eq!(
            HttpSettingsSource::new("http://localhost:5335").settings_url(),
            "http://localhost:5335/api/v1/settings"
        );
        assert_eq!(
            HttpSettingsSource::new("http://deck:5335/").settings_url(),
            "http://deck:5335/api/v1/settings"
        );
    }

    #[test]
    fn test_parse_schema() {
        let schema = parse_schema(br#"{"hhd": {}}"#).unwrap();
        assert_eq!(schema.namespaces().collect::<Vec<_>>(), ["hhd"]);

        assert!(matches!(parse_schema(b"<html>"), Err(ApiError::Parse(_))));
        assert!(matches!(parse_schema(b"[]"), Err(ApiError::Parse(_))));
    }

    #[tokio::test]
    async fn test_file_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"controllers": {"legion_go": {"children": {}}}}"#).unwrap();

        let schema = FileSettingsSource::new(&path).fetch_settings().await.unwrap();
        assert!(schema.children_at(&["controllers", "legion_go"]).is_some());

        let missing = FileSettingsSource::new(dir.path().join("nope.json"))
            .fetch_settings()
            .await;
        assert!(matches!(missing, Err(ApiError::Io(_))));
    }
}
