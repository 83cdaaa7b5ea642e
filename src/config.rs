use crate::error::{config_error, env_error, AppResult};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::str::FromStr;

/// Default OpenAI model with structured output support
pub const DEFAULT_MODEL: &str = "gpt-4o-2024-08-06";
/// Default OpenAI API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
/// Default location of the optional config file
pub const DEFAULT_CONFIG_PATH: &str = "config/extractor.toml";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_DEMO_PORT: u16 = 8501;

/// Which completion backend performs the structured call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionBackend {
    /// Direct chat completions request with a strict JSON schema
    #[default]
    OpenAi,
    /// Rig extractor on top of the OpenAI provider
    Rig,
}

impl FromStr for CompletionBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(CompletionBackend::OpenAi),
            "rig" => Ok(CompletionBackend::Rig),
            other => Err(format!("Unknown extraction backend: {}", other)),
        }
    }
}

/// Main configuration structure for both binaries
#[derive(Clone)]
pub struct Config {
    /// OpenAI API key; `None` when not configured
    pub openai_api_key: Option<String>,
    /// Model used for extraction
    pub openai_model: String,
    /// Base URL of the OpenAI-compatible API
    pub openai_base_url: String,
    /// Completion backend
    pub backend: CompletionBackend,
    /// Address both servers bind to
    pub host: String,
    /// Port of the HTTP API
    pub port: u16,
    /// Port of the demo shell
    pub demo_port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_model: DEFAULT_MODEL.to_string(),
            openai_base_url: DEFAULT_BASE_URL.to_string(),
            backend: CompletionBackend::default(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            demo_port: DEFAULT_DEMO_PORT,
        }
    }
}

// Keeps the credential out of logs
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("openai_model", &self.openai_model)
            .field("openai_base_url", &self.openai_base_url)
            .field("backend", &self.backend)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("demo_port", &self.demo_port)
            .finish()
    }
}

/// Optional overrides read from the TOML config file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub backend: Option<CompletionBackend>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub demo_port: Option<u16>,
}

impl FileConfig {
    /// Parse the TOML config file contents
    pub fn parse(content: &str) -> AppResult<Self> {
        Ok(toml::from_str(content)?)
    }
}

impl Config {
    /// Load configuration from `.env`, the optional config file and the environment
    pub fn load() -> AppResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let mut config = Config::default();

        let path = env::var("EXTRACTOR_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        if let Ok(content) = fs::read_to_string(&path) {
            config.apply_file(FileConfig::parse(&content)?);
        }

        config.apply_env(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Merge file overrides into this config
    pub fn apply_file(&mut self, file: FileConfig) {
        if let Some(model) = file.model {
            self.openai_model = model;
        }
        if let Some(base_url) = file.base_url {
            self.openai_base_url = base_url;
        }
        if let Some(backend) = file.backend {
            self.backend = backend;
        }
        if let Some(host) = file.host {
            self.host = host;
        }
        if let Some(port) = file.port {
            self.port = port;
        }
        if let Some(demo_port) = file.demo_port {
            self.demo_port = demo_port;
        }
    }

    /// Merge environment overrides using `lookup` to read variables
    pub fn apply_env<F>(&mut self, lookup: F) -> AppResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        // An empty key is the same as no key
        self.openai_api_key = lookup("OPENAI_API_KEY").filter(|key| !key.trim().is_empty());

        if let Some(model) = lookup("OPENAI_MODEL") {
            self.openai_model = model;
        }
        if let Some(base_url) = lookup("OPENAI_BASE_URL") {
            self.openai_base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(backend) = lookup("EXTRACTION_BACKEND") {
            self.backend = backend.parse().map_err(|e: String| config_error(&e))?;
        }
        if let Some(host) = lookup("HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.port = port.parse().map_err(|_| env_error("PORT"))?;
        }
        if let Some(demo_port) = lookup("DEMO_PORT") {
            self.demo_port = demo_port.parse().map_err(|_| env_error("DEMO_PORT"))?;
        }
        Ok(())
    }

    /// Whether an OpenAI credential is available
    pub fn has_credential(&self) -> bool {
        self.openai_api_key.is_some()
    }

    /// Socket address string for the HTTP API
    pub fn api_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Socket address string for the demo shell
    pub fn demo_addr(&self) -> String {
        format!("{}:{}", self.host, self.demo_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let mut config = Config::default();
        config.apply_env(lookup_from(&[])).unwrap();

        assert!(!config.has_credential());
        assert_eq!(config.openai_model, DEFAULT_MODEL);
        assert_eq!(config.backend, CompletionBackend::OpenAi);
        assert_eq!(config.api_addr(), "0.0.0.0:8000");
        assert_eq!(config.demo_addr(), "0.0.0.0:8501");
    }

    #[test]
    fn empty_key_counts_as_missing() {
        let mut config = Config::default();
        config.apply_env(lookup_from(&[("OPENAI_API_KEY", "  ")])).unwrap();
        assert!(!config.has_credential());
    }

    #[test]
    fn environment_overrides_file() {
        let mut config = Config::default();
        let file = FileConfig::parse(
            r#"
            model = "gpt-4o-mini"
            backend = "rig"
            port = 9000
            "#,
        )
        .unwrap();
        config.apply_file(file);
        config
            .apply_env(lookup_from(&[
                ("OPENAI_API_KEY", "sk-test"),
                ("PORT", "9100"),
                ("OPENAI_BASE_URL", "http://localhost:1234/v1/"),
            ]))
            .unwrap();

        assert!(config.has_credential());
        assert_eq!(config.openai_model, "gpt-4o-mini");
        assert_eq!(config.backend, CompletionBackend::Rig);
        assert_eq!(config.port, 9100);
        assert_eq!(config.openai_base_url, "http://localhost:1234/v1");
    }

    #[test]
    fn invalid_port_is_reported() {
        let mut config = Config::default();
        let result = config.apply_env(lookup_from(&[("PORT", "eighty")]));
        assert!(result.is_err());
    }

    #[test]
    fn unknown_backend_is_reported() {
        let mut config = Config::default();
        let result = config.apply_env(lookup_from(&[("EXTRACTION_BACKEND", "llama")]));
        assert!(result.is_err());
    }

    #[test]
    fn debug_output_redacts_the_key() {
        let config = Config {
            openai_api_key: Some("sk-secret".to_string()),
            ..Config::default()
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
