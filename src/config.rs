//! Configuration management for gemini-bridge
//!
//! Settings come from an optional TOML file followed by environment overrides
//! (`GEMINI_API_KEY`, `GEMINI_MODEL`, `GEMINI_BASE_URL`, `HOST`, `PORT`).
//! The resulting [`Config`] is read once at startup and never mutated.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::str::FromStr;

/// Model used when neither the config file nor `GEMINI_MODEL` names one
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
/// Public Gemini API host
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Listening port used when neither the config file nor `PORT` names one
pub const DEFAULT_PORT: u16 = 3000;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Address to bind, built from `host` and `port`
    pub fn socket_addr(&self) -> AppResult<SocketAddr> {
        let ip: IpAddr = self.host.parse().map_err(|_| {
            AppError::Config(format!("server.host '{}' is not an IP address", self.host))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// Upstream generative API settings
///
/// The API key is optional here: a missing key is reported per request, not
/// at startup. Use the accessors; fields are private so that an empty key
/// string can never be mistaken for a configured one.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiConfig {
    #[serde(default, skip_serializing)]
    api_key: Option<String>,
    #[serde(default = "default_model")]
    model: String,
    #[serde(default = "default_base_url")]
    base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
        }
    }
}

impl GeminiConfig {
    /// Build a config with explicit values (tests and embedding)
    pub fn new(
        api_key: Option<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            api_key: normalize_key(api_key),
            model: model.into(),
            base_url: base_url.into(),
        }
    }

    /// Get the API key, if one is configured and non-empty
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    /// Get the model identifier sent upstream and echoed in responses
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Get the upstream base URL (scheme + host, no trailing slash)
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

fn normalize_key(key: Option<String>) -> Option<String> {
    key.filter(|k| !k.trim().is_empty())
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Observability configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Source of environment variables
///
/// Lets `apply_env` run against a fixed map in tests instead of mutating
/// the process environment.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl<F> EnvSource for F
where
    F: Fn(&str) -> Option<String>,
{
    fn var(&self, key: &str) -> Option<String> {
        self(key)
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path_display = path.as_ref().display().to_string();

        let content = std::fs::read_to_string(path.as_ref()).map_err(|source| {
            AppError::ConfigFileRead {
                path: path_display.clone(),
                source,
            }
        })?;

        let config: Self =
            toml::from_str(&content).map_err(|source| AppError::ConfigParseFailed {
                path: path_display.clone(),
                source,
            })?;

        config
            .validate()
            .map_err(|e| AppError::ConfigValidationFailed {
                path: path_display,
                reason: e.to_string(),
            })?;

        Ok(config)
    }

    /// Load the startup configuration
    ///
    /// Reads `path` when given (defaults otherwise), then applies overrides
    /// from the process environment and validates the merged result.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config.apply_env(&ProcessEnv)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides on top of this configuration
    ///
    /// Empty variables are ignored. `PORT` must parse as a `u16`.
    pub fn apply_env(mut self, env: &impl EnvSource) -> AppResult<Self> {
        let get = |key: &str| env.var(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get("GEMINI_API_KEY") {
            self.gemini.api_key = Some(key);
        }
        if let Some(model) = get("GEMINI_MODEL") {
            self.gemini.model = model;
        }
        if let Some(base_url) = get("GEMINI_BASE_URL") {
            self.gemini.base_url = base_url;
        }
        if let Some(host) = get("HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("PORT") {
            self.server.port = port.trim().parse().map_err(|_| {
                AppError::Config(format!("PORT must be a number between 1 and 65535, got '{}'", port))
            })?;
        }

        Ok(self)
    }

    /// Validate configuration after parsing
    ///
    /// Called by `from_file()` and `load()`; can also be called explicitly
    /// when constructing Config by other means (e.g., in tests).
    pub fn validate(&self) -> AppResult<()> {
        if self.server.port == 0 {
            return Err(AppError::Config(
                "server.port must be greater than 0".to_string(),
            ));
        }

        if self.server.host.parse::<IpAddr>().is_err() {
            return Err(AppError::Config(format!(
                "server.host '{}' must be an IP address (e.g. '0.0.0.0' or '127.0.0.1')",
                self.server.host
            )));
        }

        let model = self.gemini.model.as_str();
        if model.trim().is_empty() {
            return Err(AppError::Config(
                "gemini.model cannot be empty".to_string(),
            ));
        }
        // The model is spliced into the request path as `models/{model}:generateContent`
        if model.contains(['/', ':', '?', '#']) || model.chars().any(char::is_whitespace) {
            return Err(AppError::Config(format!(
                "gemini.model '{}' must be a bare model identifier (e.g. '{}')",
                model, DEFAULT_MODEL
            )));
        }

        let base_url = self.gemini.base_url.as_str();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(AppError::Config(format!(
                "gemini.base_url '{}' must start with 'http://' or 'https://'",
                base_url
            )));
        }

        let level = self.observability.log_level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(AppError::Config(format!(
                "observability.log_level '{}' is not one of {}",
                self.observability.log_level,
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }
}

impl FromStr for Config {
    type Err = AppError;

    fn from_str(toml_str: &str) -> Result<Self, Self::Err> {
        let config: Config =
            toml::from_str(toml_str).map_err(|source| AppError::ConfigParseFailed {
                path: "<string>".to_string(),
                source,
            })?;

        config.validate()?;
        Ok(config)
    }
}
