use serde::Deserialize;
use std::path::Path;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Level used when a request does not specify one
    #[serde(default = "default_level")]
    pub default_level: u8,

    /// Re-compress encoded PNG output with oxipng
    #[serde(default)]
    pub optimize_png: bool,

    /// Request body limit for the enhancement API
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Remote polish service used for levels above 75
    #[serde(default)]
    pub remote_polish: RemotePolishConfig,
}

fn default_level() -> u8 {
    50
}

fn default_max_upload_bytes() -> usize {
    20 * 1024 * 1024
}

/// Remote polish endpoint settings
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RemotePolishConfig {
    /// Endpoint URL. Without it remote polish always fails as not configured.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Environment variable holding the bearer token
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_key_env() -> String {
    "POLISH_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for RemotePolishConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl RemotePolishConfig {
    /// Read the bearer token from the configured environment variable.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.is_empty())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_level: default_level(),
            optimize_png: false,
            max_upload_bytes: default_max_upload_bytes(),
            remote_polish: RemotePolishConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parse configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        let config: Self = serde_yaml::from_str(content)?;
        Ok(config.sanitized())
    }

    /// Load configuration from an optional file path.
    ///
    /// Missing, unreadable, or invalid files log a warning and fall back to
    /// defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::debug!("No config file given, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        default_level = config.default_level,
                        remote_polish = config.remote_polish.endpoint.is_some(),
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    fn sanitized(mut self) -> Self {
        if self.default_level > 100 {
            tracing::warn!(
                default_level = self.default_level,
                "default_level above 100, clamping"
            );
            self.default_level = 100;
        }
        self
    }
}
