use serde::{Deserialize, Serialize};
use std::fmt;

/// Environment variable holding the TMDB credential.
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,
    #[serde(default)]
    pub appdir: Option<String>,
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(skip)]
    pub debug_logs: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenConfig {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_port")]
    pub port: String,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: None,
            port: default_port(),
        }
    }
}

#[derive(Clone, Deserialize, Serialize)]
pub struct TmdbConfig {
    #[serde(default, alias = "apikey")]
    pub api_key: Option<String>,
    #[serde(default = "default_api_base", alias = "apibase")]
    pub api_base: String,
    #[serde(default = "default_image_base", alias = "imagebase")]
    pub image_base: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_timeout_secs", alias = "timeout")]
    pub timeout_secs: u64,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: default_api_base(),
            image_base: default_image_base(),
            language: default_language(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// Keep the credential out of debug output and logs.
impl fmt::Debug for TmdbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmdbConfig")
            .field("api_key", &self.api_key().map(|_| "<redacted>"))
            .field("api_base", &self.api_base)
            .field("image_base", &self.image_base)
            .field("language", &self.language)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl TmdbConfig {
    /// The configured credential, if any. Blank values count as absent.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

fn default_port() -> String {
    "3000".to_string()
}

fn default_api_base() -> String {
    "https://api.themoviedb.org".to_string()
}

fn default_image_base() -> String {
    "https://image.tmdb.org/t/p/w200".to_string()
}

fn default_language() -> String {
    "ko-KR".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_string(), e))?;

        Self::from_yaml(&content).map_err(|e| ConfigError::ParseError(path.to_string(), e))
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Load the config file if one was given, then apply environment overrides.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    pub fn apply_env(&mut self) {
        self.apply_api_key_override(std::env::var(API_KEY_ENV).ok());
    }

    /// A non-blank override replaces whatever the config file said.
    pub fn apply_api_key_override(&mut self, value: Option<String>) {
        if let Some(key) = value.filter(|v| !v.trim().is_empty()) {
            self.tmdb.api_key = Some(key);
        }
    }

    pub fn listen_addr(&self) -> String {
        let address = self.listen.address.as_deref().unwrap_or("[::]");
        format!("{}:{}", address, self.listen.port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(String, serde_yaml::Error),
}
