//! Application configuration loaded from `config.toml`.
//!
//! Every field has a default, so a missing file or a partial file both work:
//!
//! ```toml
//! dataset_path = "/usr/share/wordwise/oxford-5000.json"
//!
//! [enrichment]
//! endpoint = "https://generativelanguage.googleapis.com/v1beta/models"
//! models = ["gemma-3-4b-it", "gemma-3-12b-it"]
//! api_key_env = "WORDWISE_API_KEY"
//!
//! [session]
//! default_length = 15
//! smart = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::filters::{SessionConfig, DEFAULT_SESSION_LENGTH};

pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Could not write config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Overrides the platform data directory
    pub data_dir: Option<PathBuf>,
    /// Word list to use instead of the bundled one
    pub dataset_path: Option<PathBuf>,
    pub enrichment: EnrichmentConfig,
    pub session: SessionDefaults,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            dataset_path: None,
            enrichment: EnrichmentConfig::default(),
            session: SessionDefaults::default(),
        }
    }
}

/// Settings for the remote definition/quiz generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// Base URL; the model name and `:generateContent` are appended
    pub endpoint: String,
    /// One is picked at random per request
    pub models: Vec<String>,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    pub timeout_secs: u64,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
            models: vec![
                "gemma-3-1b-it".to_string(),
                "gemma-3-4b-it".to_string(),
                "gemma-3-12b-it".to_string(),
                "gemma-3n-e4b-it".to_string(),
                "gemma-3-27b-it".to_string(),
            ],
            api_key_env: "WORDWISE_API_KEY".to_string(),
            timeout_secs: 20,
            temperature: 0.2,
            max_output_tokens: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionDefaults {
    pub default_length: usize,
    pub smart: bool,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            default_length: DEFAULT_SESSION_LENGTH,
            smart: true,
        }
    }
}

impl SessionDefaults {
    pub fn to_session_config(&self) -> SessionConfig {
        SessionConfig {
            length: SessionConfig::clamp_length(self.default_length),
            smart: self.smart,
        }
    }
}

impl AppConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load `config.toml` from `dir`, falling back to defaults when absent
    pub fn load_from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            log::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)?;
        let config = Self::from_toml(&content)?;
        log::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn save_to_dir(&self, dir: &Path) -> Result<PathBuf, ConfigError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(CONFIG_FILE_NAME);
        fs::write(&path, toml::to_string_pretty(self)?)?;
        Ok(path)
    }
}
