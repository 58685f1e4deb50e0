// ⚙️ Configuration
// Defaults → optional TOML file → environment overrides

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default upstream API root
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Maximum number of entries requested from the index endpoint
pub const DEFAULT_LIMIT: u32 = 999;

/// Image used when a record has neither artwork nor sprite
pub const DEFAULT_PLACEHOLDER_IMAGE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/0.png";

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "pokedex.toml";

pub const ENV_API_URL: &str = "POKEDEX_API_URL";
pub const ENV_LIMIT: &str = "POKEDEX_LIMIT";
pub const ENV_LOG: &str = "POKEDEX_LOG";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Upstream API settings
    pub api: ApiConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API root, without trailing slash (e.g., "https://pokeapi.co/api/v2")
    pub base_url: String,

    /// Index size cap
    pub limit: u32,

    /// Fallback image URL
    pub placeholder_image: String,

    /// Per-request timeout. None = wait forever
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            limit: DEFAULT_LIMIT,
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level directive (e.g., "info", "pokedex=debug")
    pub level: String,

    /// Log file used in TUI mode
    pub file: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: PathBuf::from("pokedex.log"),
        }
    }
}

impl Config {
    /// Load from an explicit path, or from `pokedex.toml` if it exists,
    /// then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Apply overrides from a key lookup (the process environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api.base_url = url;
        }

        if let Some(raw) = lookup(ENV_LIMIT) {
            self.api.limit = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    key: ENV_LIMIT.to_string(),
                    value: raw.clone(),
                })?;
        }

        if let Some(level) = lookup(ENV_LOG) {
            self.logging.level = level;
        }

        self.validate()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.api.limit == 0 {
            return Err(ConfigError::InvalidValue {
                key: "api.limit".to_string(),
                value: "0".to_string(),
            });
        }

        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "api.base_url".to_string(),
                value: String::new(),
            });
        }

        // Normalizer relies on this never being empty
        if self.api.placeholder_image.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "api.placeholder_image".to_string(),
                value: String::new(),
            });
        }

        Ok(())
    }

    /// Index endpoint URL, e.g. https://pokeapi.co/api/v2/pokemon?limit=999
    pub fn index_url(&self) -> String {
        format!(
            "{}/pokemon?limit={}",
            self.api.base_url.trim_end_matches('/'),
            self.api.limit
        )
    }
}
