//! Configuration structures and loading logic.

use crate::error::{Error, Result};
use crate::fs::{default_store_path, Splitter, SPECIAL_EXTENSIONS};
use crate::collection::DEFAULT_CLAIM_RETRIES;
use crate::token::{TokenGenerator, DEFAULT_TOKEN_LENGTH};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub token: TokenConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub split: SplitConfig,
}

/// Private token generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Number of letters in a generated token.
    #[serde(default = "default_token_length")]
    pub length: usize,

    /// Collisions tolerated before giving up. Unbounded when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,

    /// Insert attempts when a token is claimed concurrently.
    #[serde(default = "default_claim_retries")]
    pub claim_retries: u32,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_TOKEN_LENGTH,
            max_retries: None,
            claim_retries: DEFAULT_CLAIM_RETRIES,
        }
    }
}

/// Collection store settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path of the JSON store. Defaults to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Filename splitting settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Compound extensions matched as a whole, in priority order.
    #[serde(default = "default_special_extensions")]
    pub special_extensions: Vec<String>,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            special_extensions: default_special_extensions(),
        }
    }
}

fn default_token_length() -> usize {
    DEFAULT_TOKEN_LENGTH
}

fn default_claim_retries() -> u32 {
    DEFAULT_CLAIM_RETRIES
}

fn default_special_extensions() -> Vec<String> {
    SPECIAL_EXTENSIONS.iter().map(|ext| ext.to_string()).collect()
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(
                "No configuration at {}, using defaults",
                path.display()
            );
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the effective store path.
    pub fn store_path(&self) -> PathBuf {
        self.store.path.clone().unwrap_or_else(default_store_path)
    }

    /// Build the token generator described by this configuration.
    pub fn token_generator(&self) -> Result<TokenGenerator> {
        Ok(TokenGenerator::new(self.token.length)?.with_max_retries(self.token.max_retries))
    }

    /// Build the filename splitter described by this configuration.
    pub fn splitter(&self) -> Splitter {
        Splitter::new(self.split.special_extensions.iter().cloned())
    }
}
