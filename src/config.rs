//! Library configuration
//!
//! ```toml
//! cache_capacity = 512
//! batch_chunk_size = 250
//!
//! [[seed_rates]]
//! from = "USD"
//! to = "EUR"
//! rate = 0.92
//! ```

use crate::error::{CentinelError, Result};
use crate::fx::cache::DEFAULT_CACHE_CAPACITY;
use crate::fx::RateQuote;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Replaces the built-in seed table when present
    #[serde(default)]
    pub seed_rates: Option<Vec<RateQuote>>,
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
    #[serde(default = "default_batch_chunk_size")]
    pub batch_chunk_size: usize,
}

fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

fn default_batch_chunk_size() -> usize {
    1000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed_rates: None,
            cache_capacity: default_cache_capacity(),
            batch_chunk_size: default_batch_chunk_size(),
        }
    }
}

impl Config {
    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)
            .map_err(|e| CentinelError::ConfigError(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_chunk_size == 0 {
            return Err(CentinelError::ConfigError(
                "batch_chunk_size must be at least 1".to_string(),
            ));
        }
        for quote in self.seed_rates.iter().flatten() {
            quote
                .validate()
                .map_err(|e| CentinelError::ConfigError(format!("Invalid seed rate: {}", e)))?;
        }
        Ok(())
    }
}
