//! Project-level configuration support
//!
//! Loads configuration from `proofdrop.toml` or `.proofdroprc.json` in the
//! working directory, or from an explicit `--config` path.
//!
//! # Configuration Format
//!
//! ```toml
//! # proofdrop.toml
//!
//! [prices]
//! ETH = 3000.0
//! MATIC = 0.7
//!
//! [defaults]
//! format = "text"
//! chains = ["sepolia", "polygonAmoy"]
//!
//! [[chains]]
//! key = "optimismSepolia"
//! chain_id = 11155420
//! name = "OP Sepolia"
//! currency_symbol = "ETH"
//! price_symbol = "ETH"
//! ```

use crate::chains::{builtin_chains, Chain, DEFAULT_CHAIN_KEYS};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

pub const TOML_FILENAME: &str = "proofdrop.toml";
pub const JSON_FILENAME: &str = ".proofdroprc.json";

/// Static USD prices used to value testnet balances as if they were mainnet
const DEFAULT_PRICES: [(&str, f64); 2] = [("ETH", 3000.0), ("MATIC", 0.7)];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Price for {symbol} must be a finite, non-negative number (got {value})")]
    InvalidPrice { symbol: String, value: f64 },

    #[error("Chain '{key}' declares chain_id 0")]
    InvalidChain { key: String },
}

/// Project configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectConfig {
    /// Symbol -> USD price overrides
    #[serde(default)]
    pub prices: BTreeMap<String, f64>,

    #[serde(default)]
    pub defaults: CliDefaults,

    /// Extra networks, or overrides of built-in ones with the same key
    #[serde(default)]
    pub chains: Vec<Chain>,
}

/// Default values for CLI flags
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CliDefaults {
    /// Output format (text, json, markdown)
    #[serde(default)]
    pub format: Option<String>,

    /// Chain keys scored by `simulate` when none are given
    #[serde(default)]
    pub chains: Vec<String>,
}

impl ProjectConfig {
    /// USD price for a symbol; unknown symbols are worth 0
    pub fn price_usd(&self, symbol: &str) -> f64 {
        let key = symbol.to_uppercase();
        if let Some(price) = self
            .prices
            .iter()
            .find(|(k, _)| k.to_uppercase() == key)
            .map(|(_, v)| *v)
        {
            return price;
        }
        match DEFAULT_PRICES.iter().find(|(s, _)| *s == key) {
            Some((_, price)) => *price,
            None => {
                warn!("No USD price for {}; valuing balance at 0", symbol);
                0.0
            }
        }
    }

    /// Built-in networks merged with configured ones
    pub fn chains(&self) -> Vec<Chain> {
        let mut chains = builtin_chains();
        for extra in &self.chains {
            match chains.iter_mut().find(|c| c.key.eq_ignore_ascii_case(&extra.key)) {
                Some(existing) => *existing = extra.clone(),
                None => chains.push(extra.clone()),
            }
        }
        chains
    }

    /// Chain keys to score when the user did not pick any
    pub fn default_chain_keys(&self) -> Vec<String> {
        if self.defaults.chains.is_empty() {
            DEFAULT_CHAIN_KEYS.iter().map(|k| k.to_string()).collect()
        } else {
            self.defaults.chains.clone()
        }
    }

    pub fn default_format(&self) -> &str {
        self.defaults.format.as_deref().unwrap_or("text")
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (symbol, value) in &self.prices {
            if !value.is_finite() || *value < 0.0 {
                return Err(ConfigError::InvalidPrice {
                    symbol: symbol.clone(),
                    value: *value,
                });
            }
        }
        if let Some(bad) = self.chains.iter().find(|c| c.chain_id == 0) {
            return Err(ConfigError::InvalidChain {
                key: bad.key.clone(),
            });
        }
        Ok(())
    }
}

/// Load config from an explicit path (TOML unless the extension is `.json`)
pub fn load_config_file(path: &Path) -> Result<ProjectConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let config: ProjectConfig = if is_json {
        serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        toml::from_str(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?
    };

    config.validate()?;
    Ok(config)
}

/// Discover config in `dir`, falling back to defaults
pub fn load_project_config(dir: &Path) -> ProjectConfig {
    for name in [TOML_FILENAME, JSON_FILENAME] {
        let path = dir.join(name);
        if !path.exists() {
            continue;
        }
        match load_config_file(&path) {
            Ok(config) => {
                debug!("Loaded project config from {}", path.display());
                return config;
            }
            Err(e) => {
                warn!("{}", e);
            }
        }
    }

    debug!("No project config found, using defaults");
    ProjectConfig::default()
}

/// Example written by `proofdrop init`
pub const EXAMPLE_CONFIG: &str = r#"# ProofDrop Configuration

[prices]
# USD price per native token, used to value balances
ETH = 3000.0
MATIC = 0.7

[defaults]
# Output format (text, json, markdown)
format = "text"

# Chains scored by `proofdrop simulate` when --chains is omitted
chains = ["sepolia", "polygonAmoy", "arbitrumSepolia", "baseSepolia"]

# Extra networks
# [[chains]]
# key = "optimismSepolia"
# chain_id = 11155420
# name = "OP Sepolia"
# currency_symbol = "ETH"
# price_symbol = "ETH"
"#;
