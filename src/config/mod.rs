//! Configuration module for ProofDrop
//!
//! This module handles:
//! - Project-level configuration (proofdrop.toml)
//! - USD price table for balance valuation
//! - Extra networks
//! - CLI defaults

mod project_config;

pub use project_config::{
    load_config_file, load_project_config, CliDefaults, ConfigError,
    ProjectConfig, EXAMPLE_CONFIG, JSON_FILENAME, TOML_FILENAME,
};
