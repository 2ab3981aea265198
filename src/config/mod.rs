//! Configuration module for statmap-vault.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - CLI argument merging
//! - Configuration validation

pub mod loader;
pub mod validation;

pub use loader::{Config, SplitConfig, StoreConfig, TokenConfig};
pub use validation::validate_config;
