//! Main application configuration
//!
//! This module defines the primary configuration structures for the
//! swiss-pairing tool, including TOML file and environment variable loading and
//! validation.

use std::env;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::pairing::PairingSettings;
use crate::error::{PairingError, Result};

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub pairing: PairingSettings,
}

/// Service-level settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "swiss-pairing".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_overrides(|key| env::var(key).ok())?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            PairingError::ConfigurationError {
                message: format!("Failed to read {}: {}", path.display(), e),
            }
        })?;

        let mut config = Self::from_toml_str(&contents)?;
        config.apply_overrides(|key| env::var(key).ok())?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Parse configuration from TOML text; missing keys take their defaults
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| {
            PairingError::ConfigurationError {
                message: format!("Invalid configuration file: {}", e),
            }
            .into()
        })
    }

    /// Override settings from a key lookup (environment variables in
    /// production)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Service settings
        if let Some(name) = lookup("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Some(log_level) = lookup("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        // Pairing settings
        if let Some(bye_id) = lookup("SWISS_BYE_ID") {
            self.pairing.bye_id = bye_id;
        }
        if let Some(solver) = lookup("SWISS_SOLVER") {
            self.pairing.solver = parse_value("SWISS_SOLVER", &solver)?;
        }
        if let Some(threshold) = lookup("SWISS_PARALLEL_THRESHOLD") {
            self.pairing.parallel_threshold = parse_value("SWISS_PARALLEL_THRESHOLD", &threshold)?;
        }
        if let Some(validate) = lookup("SWISS_VALIDATE_INPUT") {
            self.pairing.validate_input = parse_value("SWISS_VALIDATE_INPUT", &validate)?;
        }

        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        PairingError::ConfigurationError {
            message: format!("Invalid {} value: {}", key, value),
        }
        .into()
    })
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    let invalid = |message: String| -> Result<()> {
        Err(PairingError::ConfigurationError { message }.into())
    };

    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return invalid(format!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return invalid("Service name cannot be empty".to_string());
    }

    // Validate pairing settings
    if config.pairing.bye_id.is_empty() {
        return invalid("Bye id cannot be empty".to_string());
    }
    if config.pairing.parallel_threshold == 0 {
        return invalid("Parallel threshold must be greater than 0".to_string());
    }

    Ok(())
}
