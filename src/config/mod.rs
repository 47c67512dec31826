//! Configuration management for the swiss-pairing tool
//!
//! This module handles configuration loading from TOML files and environment
//! variables, validation, and default values.

pub mod app;
pub mod pairing;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, ServiceSettings};
pub use pairing::PairingSettings;
