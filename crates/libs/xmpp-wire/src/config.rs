//! Decoder configuration, loaded from TOML.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

/// Decoder tuning, usually read from the client's TOML config.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Log whitespace keepalives at debug level.
    pub log_keepalives: bool,
    /// Log skipped non-structural tokens.
    pub log_unhandled_tokens: bool,
    /// Deepest nesting accepted below a decoded element.
    pub max_depth: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            log_keepalives: true,
            log_unhandled_tokens: true,
            max_depth: 64,
        }
    }
}

impl DecoderConfig {
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }
}
