//! Configuration for netconf-rpc sessions
//!
//! Centralized configuration with sensible defaults.

use crate::error::{NetconfError, Result};

/// Default ceiling for a single framed message (16 MB)
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 16 * 1024 * 1024;

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Reply Classification
    // -------------------------------------------------------------------------
    /// Treat `warning` severity rpc-errors as failures
    pub error_on_warning: bool,

    // -------------------------------------------------------------------------
    // Transport Configuration
    // -------------------------------------------------------------------------
    /// Max size of a single reply before the transport gives up (in bytes)
    pub max_message_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            error_on_warning: false,
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check that the values are usable
    pub fn validate(&self) -> Result<()> {
        if self.max_message_size == 0 {
            return Err(NetconfError::Config(
                "max_message_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the warnings-as-errors policy
    pub fn error_on_warning(mut self, enabled: bool) -> Self {
        self.config.error_on_warning = enabled;
        self
    }

    /// Set the maximum framed message size (in bytes)
    pub fn max_message_size(mut self, size: usize) -> Self {
        self.config.max_message_size = size;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
