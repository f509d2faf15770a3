use std::path::PathBuf;

use compact_str::{CompactString, ToCompactString};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, VibeError>;

#[derive(Debug, Clone, Error)]
pub enum VibeError {
    #[error("Invalid handle '{input}': {message}")]
    InvalidHandle { input: CompactString, message: CompactString },

    #[error("Failed to load configuration from {path}: {message}")]
    ConfigLoadError { path: PathBuf, message: String },

    #[error("Failed to save configuration to {path}: {message}")]
    ConfigSaveError { path: PathBuf, message: String },

    #[error("Invalid configuration for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("{0}")]
    GeneralError(CompactString),
}

impl From<crate::client::ClientError> for VibeError {
    fn from(e: crate::client::ClientError) -> Self {
        VibeError::GeneralError(e.to_compact_string())
    }
}

impl VibeError {
    /// Create an invalid handle error
    pub fn invalid_handle(input: impl Into<CompactString>, message: impl Into<CompactString>) -> Self {
        Self::InvalidHandle { input: input.into(), message: message.into() }
    }

    /// Create a configuration load error
    pub fn config_load_error(path: PathBuf, source: impl std::fmt::Display) -> Self {
        Self::ConfigLoadError { path, message: source.to_string() }
    }

    /// Create a configuration save error
    pub fn config_save_error(path: PathBuf, source: impl std::fmt::Display) -> Self {
        Self::ConfigSaveError { path, message: source.to_string() }
    }

    /// Create a configuration validation error
    pub fn config_validation_error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidationError { field: field.into(), message: message.into() }
    }
}
