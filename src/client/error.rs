//! Error types for the GitHub profile client

use compact_str::CompactString;
use thiserror::Error;

use super::resource::Resource;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Failure of a single request against the profile API
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error from {endpoint}: {message}")]
    JsonParse {
        endpoint: CompactString,
        message: CompactString,
        #[source]
        source: serde_json::Error,
    },

    #[error("User not found: {handle}")]
    NotFound { handle: CompactString },

    #[error("Failed to fetch {resource} (HTTP {status}): {message}")]
    FetchFailed { resource: Resource, status: u16, message: CompactString },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration for {field}: {message}")]
    ConfigValidation { field: CompactString, message: CompactString },

    #[error("Invalid URL: {url}")]
    InvalidUrl { url: CompactString },

    #[error("Request timeout")]
    Timeout,
}

impl ClientError {
    pub fn not_found(handle: impl Into<CompactString>) -> Self {
        Self::NotFound { handle: handle.into() }
    }

    pub fn fetch_failed(resource: Resource, status: u16, message: impl Into<CompactString>) -> Self {
        Self::FetchFailed { resource, status, message: message.into() }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn config_validation(
        field: impl Into<CompactString>,
        message: impl Into<CompactString>,
    ) -> Self {
        Self::ConfigValidation { field: field.into(), message: message.into() }
    }

    pub fn json_parse(
        endpoint: impl Into<CompactString>,
        message: impl Into<CompactString>,
        source: serde_json::Error,
    ) -> Self {
        Self::JsonParse { endpoint: endpoint.into(), message: message.into(), source }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound { .. })
    }
}

/// Failure of a whole aggregation pipeline.
///
/// Every cause renders as the same user-facing text; the failing stage and
/// the underlying client error are kept for logs.
#[derive(Debug, Error)]
#[error("User not found")]
pub struct AggregationError {
    stage: Resource,
    #[source]
    source: ClientError,
}

impl AggregationError {
    pub fn new(stage: Resource, source: ClientError) -> Self {
        Self { stage, source }
    }

    /// Resource whose fetch failed
    pub fn stage(&self) -> Resource {
        self.stage
    }

    pub fn cause(&self) -> &ClientError {
        &self.source
    }
}
