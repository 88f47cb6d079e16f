//! Application error types

use std::path::PathBuf;

use apicheck_domain::DomainError;
use thiserror::Error;

use crate::config::ConfigError;
use crate::ports::HttpClientError;

/// Application-level errors. Every variant ends the scenario that hit it.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A condition did not hold for the response.
    #[error("{message}\nresponse body: {body}")]
    ConditionFailed {
        /// Description of the failed condition.
        description: String,
        /// The observed value.
        actual: String,
        /// Expected-versus-actual summary.
        message: String,
        /// Preview of the raw response body.
        body: String,
    },

    /// The body does not have the requested shape.
    #[error("cannot read response body as {target}: {source}\nresponse body: {body}")]
    Deserialize {
        /// Requested Rust type.
        target: &'static str,
        /// Parser error.
        source: serde_json::Error,
        /// Preview of the raw response body.
        body: String,
    },

    /// A field the caller relies on is absent.
    #[error("field '{field}' missing from response body: {body}")]
    MissingField {
        /// Field or JSON path.
        field: String,
        /// Preview of the raw response body.
        body: String,
    },

    /// No response was received.
    #[error("transport error: {0}")]
    Transport(#[from] HttpClientError),

    /// A request or condition could not be built.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// A local file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The suite configuration is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
