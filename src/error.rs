//! Error types for the annealing engine.
//!
//! Two failure classes exist: configuration problems caught up front by
//! [`crate::config::EngineConfig::validate`], and failures raised by the
//! caller-supplied objective or generator capabilities. Generator
//! exhaustion is not an error; it is reported through
//! [`crate::types::Generation::Exhausted`].

use thiserror::Error;

/// Boxed error type accepted as a [`ComputationError`] source.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure raised by an injected objective function or solution generator.
///
/// The engine never retries or masks these; the first one aborts
/// [`solve`](crate::engine::AnnealingEngine::solve) immediately.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ComputationError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl ComputationError {
    /// Creates an error from a plain message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an error wrapping an underlying cause.
    pub fn with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

impl From<String> for ComputationError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for ComputationError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Top-level error type returned by engine construction and `solve`.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The configuration failed validation before the search started.
    #[error("invalid engine configuration: {reason}")]
    Configuration {
        /// Human-readable description of the rejected parameter.
        reason: String,
    },

    /// An injected capability failed mid-search.
    #[error(transparent)]
    Computation(#[from] ComputationError),
}

impl EngineError {
    pub(crate) fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }
}
