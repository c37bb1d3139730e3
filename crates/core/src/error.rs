//! Error types for the segment engine

use statusbar_types::SegmentId;
use std::fmt;
use thiserror::Error;

/// Errors raised by the engine itself
///
/// Probe failures are not represented here; they are [`ProbeFailure`] values
/// that the error injector turns into degraded segment content.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A segment id that was never registered at startup
    #[error("Unknown segment: {0}")]
    UnknownSegment(SegmentId),

    /// Missing or invalid startup configuration
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        EngineError::Config(msg.into())
    }
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// A probe's description of why it could not produce content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeFailure {
    /// What the probe was trying to do
    pub description: String,
    /// Underlying OS or library error text
    pub detail: String,
}

impl ProbeFailure {
    pub fn new<D: Into<String>, E: Into<String>>(description: D, detail: E) -> Self {
        Self {
            description: description.into(),
            detail: detail.into(),
        }
    }

    /// Build a failure from any error, keeping its message as the detail
    pub fn from_error<D: Into<String>>(description: D, err: &dyn std::error::Error) -> Self {
        Self::new(description, err.to_string())
    }
}

impl fmt::Display for ProbeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.description, self.detail)
    }
}
