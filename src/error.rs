//! Error types for autodemo
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur in autodemo
#[derive(Debug, Error)]
pub enum DemoError {
    /// A required view handle could not be resolved at startup.
    /// The core must not start on a partial handle set.
    #[error("Missing view handle: {0}")]
    MissingHandle(String),

    /// A suspension point observed a cancelled token.
    ///
    /// This is an expected control-flow signal, not a failure: it is caught
    /// exactly once by the loop controller, which resets and moves on.
    #[error("Cycle cancelled")]
    Cancelled,

    /// Configuration parse error
    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DemoError {
    /// True if this is the cooperative-cancellation signal.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DemoError::Cancelled)
    }
}

/// Result type alias for autodemo operations
pub type Result<T> = std::result::Result<T, DemoError>;
