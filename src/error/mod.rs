//! Error definitions
//!
//! This module provides error types for testkit-size.

use thiserror::Error;

/// Main error type for testkit-size
#[derive(Error, Debug)]
pub enum Error {
    /// Assertion failed
    #[error("Assertion failed: {0}")]
    AssertionFailed(String),

    /// A cursor could not be restarted
    #[error("Cannot rewind: {0}")]
    Rewind(String),

    /// A reference value has no size to compare against
    #[error("Value has no countable size")]
    Uncountable,
}

impl Error {
    /// Create an assertion failed error.
    #[must_use]
    pub fn assertion_failed(message: impl Into<String>) -> Self {
        Self::AssertionFailed(message.into())
    }

    /// Create a rewind error.
    #[must_use]
    pub fn rewind(message: impl Into<String>) -> Self {
        Self::Rewind(message.into())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
