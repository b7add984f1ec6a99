//! Centralized error types for all Rust crates.
//!
//! This module provides a unified error type that can be used across all
//! support-platform Rust crates, with built-in retryability classification.
//! HTTP status semantics are deliberately not modeled here; crates that talk
//! to the backend classify statuses in their own error types.

use thiserror::Error;

/// Common error type for platform operations.
///
/// All errors are classified as either retryable or non-retryable,
/// which helps callers decide whether to retry failed operations.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// HTTP transport or client-construction failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Local I/O failure (durable storage)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Timeout occurred
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PlatformError {
    /// Check if this error is retryable.
    ///
    /// Retryable errors are transient failures that may succeed on retry,
    /// such as network issues or temporary unavailability.
    ///
    /// # Examples
    ///
    /// ```
    /// use support_common::PlatformError;
    ///
    /// let err = PlatformError::Unavailable("maintenance".to_string());
    /// assert!(err.is_retryable());
    ///
    /// let err = PlatformError::InvalidInput("bad base url".to_string());
    /// assert!(!err.is_retryable());
    /// ```
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::Timeout(_))
    }

    /// Create an unavailable error with the given message.
    #[must_use]
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Create an invalid input error with the given message.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a timeout error with the given message.
    #[must_use]
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    /// Create an internal error with the given message.
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
