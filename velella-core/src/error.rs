//! Structured error types for the Velella toolkit.

use thiserror::Error;

/// Unified error type for all Velella operations.
#[derive(Debug, Error)]
pub enum VelellaError {
    /// I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error (malformed input data)
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid input (bad arguments, out-of-range values)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A memory reservation failed; no partial state is returned
    #[error("allocation failure: {0}")]
    Allocation(String),

    /// Internal consistency failure (a defect, not a caller error)
    #[error("internal inconsistency: {0}")]
    Internal(String),
}

/// Convenience alias used throughout the Velella toolkit.
pub type Result<T> = std::result::Result<T, VelellaError>;
