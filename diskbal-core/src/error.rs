//! Error types for diskbal
//!
//! Provides a unified error type for all disk balancer operations.
//! Every variant is fatal: the plan flow never retries internally.

use thiserror::Error;

/// Result type alias for diskbal operations
pub type Result<T> = std::result::Result<T, DiskBalError>;

/// Unified error type for diskbal
#[derive(Error, Debug)]
pub enum DiskBalError {
    // ===== Input Errors =====
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unable to find the specified node: {0}")]
    NodeNotFound(String),

    // ===== RPC Errors =====
    #[error("Cannot reach node at {address}: {message}")]
    Connectivity { address: String, message: String },

    #[error("Malformed payload: {0}")]
    Parse(String),

    // ===== I/O Errors =====
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // ===== Serialization Errors =====
    #[error("Serialization error: {0}")]
    Serialization(String),

    // ===== Configuration Errors =====
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<serde_json::Error> for DiskBalError {
    fn from(err: serde_json::Error) -> Self {
        DiskBalError::Serialization(err.to_string())
    }
}
