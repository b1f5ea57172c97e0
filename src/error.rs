//! Error types for zone partitioning
//!
//! Geometry and partitioning operations never fail: they degrade to empty
//! results. Errors only come from configuration and the wire format.

use std::fmt;

/// Errors raised by configuration validation and (de)serialization
#[derive(Debug, Clone, PartialEq)]
pub enum PartitionError {
    /// Configuration validation failed
    InvalidConfig(String),
    /// Boundary or zone documents could not be parsed or written
    Serialization(String),
}

impl fmt::Display for PartitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartitionError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            PartitionError::Serialization(msg) => write!(f, "serialization failed: {}", msg),
        }
    }
}

impl std::error::Error for PartitionError {}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for PartitionError {
    fn from(err: serde_json::Error) -> Self {
        PartitionError::Serialization(err.to_string())
    }
}

/// Result type alias for partitioning operations
pub type Result<T> = std::result::Result<T, PartitionError>;
