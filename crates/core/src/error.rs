//! Error types for radix-dsp core

use thiserror::Error;

/// Core error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid signal length {len}: length must be a power of 2")]
    InvalidLength { len: usize },

    #[error("Signal length mismatch: {left} != {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("Invalid filter parameters: {msg}")]
    InvalidParameter { msg: String },
}

impl CoreError {
    pub(crate) fn invalid_parameter(msg: impl Into<String>) -> Self {
        CoreError::InvalidParameter { msg: msg.into() }
    }
}

/// Result type for radix-dsp core operations
pub type Result<T> = std::result::Result<T, CoreError>;
