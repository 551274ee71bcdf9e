//! Error types for the DebiCheck codec

use thiserror::Error;

/// Result type for DebiCheck operations
pub type Result<T> = std::result::Result<T, Error>;

/// DebiCheck errors
#[derive(Error, Debug)]
pub enum Error {
    /// Encode called with no records
    #[error("Empty batch: at least one {0} is required")]
    EmptyBatch(&'static str),

    /// Collection references an MRN of the wrong shape
    #[error("Invalid MRN {0:?}: expected 25 characters")]
    InvalidMrn(String),

    /// Field encoding failed (numeric overflow, bad amount)
    #[error("Encoding error: {0}")]
    Encoding(#[from] fixed_width::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error while reading configuration
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
