//! Error types for the EFT codec

use thiserror::Error;

/// Result type for EFT codec operations
pub type Result<T> = std::result::Result<T, Error>;

/// EFT codec errors
#[derive(Error, Debug)]
pub enum Error {
    /// Encode called with no debit orders
    #[error("Empty batch: at least one debit order is required")]
    EmptyBatch,

    /// No `01` record at the top of a response file
    #[error("Response file has no header record")]
    MissingHeader,

    /// Header shorter than its required span
    #[error("Invalid header length: {actual} characters, {required} required")]
    InvalidHeaderLength {
        /// Required length
        required: usize,
        /// Actual length
        actual: usize,
    },

    /// Transaction record shorter than its required span
    #[error("Invalid transaction length on line {line}: {actual} characters, {required} required")]
    InvalidTransactionLength {
        /// 1-based line number
        line: usize,
        /// Required length
        required: usize,
        /// Actual length
        actual: usize,
    },

    /// Trailer shorter than its required span
    #[error("Invalid trailer length: {actual} characters, {required} required")]
    InvalidTrailerLength {
        /// Required length
        required: usize,
        /// Actual length
        actual: usize,
    },

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
