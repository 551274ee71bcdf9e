//! Error types for TI parsing and reconciliation

use thiserror::Error;

/// Result type for TI operations
pub type Result<T> = std::result::Result<T, Error>;

/// TI errors
#[derive(Error, Debug)]
pub enum Error {
    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Statement does not have the expected structure
    #[error("Malformed statement: {0}")]
    MalformedResponse(String),

    /// XML error
    #[error("XML error: {0}")]
    Xml(String),

    /// Connection or protocol failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Timeout
    #[error("Timeout after {seconds}s")]
    Timeout {
        /// Timeout duration
        seconds: u64,
    },

    /// Bank API error
    #[error("Bank API error {status_code}: {message}")]
    BankApi {
        /// HTTP status code
        status_code: u16,
        /// Response body
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether the error happened on the way to or from the bank
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Transport(_) | Error::Timeout { .. } | Error::BankApi { .. }
        )
    }
}

impl From<config::ConfigError> for Error {
    fn from(e: config::ConfigError) -> Self {
        Error::Config(e.to_string())
    }
}
