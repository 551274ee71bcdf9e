//! Error types for the AVS client

use thiserror::Error;

/// Result type for AVS operations
pub type Result<T> = std::result::Result<T, Error>;

/// AVS errors
#[derive(Error, Debug)]
pub enum Error {
    /// No verifications supplied
    #[error("Empty batch: at least one account verification is required")]
    EmptyBatch,

    /// Response body is not a verification response
    #[error("Malformed AVS response: {0}")]
    MalformedResponse(String),

    /// Bank returned a SOAP fault
    #[error("SOAP fault {code}: {message}")]
    SoapFault {
        /// Fault code
        code: String,
        /// Fault string
        message: String,
    },

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

    /// XML error
    #[error("XML error: {0}")]
    Xml(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether the error happened on the way to or from the bank, so the
    /// simulated result may stand in for the live one
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
