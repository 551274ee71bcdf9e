//! TI client configuration
//!
//! Loaded through the `config` crate: an optional file followed by `TI_*`
//! environment variables.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// TI client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TiConfig {
    /// Final transactional information endpoint
    pub fti_endpoint: String,

    /// Provisional transactional information endpoint
    pub pti_endpoint: String,

    /// Bearer token for the statement endpoints
    pub api_key: Option<String>,

    /// Request timeout
    pub timeout_seconds: u64,

    /// Never call the bank; answer from the synthetic feed
    pub mock_mode: bool,

    /// Transactions in the synthetic feed
    pub mock_transactions: usize,
}

impl Default for TiConfig {
    fn default() -> Self {
        Self {
            fti_endpoint: "https://qa.api.nedbank.co.za/ti/v1/fti".to_string(),
            pti_endpoint: "https://qa.api.nedbank.co.za/ti/v1/pti".to_string(),
            api_key: None,
            timeout_seconds: 30,
            mock_mode: true,
            mock_transactions: 25,
        }
    }
}

impl TiConfig {
    /// Load from an optional file, then `TI_*` environment variables
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        let config: TiConfig = builder
            .add_source(
                config::Environment::with_prefix("TI")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that can never fetch a statement
    pub fn validate(&self) -> Result<()> {
        if self.timeout_seconds == 0 {
            return Err(Error::Config("timeout_seconds must be positive".to_string()));
        }
        if !self.mock_mode && (self.fti_endpoint.is_empty() || self.pti_endpoint.is_empty()) {
            return Err(Error::Config("FTI and PTI endpoints are required".to_string()));
        }
        Ok(())
    }
}
