//! AVS client configuration
//!
//! Loaded through the `config` crate: an optional file followed by `AVS_*`
//! environment variables (`AVS_ENVIRONMENT=production`, `AVS_MOCK_MODE=true`,
//! `AVS_TIMEOUT_SECONDS=50`, ...).

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Bank SLA (45s) plus a 5s buffer
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 50;

/// Which bank environment live calls go to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Bank QA environment
    Qa,
    /// Bank production environment
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Qa => write!(f, "qa"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// AVS client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AvsConfig {
    /// Environment selector
    pub environment: Environment,

    /// QA SOAP endpoint
    pub qa_endpoint: String,

    /// Production SOAP endpoint
    pub production_endpoint: String,

    /// Profile number issued by the bank
    pub profile_number: String,

    /// Account verification charges are debited from
    pub charge_account: String,

    /// Channel id in the enterprise context header
    pub channel_id: String,

    /// Caller IP address in the enterprise context header
    pub machine_ip: String,

    /// Caller DNS name in the enterprise context header
    pub machine_dns_name: String,

    /// Request timeout
    pub timeout_seconds: u64,

    /// Never call the bank; answer from the simulator
    pub mock_mode: bool,
}

impl Default for AvsConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Qa,
            qa_endpoint: "https://qa.api.nedbank.co.za/accountverification/v4".to_string(),
            production_endpoint: "https://api.nedbank.co.za/accountverification/v4".to_string(),
            profile_number: "0000000000".to_string(),
            charge_account: "0000000000".to_string(),
            channel_id: "HOST2HOST".to_string(),
            machine_ip: "127.0.0.1".to_string(),
            machine_dns_name: "localhost".to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            mock_mode: true,
        }
    }
}

impl AvsConfig {
    /// Load from an optional file, then `AVS_*` environment variables
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        let config: AvsConfig = builder
            .add_source(
                config::Environment::with_prefix("AVS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Endpoint for the selected environment
    pub fn endpoint(&self) -> &str {
        match self.environment {
            Environment::Qa => &self.qa_endpoint,
            Environment::Production => &self.production_endpoint,
        }
    }

    /// Reject configurations that can never reach the bank
    pub fn validate(&self) -> Result<()> {
        if self.timeout_seconds == 0 {
            return Err(Error::Config("timeout_seconds must be positive".to_string()));
        }
        if !self.mock_mode && self.endpoint().is_empty() {
            return Err(Error::Config(format!("no endpoint configured for {}", self.environment)));
        }
        Ok(())
    }
}
