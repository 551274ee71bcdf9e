//! AVS client
//!
//! One live attempt per batch. When the bank cannot be reached (connect
//! failure, timeout, non-2xx status) the simulated result is returned as
//! [`Outcome::Degraded`] instead of an error: callers keep working while
//! the bank is down. A 2xx body that is not a verification response is
//! still an error.

use crate::mock::verify_mock;
use crate::request::build_request;
use crate::response::parse_response;
use crate::transport::{AvsTransport, HttpTransport};
use crate::{config::AvsConfig, metrics, types::*, Error, Result};
use tracing::{debug, info, warn};

/// Account verification client
pub struct AvsClient {
    config: AvsConfig,
    transport: Box<dyn AvsTransport>,
}

impl AvsClient {
    /// Create new client with an HTTP transport
    pub fn new(config: AvsConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::new(config.timeout_seconds)?;
        Ok(Self::with_transport(config, Box::new(transport)))
    }

    /// Create new client over a custom transport
    pub fn with_transport(config: AvsConfig, transport: Box<dyn AvsTransport>) -> Self {
        Self { config, transport }
    }

    /// Configuration in use
    pub fn config(&self) -> &AvsConfig {
        &self.config
    }

    /// Verify a batch of accounts. `mock_mode` (or the configured
    /// `mock_mode`) skips the bank entirely.
    pub async fn verify(
        &self,
        verifications: &[AccountVerification],
        mock_mode: bool,
    ) -> Result<Outcome<VerificationResult>> {
        if verifications.is_empty() {
            return Err(Error::EmptyBatch);
        }

        let environment = self.config.environment.to_string();
        let outcome = if mock_mode || self.config.mock_mode {
            debug!("AVS mock mode: simulating {} verifications", verifications.len());
            Outcome::Simulated(verify_mock(verifications)?)
        } else {
            self.verify_live(verifications, &environment).await?
        };

        metrics::AVS_REQUESTS_TOTAL
            .with_label_values(&[environment.as_str(), outcome.label()])
            .inc();
        for item in &outcome.value().items {
            metrics::AVS_ACCOUNTS_TOTAL
                .with_label_values(&[environment.as_str(), item.result_code.code()])
                .inc();
        }

        Ok(outcome)
    }

    async fn verify_live(
        &self,
        verifications: &[AccountVerification],
        environment: &str,
    ) -> Result<Outcome<VerificationResult>> {
        let envelope = build_request(&self.config, verifications)?;
        let endpoint = self.config.endpoint();
        debug!("AVS {} endpoint {} via {}", environment, endpoint, self.transport.name());

        let timer = metrics::AVS_REQUEST_DURATION
            .with_label_values(&[environment])
            .start_timer();
        let sent = self.transport.send(endpoint, envelope).await;
        timer.observe_duration();

        match sent {
            Ok(body) => {
                let result = parse_response(&body)?;
                info!(
                    "AVS verified {} accounts: {}",
                    result.items.len(),
                    result.result_code.code()
                );
                Ok(Outcome::Live(result))
            }
            Err(e) if e.is_transport() => {
                warn!("AVS call to {} failed, using simulated result: {}", endpoint, e);
                Ok(Outcome::Degraded {
                    value: verify_mock(verifications)?,
                    cause: e.to_string(),
                })
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FailingTransport;

    #[async_trait]
    impl AvsTransport for FailingTransport {
        async fn send(&self, _endpoint: &str, _envelope: String) -> Result<String> {
            Err(Error::Timeout { seconds: 50 })
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    struct GarbageTransport;

    #[async_trait]
    impl AvsTransport for GarbageTransport {
        async fn send(&self, _endpoint: &str, _envelope: String) -> Result<String> {
            Ok("<html>maintenance</html>".to_string())
        }

        fn name(&self) -> &str {
            "garbage"
        }
    }

    fn live_config() -> AvsConfig {
        AvsConfig {
            mock_mode: false,
            ..Default::default()
        }
    }

    fn batch() -> Vec<AccountVerification> {
        vec![AccountVerification {
            bank_identifier: "absa".to_string(),
            account_number: "4050000001".to_string(),
            account_type: None,
            sort_code: None,
            holder: AccountHolderInformation::with_sa_id("8501015800088"),
        }]
    }

    #[tokio::test]
    async fn test_timeout_degrades_to_mock() {
        let client = AvsClient::with_transport(live_config(), Box::new(FailingTransport));
        let outcome = client.verify(&batch(), false).await.unwrap();
        match outcome {
            Outcome::Degraded { value, cause } => {
                assert_eq!(value, verify_mock(&batch()).unwrap());
                assert!(cause.contains("50s"));
            }
            other => panic!("expected degraded outcome, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_propagates() {
        let client = AvsClient::with_transport(live_config(), Box::new(GarbageTransport));
        assert!(matches!(
            client.verify(&batch(), false).await,
            Err(Error::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_mock_mode_never_calls_transport() {
        let client = AvsClient::with_transport(live_config(), Box::new(FailingTransport));
        let outcome = client.verify(&batch(), true).await.unwrap();
        assert!(matches!(outcome, Outcome::Simulated(_)));
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let client = AvsClient::with_transport(AvsConfig::default(), Box::new(FailingTransport));
        assert!(matches!(client.verify(&[], true).await, Err(Error::EmptyBatch)));
    }
}
