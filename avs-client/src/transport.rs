//! Transport to the bank's SOAP endpoint

use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Sends a SOAP envelope and returns the response body
#[async_trait]
pub trait AvsTransport: Send + Sync {
    /// Post `envelope` to `endpoint`
    async fn send(&self, endpoint: &str, envelope: String) -> Result<String>;

    /// Transport name
    fn name(&self) -> &str;
}

/// HTTP transport
pub struct HttpTransport {
    client: Client,
    timeout_seconds: u64,
}

impl HttpTransport {
    /// Create new HTTP transport with a request timeout
    pub fn new(timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| Error::Transport(e.to_string()))?;

        Ok(Self {
            client,
            timeout_seconds,
        })
    }
}

#[async_trait]
impl AvsTransport for HttpTransport {
    async fn send(&self, endpoint: &str, envelope: String) -> Result<String> {
        debug!("Posting AVS request to {}", endpoint);

        let response = self
            .client
            .post(endpoint)
            .header("SOAPAction", "verify")
            .header("Content-Type", "text/xml; charset=utf-8")
            .body(envelope)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Timeout {
                        seconds: self.timeout_seconds,
                    }
                } else {
                    Error::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(Error::BankApi {
                status_code: status.as_u16(),
                message: body,
            })
        }
    }

    fn name(&self) -> &str {
        "HTTP"
    }
}
