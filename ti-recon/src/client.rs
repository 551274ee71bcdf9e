//! Statement client
//!
//! One GET per fetch. The body is parsed as XML when it starts with `<`
//! and as CSV otherwise. When the bank cannot be reached the synthetic
//! feed is returned as [`Outcome::Degraded`].

use crate::fti::{parse_fti_csv, parse_fti_xml};
use crate::mock::generate_mock_fti;
use crate::{config::TiConfig, metrics, types::*, Error, Result};
use chrono::NaiveDate;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

/// FTI / PTI statement client
pub struct TiClient {
    config: TiConfig,
    client: Client,
}

impl TiClient {
    /// Create new statement client
    pub fn new(config: TiConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Transport(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Configuration in use
    pub fn config(&self) -> &TiConfig {
        &self.config
    }

    /// Fetch the statement for `date`
    pub async fn fetch_statement(
        &self,
        kind: StatementKind,
        date: NaiveDate,
    ) -> Result<Outcome<Vec<BankTransaction>>> {
        let label = kind.to_string();
        let outcome = if self.config.mock_mode {
            debug!("TI mock mode: synthetic {} feed for {}", kind, date);
            Outcome::Simulated(generate_mock_fti(self.config.mock_transactions, date))
        } else {
            let timer = metrics::TI_FETCH_DURATION
                .with_label_values(&[label.as_str()])
                .start_timer();
            let fetched = self.fetch_live(kind, date).await;
            timer.observe_duration();

            match fetched {
                Ok(body) => {
                    let transactions = parse_statement(&body)?;
                    info!("Fetched {} {} transactions for {}", transactions.len(), kind, date);
                    Outcome::Live(transactions)
                }
                Err(e) if e.is_transport() => {
                    warn!("{} fetch for {} failed, using synthetic feed: {}", kind, date, e);
                    Outcome::Degraded {
                        value: generate_mock_fti(self.config.mock_transactions, date),
                        cause: e.to_string(),
                    }
                }
                Err(e) => return Err(e),
            }
        };

        metrics::TI_FETCH_TOTAL
            .with_label_values(&[label.as_str(), outcome.label()])
            .inc();
        metrics::TI_TRANSACTIONS_TOTAL
            .with_label_values(&[label.as_str(), outcome.label()])
            .inc_by(outcome.value().len() as f64);

        Ok(outcome)
    }

    async fn fetch_live(&self, kind: StatementKind, date: NaiveDate) -> Result<String> {
        let endpoint = match kind {
            StatementKind::Fti => &self.config.fti_endpoint,
            StatementKind::Pti => &self.config.pti_endpoint,
        };
        debug!("Fetching {} statement from {}", kind, endpoint);

        let mut request = self
            .client
            .get(endpoint)
            .query(&[("date", date.format("%Y-%m-%d").to_string())]);
        if let Some(api_key) = &self.config.api_key {
            request = request.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout {
                    seconds: self.config.timeout_seconds,
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
}

/// Parse a statement body, XML or CSV
pub fn parse_statement(body: &str) -> Result<Vec<BankTransaction>> {
    let trimmed = body.trim_start_matches('\u{feff}').trim_start();
    if trimmed.starts_with('<') {
        parse_fti_xml(trimmed)
    } else {
        parse_fti_csv(trimmed)
    }
}
