//! Webhook delivery with retry and exponential backoff.
//!
//! Each attempt POSTs the [`LoanNotification`] JSON to the configured URL.
//! Transport errors and non-2xx responses are retried up to `max_retries`
//! times, sleeping `base_backoff * 2^attempt` between attempts.

use std::time::Duration;

use thiserror::Error;

use finsavvy_common::config::AppConfig;
use finsavvy_common::error::AppError;
use finsavvy_common::types::ApprovedLoan;

use crate::payload::LoanNotification;

/// Upper bound on a single backoff sleep.
const MAX_BACKOFF: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum NotifierError {
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("webhook returned status {status}")]
    Status { status: u16 },

    #[error("delivery failed after {attempts} attempt(s): {last_error}")]
    Exhausted { attempts: u32, last_error: String },
}

impl From<NotifierError> for AppError {
    fn from(err: NotifierError) -> Self {
        AppError::Delivery(err.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct WebhookConfig {
    pub url: String,
    pub max_retries: u32,
    pub timeout: Duration,
    pub base_backoff: Duration,
}

impl WebhookConfig {
    /// Webhook settings from the app config, or `None` when no URL is set.
    pub fn from_app_config(config: &AppConfig) -> Option<Self> {
        config.loan_webhook_url.as_ref().map(|url| Self {
            url: url.clone(),
            max_retries: config.webhook_max_retries,
            timeout: Duration::from_millis(config.webhook_timeout_ms),
            base_backoff: Duration::from_millis(config.webhook_backoff_ms),
        })
    }
}

#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: reqwest::Client,
    config: WebhookConfig,
}

impl WebhookNotifier {
    pub fn new(config: WebhookConfig) -> Result<Self, NotifierError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Deliver an approved loan, retrying on failure.
    ///
    /// Returns the number of attempts used on success.
    pub async fn deliver(&self, loan: &ApprovedLoan) -> Result<u32, NotifierError> {
        let notification = LoanNotification::from_loan(loan);
        let max_attempts = self.config.max_retries + 1;
        let mut last_error = String::new();

        for attempt in 0..max_attempts {
            if attempt > 0 {
                let delay = backoff_delay(self.config.base_backoff, attempt - 1);
                tracing::warn!(
                    loan_id = %loan.id,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %last_error,
                    "Retrying loan webhook delivery"
                );
                tokio::time::sleep(delay).await;
            }

            match self.send_once(&notification).await {
                Ok(()) => {
                    tracing::info!(
                        loan_id = %loan.id,
                        attempts = attempt + 1,
                        url = %self.config.url,
                        "Loan webhook delivered"
                    );
                    return Ok(attempt + 1);
                }
                Err(e) => last_error = e.to_string(),
            }
        }

        tracing::error!(
            loan_id = %loan.id,
            attempts = max_attempts,
            error = %last_error,
            "Loan webhook delivery failed"
        );

        Err(NotifierError::Exhausted {
            attempts: max_attempts,
            last_error,
        })
    }

    async fn send_once(&self, notification: &LoanNotification) -> Result<(), NotifierError> {
        let response = self
            .client
            .post(&self.config.url)
            .json(notification)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(NotifierError::Status {
                status: status.as_u16(),
            })
        }
    }
}

/// Delay before retry number `retry` (0-based): `base * 2^retry`, capped.
pub fn backoff_delay(base: Duration, retry: u32) -> Duration {
    let factor = 2u32.checked_pow(retry).unwrap_or(u32::MAX);
    base.checked_mul(factor)
        .map(|delay| delay.min(MAX_BACKOFF))
        .unwrap_or(MAX_BACKOFF)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles() {
        let base = Duration::from_millis(500);
        assert_eq!(backoff_delay(base, 0), Duration::from_millis(500));
        assert_eq!(backoff_delay(base, 1), Duration::from_millis(1000));
        assert_eq!(backoff_delay(base, 2), Duration::from_millis(2000));
        assert_eq!(backoff_delay(base, 3), Duration::from_millis(4000));
    }

    #[test]
    fn test_backoff_capped() {
        let base = Duration::from_millis(500);
        assert_eq!(backoff_delay(base, 10), MAX_BACKOFF);
        assert_eq!(backoff_delay(base, 40), MAX_BACKOFF);
    }

    #[test]
    fn test_config_requires_url() {
        let mut config = AppConfig::from_lookup(|_| None).unwrap();
        assert!(WebhookConfig::from_app_config(&config).is_none());

        config.loan_webhook_url = Some("http://localhost:9000/hook".to_string());
        let webhook = WebhookConfig::from_app_config(&config).unwrap();
        assert_eq!(webhook.url, "http://localhost:9000/hook");
        assert_eq!(webhook.max_retries, 3);
        assert_eq!(webhook.timeout, Duration::from_millis(5000));
        assert_eq!(webhook.base_backoff, Duration::from_millis(500));
    }
}
