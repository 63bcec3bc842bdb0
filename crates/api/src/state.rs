//! Shared application state for the Axum API server.

use finsavvy_common::config::AppConfig;
use finsavvy_engine::LoanCalculator;
use finsavvy_notifier::WebhookNotifier;

use crate::book::LoanBook;

/// Application state shared across all route handlers via Axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub calculator: LoanCalculator,
    pub loans: LoanBook,
    /// Present only when a loan webhook is configured.
    pub notifier: Option<WebhookNotifier>,
}

impl AppState {
    pub fn new(config: AppConfig, notifier: Option<WebhookNotifier>) -> Self {
        Self {
            config,
            calculator: LoanCalculator::default(),
            loans: LoanBook::new(),
            notifier,
        }
    }
}
