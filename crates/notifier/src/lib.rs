//! Outbound delivery of approved loans.
//!
//! Approval is final before anything here runs: a failed delivery is logged
//! and reported to the caller but never reverses the loan.

pub mod payload;
pub mod webhook;

pub use payload::LoanNotification;
pub use webhook::{NotifierError, WebhookConfig, WebhookNotifier};
