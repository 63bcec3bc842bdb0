use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use finsavvy_common::currency::format_naira;
use finsavvy_common::types::ApprovedLoan;

/// Event name carried by every loan notification.
pub const LOAN_APPROVED_EVENT: &str = "loan_approved";

/// Human-readable notification for an approved loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanNotification {
    pub event: String,
    /// Short title (e.g., "Personal Loan Approved")
    pub title: String,
    pub body: String,
    pub sent_at: DateTime<Utc>,
    pub loan: ApprovedLoan,
}

impl LoanNotification {
    pub fn from_loan(loan: &ApprovedLoan) -> Self {
        let title = format!("{} Approved", loan.loan_type.label());
        let body = format!(
            "{} over {} at {}% p.a.: {} per month, secured by {} collateral (LTV {}%)",
            format_naira(loan.amount),
            loan.term_months,
            loan.interest_rate,
            format_naira(loan.monthly_payment),
            format_naira(loan.total_collateral),
            loan.loan_to_value,
        );

        Self {
            event: LOAN_APPROVED_EVENT.to_string(),
            title,
            body,
            sent_at: Utc::now(),
            loan: loan.clone(),
        }
    }
}
