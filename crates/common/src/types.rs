use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::currency::format_naira;

/// Loan products offered against locked savings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanType {
    Personal,
    Business,
    Emergency,
    Education,
}

impl LoanType {
    pub const ALL: [LoanType; 4] = [
        LoanType::Personal,
        LoanType::Business,
        LoanType::Emergency,
        LoanType::Education,
    ];

    /// Display label used in product listings and notifications.
    pub fn label(&self) -> &'static str {
        match self {
            LoanType::Personal => "Personal Loan",
            LoanType::Business => "Business Loan",
            LoanType::Emergency => "Emergency Loan",
            LoanType::Education => "Education Loan",
        }
    }
}

impl std::fmt::Display for LoanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoanType::Personal => write!(f, "personal"),
            LoanType::Business => write!(f, "business"),
            LoanType::Emergency => write!(f, "emergency"),
            LoanType::Education => write!(f, "education"),
        }
    }
}

/// Repayment terms a borrower may pick. Serialized as the month count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum TermMonths {
    Six,
    #[default]
    Twelve,
    Eighteen,
    TwentyFour,
    ThirtySix,
}

impl TermMonths {
    pub const ALL: [TermMonths; 5] = [
        TermMonths::Six,
        TermMonths::Twelve,
        TermMonths::Eighteen,
        TermMonths::TwentyFour,
        TermMonths::ThirtySix,
    ];

    pub fn months(&self) -> u32 {
        match self {
            TermMonths::Six => 6,
            TermMonths::Twelve => 12,
            TermMonths::Eighteen => 18,
            TermMonths::TwentyFour => 24,
            TermMonths::ThirtySix => 36,
        }
    }
}

impl TryFrom<u32> for TermMonths {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            6 => Ok(TermMonths::Six),
            12 => Ok(TermMonths::Twelve),
            18 => Ok(TermMonths::Eighteen),
            24 => Ok(TermMonths::TwentyFour),
            36 => Ok(TermMonths::ThirtySix),
            other => Err(format!(
                "unsupported loan term: {} months (expected 6, 12, 18, 24 or 36)",
                other
            )),
        }
    }
}

impl From<TermMonths> for u32 {
    fn from(term: TermMonths) -> Self {
        term.months()
    }
}

impl std::fmt::Display for TermMonths {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} months", self.months())
    }
}

/// Form state for a loan request. Held only while the borrower edits it.
///
/// `loan_type` and `amount` are optional so that an incomplete form can still
/// be quoted and validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanApplication {
    #[serde(default, rename = "type")]
    pub loan_type: Option<LoanType>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub term_months: TermMonths,
    /// Extra collateral pledged from the available balance.
    #[serde(default)]
    pub additional_collateral: Decimal,
}

/// Balances owned by the surrounding account, passed in per call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub available_balance: Decimal,
    pub locked_savings: Decimal,
}

/// Collateral position derived from locked savings plus the pledge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollateralState {
    pub locked_savings: Decimal,
    pub additional_collateral: Decimal,
    pub total_collateral: Decimal,
    pub max_loan_amount: Decimal,
}

/// Risk tier of a loan-to-value ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn display_color(&self) -> &'static str {
        match self {
            RiskLevel::Low => "green",
            RiskLevel::Medium => "yellow",
            RiskLevel::High => "red",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub display_color: String,
    /// LTV above the ceiling: submission is blocked regardless of tier.
    pub exceeds_ceiling: bool,
}

/// Why a loan application cannot be submitted.
///
/// These are user-correctable input errors, reported as values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum RejectionReason {
    MissingLoanType,
    InvalidAmount,
    ExceedsCollateralLimit { max_loan_amount: Decimal },
    CollateralExceedsBalance { available_balance: Decimal },
    NegativeCollateral,
}

impl RejectionReason {
    pub fn message(&self) -> String {
        match self {
            RejectionReason::MissingLoanType => "Please select a loan type".to_string(),
            RejectionReason::InvalidAmount => "Please enter a valid loan amount".to_string(),
            RejectionReason::ExceedsCollateralLimit { max_loan_amount } => format!(
                "Loan amount exceeds 80% of your collateral (maximum {})",
                format_naira(*max_loan_amount)
            ),
            RejectionReason::CollateralExceedsBalance { available_balance } => format!(
                "Additional collateral exceeds your available balance of {}",
                format_naira(*available_balance)
            ),
            RejectionReason::NegativeCollateral => {
                "Additional collateral cannot be negative".to_string()
            }
        }
    }
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Everything derived from the current form state, recomputed on every change.
///
/// Monetary fields are rounded for presentation; gating decisions are made on
/// unrounded values before the quote is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanQuote {
    #[serde(rename = "type")]
    pub loan_type: Option<LoanType>,
    pub interest_rate: Option<Decimal>,
    pub term_months: TermMonths,
    pub amount: Option<Decimal>,
    pub collateral: CollateralState,
    pub loan_to_value: Option<Decimal>,
    pub risk: Option<RiskAssessment>,
    pub monthly_payment: Option<Decimal>,
    pub total_repayment: Option<Decimal>,
    pub total_interest: Option<Decimal>,
    pub can_submit: bool,
    pub rejections: Vec<RejectionReason>,
}

/// Finalized loan handed to the approval callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovedLoan {
    pub id: Uuid,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub loan_type: LoanType,
    pub term_months: TermMonths,
    /// Annual rate in percent.
    pub interest_rate: Decimal,
    pub monthly_payment: Decimal,
    /// The additional pledge only; locked savings are included in `total_collateral`.
    pub collateral_amount: Decimal,
    pub total_collateral: Decimal,
    pub loan_to_value: Decimal,
    pub approved_at: DateTime<Utc>,
}

/// One row of an amortization schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    pub month: u32,
    pub payment: Decimal,
    pub interest: Decimal,
    pub principal: Decimal,
    pub remaining_balance: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_term_months_from_u32() {
        assert_eq!(TermMonths::try_from(18).unwrap(), TermMonths::Eighteen);
        assert!(TermMonths::try_from(7).is_err());
        assert_eq!(u32::from(TermMonths::ThirtySix), 36);
    }

    #[test]
    fn test_term_months_serializes_as_integer() {
        let json = serde_json::to_value(TermMonths::TwentyFour).unwrap();
        assert_eq!(json, serde_json::json!(24));

        let parsed: TermMonths = serde_json::from_value(serde_json::json!(6)).unwrap();
        assert_eq!(parsed, TermMonths::Six);

        let bad: Result<TermMonths, _> = serde_json::from_value(serde_json::json!(9));
        assert!(bad.is_err());
    }

    #[test]
    fn test_application_defaults() {
        let app: LoanApplication = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(app.loan_type, None);
        assert_eq!(app.amount, None);
        assert_eq!(app.term_months, TermMonths::Twelve);
        assert_eq!(app.additional_collateral, Decimal::ZERO);
    }

    #[test]
    fn test_application_uses_type_key() {
        let app: LoanApplication = serde_json::from_value(serde_json::json!({
            "type": "education",
            "amount": 25000,
            "term_months": 36
        }))
        .unwrap();
        assert_eq!(app.loan_type, Some(LoanType::Education));
        assert_eq!(app.amount, Some(dec!(25000)));
        assert_eq!(app.term_months, TermMonths::ThirtySix);
    }

    #[test]
    fn test_rejection_reason_tagged() {
        let reason = RejectionReason::ExceedsCollateralLimit {
            max_loan_amount: dec!(40000),
        };
        let json = serde_json::to_value(&reason).unwrap();
        assert_eq!(json["code"], "exceeds_collateral_limit");
        assert!(reason.message().contains("₦40,000.00"));
    }

    #[test]
    fn test_risk_level_colors() {
        assert_eq!(RiskLevel::Low.display_color(), "green");
        assert_eq!(RiskLevel::Medium.display_color(), "yellow");
        assert_eq!(RiskLevel::High.display_color(), "red");
    }
}
