//! Loan policy constants.
//!
//! The ceiling, rates and risk bands are fixed product rules. They live in one
//! struct so every calculation reads them from the same place.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::types::{LoanType, TermMonths};

/// Maximum loan-to-value ratio, in percent of total collateral.
pub const MAX_LOAN_TO_VALUE_PCT: Decimal = dec!(80);

/// Upper bound (inclusive) of the low-risk LTV band.
pub const LOW_RISK_MAX_LTV_PCT: Decimal = dec!(50);

/// Upper bound (inclusive) of the medium-risk LTV band.
pub const MEDIUM_RISK_MAX_LTV_PCT: Decimal = dec!(70);

pub const PERSONAL_RATE_PCT: Decimal = dec!(15);
pub const BUSINESS_RATE_PCT: Decimal = dec!(12);
pub const EMERGENCY_RATE_PCT: Decimal = dec!(18);
pub const EDUCATION_RATE_PCT: Decimal = dec!(10);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoanPolicy {
    pub max_loan_to_value_pct: Decimal,
    pub low_risk_max_ltv_pct: Decimal,
    pub medium_risk_max_ltv_pct: Decimal,
    pub personal_rate_pct: Decimal,
    pub business_rate_pct: Decimal,
    pub emergency_rate_pct: Decimal,
    pub education_rate_pct: Decimal,
}

impl LoanPolicy {
    /// Annual interest rate (percent) for a loan type.
    pub fn interest_rate(&self, loan_type: LoanType) -> Decimal {
        match loan_type {
            LoanType::Personal => self.personal_rate_pct,
            LoanType::Business => self.business_rate_pct,
            LoanType::Emergency => self.emergency_rate_pct,
            LoanType::Education => self.education_rate_pct,
        }
    }

    /// Fraction of collateral that may be borrowed (0.8 for an 80% ceiling).
    pub fn max_ltv_ratio(&self) -> Decimal {
        self.max_loan_to_value_pct / dec!(100)
    }

    pub fn allowed_terms(&self) -> &'static [TermMonths] {
        &TermMonths::ALL
    }
}

impl Default for LoanPolicy {
    fn default() -> Self {
        Self {
            max_loan_to_value_pct: MAX_LOAN_TO_VALUE_PCT,
            low_risk_max_ltv_pct: LOW_RISK_MAX_LTV_PCT,
            medium_risk_max_ltv_pct: MEDIUM_RISK_MAX_LTV_PCT,
            personal_rate_pct: PERSONAL_RATE_PCT,
            business_rate_pct: BUSINESS_RATE_PCT,
            emergency_rate_pct: EMERGENCY_RATE_PCT,
            education_rate_pct: EDUCATION_RATE_PCT,
        }
    }
}
