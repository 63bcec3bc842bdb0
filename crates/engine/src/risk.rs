//! Risk classifier. Buckets a loan-to-value ratio into display tiers.
//!
//! Bands are contiguous and inclusive at the top: `<= 50` is low,
//! `<= 70` is medium, anything above is high. An LTV above the ceiling is
//! flagged separately because it blocks submission.

use rust_decimal::Decimal;

use finsavvy_common::policy::LoanPolicy;
use finsavvy_common::types::{RiskAssessment, RiskLevel};

pub fn classify_risk(loan_to_value: Decimal, policy: &LoanPolicy) -> RiskAssessment {
    let level = if loan_to_value <= policy.low_risk_max_ltv_pct {
        RiskLevel::Low
    } else if loan_to_value <= policy.medium_risk_max_ltv_pct {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    };

    RiskAssessment {
        level,
        display_color: level.display_color().to_string(),
        exceeds_ceiling: loan_to_value > policy.max_loan_to_value_pct,
    }
}
