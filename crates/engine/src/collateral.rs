//! Collateral evaluator.
//!
//! Total collateral is locked savings plus the additional pledge. The maximum
//! loan is the LTV ceiling applied to that total, recomputed on every call so it
//! can never drift from its inputs.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use finsavvy_common::policy::LoanPolicy;
use finsavvy_common::types::CollateralState;

/// Combine locked savings and the additional pledge into a collateral position.
///
/// Callers are responsible for checking the pledge against the available
/// balance; see [`crate::validation`].
pub fn evaluate_collateral(
    locked_savings: Decimal,
    additional_collateral: Decimal,
    policy: &LoanPolicy,
) -> CollateralState {
    let total_collateral = locked_savings.saturating_add(additional_collateral);
    let max_loan_amount = total_collateral.saturating_mul(policy.max_ltv_ratio());

    CollateralState {
        locked_savings,
        additional_collateral,
        total_collateral,
        max_loan_amount,
    }
}

/// Loan-to-value in percent.
///
/// Undefined (`None`) when there is no collateral, or when the ratio is too
/// large to represent.
pub fn loan_to_value(amount: Decimal, total_collateral: Decimal) -> Option<Decimal> {
    if total_collateral <= Decimal::ZERO {
        return None;
    }
    amount
        .checked_div(total_collateral)
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_and_max_loan() {
        let state = evaluate_collateral(dec!(50000), dec!(10000), &LoanPolicy::default());
        assert_eq!(state.total_collateral, dec!(60000));
        assert_eq!(state.max_loan_amount, dec!(48000));
        assert_eq!(state.locked_savings, dec!(50000));
        assert_eq!(state.additional_collateral, dec!(10000));
    }

    #[test]
    fn test_no_collateral() {
        let state = evaluate_collateral(Decimal::ZERO, Decimal::ZERO, &LoanPolicy::default());
        assert_eq!(state.total_collateral, Decimal::ZERO);
        assert_eq!(state.max_loan_amount, Decimal::ZERO);
    }

    #[test]
    fn test_loan_to_value() {
        assert_eq!(loan_to_value(dec!(40000), dec!(50000)), Some(dec!(80)));
        assert_eq!(loan_to_value(dec!(25000), dec!(50000)), Some(dec!(50)));
    }

    #[test]
    fn test_loan_to_value_undefined_without_collateral() {
        assert_eq!(loan_to_value(dec!(1000), Decimal::ZERO), None);
        assert_eq!(loan_to_value(dec!(1000), dec!(-5)), None);
    }

    #[test]
    fn test_more_collateral_never_raises_ltv() {
        let amount = dec!(30000);
        let mut previous = loan_to_value(amount, dec!(40000)).unwrap();
        for extra in [dec!(1), dec!(500), dec!(2500), dec!(10000), dec!(250000)] {
            let state = evaluate_collateral(dec!(40000), extra, &LoanPolicy::default());
            let ltv = loan_to_value(amount, state.total_collateral).unwrap();
            assert!(ltv <= previous);
            previous = ltv;
        }
    }
}
