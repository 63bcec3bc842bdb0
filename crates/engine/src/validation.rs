//! Submission gating.
//!
//! An application may be submitted only when a loan type is selected, the
//! amount is positive, the pledge fits the available balance and the amount
//! stays within the collateral ceiling. Every failing rule is reported so the
//! borrower can fix them all at once.

use rust_decimal::Decimal;

use finsavvy_common::policy::LoanPolicy;
use finsavvy_common::types::{AccountSnapshot, LoanApplication, RejectionReason};

use crate::collateral::evaluate_collateral;

pub fn validate(
    application: &LoanApplication,
    account: &AccountSnapshot,
    policy: &LoanPolicy,
) -> Vec<RejectionReason> {
    let mut reasons = Vec::new();

    if application.loan_type.is_none() {
        reasons.push(RejectionReason::MissingLoanType);
    }

    let amount = application.amount.filter(|a| *a > Decimal::ZERO);
    if amount.is_none() {
        reasons.push(RejectionReason::InvalidAmount);
    }

    if application.additional_collateral < Decimal::ZERO {
        reasons.push(RejectionReason::NegativeCollateral);
    } else if application.additional_collateral > account.available_balance {
        reasons.push(RejectionReason::CollateralExceedsBalance {
            available_balance: account.available_balance,
        });
    }

    if let Some(amount) = amount {
        // Equivalent to LTV > ceiling, and still defined when there is no collateral.
        let collateral = evaluate_collateral(
            account.locked_savings,
            application.additional_collateral,
            policy,
        );
        if amount > collateral.max_loan_amount {
            reasons.push(RejectionReason::ExceedsCollateralLimit {
                max_loan_amount: collateral.max_loan_amount,
            });
        }
    }

    reasons
}

pub fn can_submit(
    application: &LoanApplication,
    account: &AccountSnapshot,
    policy: &LoanPolicy,
) -> bool {
    validate(application, account, policy).is_empty()
}
