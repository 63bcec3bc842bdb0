//! Loan calculator. Ties collateral, amortization and risk together.
//!
//! The calculator holds no state between calls. Callers pass the current form
//! and a fresh account snapshot on every change and get a complete
//! [`LoanQuote`] back; nothing derived is cached.
//!
//! Submission re-validates, builds the [`ApprovedLoan`] and hands it to an
//! [`ApprovalSink`] exactly once. Persistence, balance changes and
//! notifications belong to the sink's owner.

use chrono::Utc;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use finsavvy_common::currency::{round_currency, round_percent};
use finsavvy_common::error::AppError;
use finsavvy_common::policy::LoanPolicy;
use finsavvy_common::types::{
    AccountSnapshot, ApprovedLoan, CollateralState, LoanApplication, LoanQuote, RejectionReason,
    RiskAssessment,
};

use crate::amortization::{
    CalculationError, compute_monthly_payment, total_interest, total_repayment,
};
use crate::collateral::{evaluate_collateral, loan_to_value};
use crate::risk::classify_risk;
use crate::validation::validate;

/// Receives approved loans.
///
/// Any `FnMut(&ApprovedLoan)` closure is a sink.
pub trait ApprovalSink {
    fn on_loan_approved(&mut self, loan: &ApprovedLoan);
}

impl<F> ApprovalSink for F
where
    F: FnMut(&ApprovedLoan),
{
    fn on_loan_approved(&mut self, loan: &ApprovedLoan) {
        self(loan)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error("loan application rejected ({} reason(s))", .0.len())]
    Rejected(Vec<RejectionReason>),

    #[error(transparent)]
    Calculation(#[from] CalculationError),
}

impl From<SubmitError> for AppError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Rejected(reasons) => AppError::LoanRejected(reasons),
            SubmitError::Calculation(e) => e.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LoanCalculator {
    policy: LoanPolicy,
}

impl LoanCalculator {
    pub fn new(policy: LoanPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &LoanPolicy {
        &self.policy
    }

    pub fn evaluate_collateral(
        &self,
        locked_savings: Decimal,
        additional_collateral: Decimal,
    ) -> CollateralState {
        evaluate_collateral(locked_savings, additional_collateral, &self.policy)
    }

    pub fn classify_risk(&self, loan_to_value: Decimal) -> RiskAssessment {
        classify_risk(loan_to_value, &self.policy)
    }

    /// Recompute every derived value for the current form state.
    pub fn quote(&self, application: &LoanApplication, account: &AccountSnapshot) -> LoanQuote {
        let collateral =
            self.evaluate_collateral(account.locked_savings, application.additional_collateral);
        let interest_rate = application
            .loan_type
            .map(|loan_type| self.policy.interest_rate(loan_type));
        let amount = application.amount.filter(|a| *a > Decimal::ZERO);
        let term = application.term_months.months();

        let ltv = amount.and_then(|a| loan_to_value(a, collateral.total_collateral));
        let risk = ltv.map(|ltv| self.classify_risk(ltv));

        let monthly_payment = match (amount, interest_rate) {
            (Some(principal), Some(rate)) => compute_monthly_payment(principal, rate, term).ok(),
            _ => None,
        };
        let total_repayment = monthly_payment.and_then(|p| total_repayment(p, term));
        let total_interest = match (amount, monthly_payment) {
            (Some(principal), Some(p)) => total_interest(principal, p, term),
            _ => None,
        };

        let rejections = validate(application, account, &self.policy);

        tracing::debug!(
            loan_type = ?application.loan_type,
            amount = ?application.amount,
            term_months = term,
            loan_to_value = ?ltv,
            rejections = rejections.len(),
            "Loan quote computed"
        );

        LoanQuote {
            loan_type: application.loan_type,
            interest_rate,
            term_months: application.term_months,
            amount: application.amount,
            collateral: CollateralState {
                locked_savings: round_currency(collateral.locked_savings),
                additional_collateral: round_currency(collateral.additional_collateral),
                total_collateral: round_currency(collateral.total_collateral),
                max_loan_amount: round_currency(collateral.max_loan_amount),
            },
            loan_to_value: ltv.map(round_percent),
            risk,
            monthly_payment: monthly_payment.map(round_currency),
            total_repayment: total_repayment.map(round_currency),
            total_interest: total_interest.map(round_currency),
            can_submit: rejections.is_empty(),
            rejections,
        }
    }

    /// Validate and finalize an application, then notify `sink`.
    ///
    /// The sink is called exactly once on success and never on rejection.
    pub fn submit<S>(
        &self,
        application: &LoanApplication,
        account: &AccountSnapshot,
        sink: &mut S,
    ) -> Result<ApprovedLoan, SubmitError>
    where
        S: ApprovalSink + ?Sized,
    {
        let reasons = validate(application, account, &self.policy);
        let (Some(loan_type), Some(amount), true) =
            (application.loan_type, application.amount, reasons.is_empty())
        else {
            tracing::debug!(
                reasons = ?reasons,
                "Loan application rejected"
            );
            return Err(SubmitError::Rejected(reasons));
        };

        let term = application.term_months.months();
        let interest_rate = self.policy.interest_rate(loan_type);
        let collateral =
            self.evaluate_collateral(account.locked_savings, application.additional_collateral);
        let monthly_payment = compute_monthly_payment(amount, interest_rate, term)?;
        let ltv = loan_to_value(amount, collateral.total_collateral).unwrap_or(Decimal::ZERO);

        let loan = ApprovedLoan {
            id: Uuid::new_v4(),
            amount: round_currency(amount),
            loan_type,
            term_months: application.term_months,
            interest_rate,
            monthly_payment: round_currency(monthly_payment),
            collateral_amount: round_currency(application.additional_collateral),
            total_collateral: round_currency(collateral.total_collateral),
            loan_to_value: round_percent(ltv),
            approved_at: Utc::now(),
        };

        tracing::info!(
            loan_id = %loan.id,
            loan_type = %loan.loan_type,
            amount = %loan.amount,
            term_months = term,
            monthly_payment = %loan.monthly_payment,
            loan_to_value = %loan.loan_to_value,
            "Loan approved"
        );

        sink.on_loan_approved(&loan);
        Ok(loan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finsavvy_common::types::{LoanType, RiskLevel, TermMonths};
    use rust_decimal_macros::dec;

    fn account() -> AccountSnapshot {
        AccountSnapshot {
            available_balance: dec!(20000),
            locked_savings: dec!(50000),
        }
    }

    fn application(loan_type: LoanType, amount: Decimal) -> LoanApplication {
        LoanApplication {
            loan_type: Some(loan_type),
            amount: Some(amount),
            term_months: TermMonths::Twelve,
            additional_collateral: Decimal::ZERO,
        }
    }

    #[test]
    fn test_quote_complete_form() {
        let calc = LoanCalculator::default();
        let quote = calc.quote(&application(LoanType::Business, dec!(30000)), &account());

        assert_eq!(quote.interest_rate, Some(dec!(12)));
        assert_eq!(quote.collateral.total_collateral, dec!(50000));
        assert_eq!(quote.collateral.max_loan_amount, dec!(40000));
        assert_eq!(quote.loan_to_value, Some(dec!(60)));
        assert_eq!(quote.risk.as_ref().map(|r| r.level), Some(RiskLevel::Medium));
        assert_eq!(quote.monthly_payment, Some(dec!(2665.46)));
        assert!(quote.can_submit);
        assert!(quote.rejections.is_empty());
    }

    #[test]
    fn test_quote_incomplete_form() {
        let calc = LoanCalculator::default();
        let quote = calc.quote(&LoanApplication::default(), &account());

        assert_eq!(quote.interest_rate, None);
        assert_eq!(quote.monthly_payment, None);
        assert_eq!(quote.loan_to_value, None);
        assert_eq!(quote.risk, None);
        assert_eq!(quote.collateral.max_loan_amount, dec!(40000));
        assert!(!quote.can_submit);
    }

    #[test]
    fn test_quote_tracks_pledge_changes() {
        let calc = LoanCalculator::default();
        let mut app = application(LoanType::Personal, dec!(40000));
        let before = calc.quote(&app, &account());
        app.additional_collateral = dec!(10000);
        let after = calc.quote(&app, &account());

        assert_eq!(before.collateral.max_loan_amount, dec!(40000));
        assert_eq!(after.collateral.max_loan_amount, dec!(48000));
        assert!(after.loan_to_value < before.loan_to_value);
    }

    #[test]
    fn test_quote_over_ceiling_flags_risk() {
        let calc = LoanCalculator::default();
        let quote = calc.quote(&application(LoanType::Personal, dec!(45000)), &account());
        let risk = quote.risk.unwrap();
        assert_eq!(risk.level, RiskLevel::High);
        assert!(risk.exceeds_ceiling);
        assert!(!quote.can_submit);
    }

    #[test]
    fn test_submit_calls_sink_once() {
        let calc = LoanCalculator::default();
        let mut approved = Vec::new();
        let loan = calc
            .submit(
                &application(LoanType::Education, dec!(20000)),
                &account(),
                &mut |loan: &ApprovedLoan| approved.push(loan.clone()),
            )
            .unwrap();

        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0], loan);
        assert_eq!(loan.interest_rate, dec!(10));
        assert_eq!(loan.loan_to_value, dec!(40));
        assert_eq!(loan.total_collateral, dec!(50000));
        assert_eq!(loan.collateral_amount, Decimal::ZERO);
    }

    #[test]
    fn test_rejected_submit_skips_sink() {
        let calc = LoanCalculator::default();
        let mut calls = 0;
        let result = calc.submit(
            &application(LoanType::Emergency, dec!(40001)),
            &account(),
            &mut |_: &ApprovedLoan| calls += 1,
        );

        assert_eq!(calls, 0);
        assert!(matches!(
            result,
            Err(SubmitError::Rejected(ref reasons))
                if reasons == &vec![RejectionReason::ExceedsCollateralLimit { max_loan_amount: dec!(40000) }]
        ));
    }

    #[test]
    fn test_submit_error_maps_to_app_error() {
        let err: AppError = SubmitError::Rejected(vec![RejectionReason::MissingLoanType]).into();
        assert!(matches!(err, AppError::LoanRejected(_)));

        let err: AppError = SubmitError::Calculation(CalculationError::Overflow).into();
        assert!(matches!(err, AppError::Calculation(_)));
    }
}
