//! Fixed monthly payments for fully amortizing loans.
//!
//! Uses the annuity formula in its discounted form
//!
//! ```text
//! payment = P * r / (1 - (1 + r)^-n)
//! ```
//!
//! where `r` is the monthly rate (annual percent / 100 / 12) and `n` the number
//! of months. A zero rate degenerates to `P / n`. When `(1 + r)^n` is too large
//! for `Decimal`, its reciprocal is taken as zero and the payment is `P * r`.
//!
//! All arithmetic is `Decimal` with checked operations; results are unrounded.
//! Round with [`finsavvy_common::currency::round_currency`] for display.

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use thiserror::Error;

use finsavvy_common::currency::round_currency;
use finsavvy_common::error::AppError;
use finsavvy_common::types::Installment;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalculationError {
    #[error("principal must be greater than zero")]
    NonPositivePrincipal,

    #[error("interest rate cannot be negative")]
    NegativeRate,

    #[error("term must be at least one month")]
    ZeroTerm,

    #[error("term of {term_months} months exceeds the {max} month schedule limit")]
    TermTooLong { term_months: u32, max: u32 },

    #[error("arithmetic overflow")]
    Overflow,
}

impl From<CalculationError> for AppError {
    fn from(err: CalculationError) -> Self {
        AppError::Calculation(err.to_string())
    }
}

/// Longest term a month-by-month schedule is built for (50 years).
pub const MAX_SCHEDULE_MONTHS: u32 = 600;

/// Monthly rate as a fraction, e.g. 12% per year → 0.01.
pub fn monthly_rate(annual_rate_percent: Decimal) -> Decimal {
    annual_rate_percent / dec!(100) / dec!(12)
}

/// Fixed monthly payment for `principal` at `annual_rate_percent` over `term_months`.
pub fn compute_monthly_payment(
    principal: Decimal,
    annual_rate_percent: Decimal,
    term_months: u32,
) -> Result<Decimal, CalculationError> {
    if principal <= Decimal::ZERO {
        return Err(CalculationError::NonPositivePrincipal);
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(CalculationError::NegativeRate);
    }
    if term_months == 0 {
        return Err(CalculationError::ZeroTerm);
    }

    let periods = Decimal::from(term_months);
    let rate = monthly_rate(annual_rate_percent);

    if rate.is_zero() {
        return principal
            .checked_div(periods)
            .ok_or(CalculationError::Overflow);
    }

    // (1 + r)^-n, or zero once (1 + r)^n leaves Decimal's range.
    let discount = (Decimal::ONE + rate)
        .checked_powi(i64::from(term_months))
        .and_then(|growth| Decimal::ONE.checked_div(growth))
        .unwrap_or(Decimal::ZERO);
    let denominator = Decimal::ONE - discount;

    // 1 + r rounded to exactly 1: the rate is below Decimal precision.
    if denominator <= Decimal::ZERO {
        return principal
            .checked_div(periods)
            .ok_or(CalculationError::Overflow);
    }

    principal
        .checked_mul(rate)
        .and_then(|v| v.checked_div(denominator))
        .ok_or(CalculationError::Overflow)
}

/// Total paid over the life of the loan.
pub fn total_repayment(monthly_payment: Decimal, term_months: u32) -> Option<Decimal> {
    monthly_payment.checked_mul(Decimal::from(term_months))
}

/// Interest paid over the life of the loan.
pub fn total_interest(
    principal: Decimal,
    monthly_payment: Decimal,
    term_months: u32,
) -> Option<Decimal> {
    total_repayment(monthly_payment, term_months).map(|total| total - principal)
}

/// Month-by-month breakdown in kobo-rounded amounts.
///
/// Every row pays the rounded fixed payment except the last, which settles
/// whatever balance cent rounding left behind, so the schedule always ends at
/// exactly zero and the principal column sums to the rounded principal.
///
/// Terms above [`MAX_SCHEDULE_MONTHS`] are rejected with
/// [`CalculationError::TermTooLong`].
pub fn amortization_schedule(
    principal: Decimal,
    annual_rate_percent: Decimal,
    term_months: u32,
) -> Result<Vec<Installment>, CalculationError> {
    if term_months > MAX_SCHEDULE_MONTHS {
        return Err(CalculationError::TermTooLong {
            term_months,
            max: MAX_SCHEDULE_MONTHS,
        });
    }

    let payment = round_currency(compute_monthly_payment(
        principal,
        annual_rate_percent,
        term_months,
    )?);
    let rate = monthly_rate(annual_rate_percent);

    let mut balance = round_currency(principal);
    let mut schedule = Vec::new();

    for month in 1..=term_months {
        let interest = round_currency(
            balance
                .checked_mul(rate)
                .ok_or(CalculationError::Overflow)?,
        );

        let mut principal_part = (payment - interest).max(Decimal::ZERO);
        if month == term_months || principal_part > balance {
            principal_part = balance;
        }

        balance -= principal_part;
        schedule.push(Installment {
            month,
            payment: principal_part + interest,
            interest,
            principal: principal_part,
            remaining_balance: balance,
        });
    }

    Ok(schedule)
}
