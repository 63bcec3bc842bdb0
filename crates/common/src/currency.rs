//! Currency rounding and display.
//!
//! All outward-facing money and percentage values are rounded half-to-even at
//! two decimal places (kobo precision). Internal calculations keep full
//! `Decimal` precision and round only when presenting.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places used for naira amounts and percentages.
pub const DISPLAY_DECIMALS: u32 = 2;

/// Round a naira amount to kobo using banker's rounding.
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointNearestEven)
}

/// Round a percentage (e.g. loan-to-value) for display.
pub fn round_percent(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointNearestEven)
}

/// Format an amount as naira with thousands separators, e.g. `₦1,234,567.89`.
pub fn format_naira(value: Decimal) -> String {
    let mut rounded = round_currency(value).abs();
    rounded.rescale(DISPLAY_DECIMALS);
    let text = rounded.to_string();

    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}₦{}.{}", sign, grouped, fraction)
}
