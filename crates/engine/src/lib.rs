pub mod amortization;
pub mod calculator;
pub mod collateral;
pub mod risk;
pub mod validation;

pub use calculator::{ApprovalSink, LoanCalculator, SubmitError};
