//! In-memory record of approved loans.
//!
//! The book is the API's approval sink. It lives for the lifetime of the
//! process only; durable storage is out of scope for this service.

use std::sync::{Arc, Mutex, MutexGuard};

use uuid::Uuid;

use finsavvy_common::types::ApprovedLoan;
use finsavvy_engine::ApprovalSink;

#[derive(Debug, Clone, Default)]
pub struct LoanBook {
    loans: Arc<Mutex<Vec<ApprovedLoan>>>,
}

impl LoanBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Approved loans, most recent first.
    pub fn list(&self) -> Vec<ApprovedLoan> {
        let mut loans = self.lock().clone();
        loans.reverse();
        loans
    }

    pub fn get(&self, id: Uuid) -> Option<ApprovedLoan> {
        self.lock().iter().find(|loan| loan.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ApprovedLoan>> {
        // Entries are only ever pushed whole, so a poisoned lock still holds a consistent list.
        self.loans.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ApprovalSink for LoanBook {
    fn on_loan_approved(&mut self, loan: &ApprovedLoan) {
        self.lock().push(loan.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use finsavvy_common::types::{LoanType, TermMonths};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn make_loan(amount: Decimal) -> ApprovedLoan {
        ApprovedLoan {
            id: Uuid::new_v4(),
            amount,
            loan_type: LoanType::Personal,
            term_months: TermMonths::Twelve,
            interest_rate: dec!(15),
            monthly_payment: dec!(100),
            collateral_amount: Decimal::ZERO,
            total_collateral: dec!(50000),
            loan_to_value: dec!(10),
            approved_at: Utc::now(),
        }
    }

    #[test]
    fn test_clones_share_storage() {
        let book = LoanBook::new();
        let mut sink = book.clone();
        let loan = make_loan(dec!(5000));
        sink.on_loan_approved(&loan);

        assert_eq!(book.len(), 1);
        assert_eq!(book.get(loan.id), Some(loan));
        assert_eq!(book.get(Uuid::new_v4()), None);
    }

    #[test]
    fn test_list_newest_first() {
        let mut book = LoanBook::new();
        book.on_loan_approved(&make_loan(dec!(1000)));
        book.on_loan_approved(&make_loan(dec!(2000)));

        let amounts: Vec<Decimal> = book.list().iter().map(|l| l.amount).collect();
        assert_eq!(amounts, vec![dec!(2000), dec!(1000)]);
    }
}
