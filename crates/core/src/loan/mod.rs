//! Loan account origination and balances.
//!
//! A loan account is created once at origination with its principal and a
//! flat interest addition; the outstanding balance then only moves through
//! the payment ledger.

pub mod types;

pub use types::{BorrowerProfile, CreateLoanInput, LoanAccount, LoanStatus};
