//! Loan account domain types and origination rules.

use chrono::{DateTime, Utc};
use mikopo_shared::types::{ClientId, Money};
use serde::{Deserialize, Serialize};

use crate::ledger::LedgerError;

/// Borrower details captured at origination.
///
/// Name and surname are required; the remaining fields are whatever the
/// field officer collected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowerProfile {
    /// Given name.
    pub name: String,
    /// Family name.
    pub surname: String,
    /// Self-reported gender.
    pub gender: Option<String>,
    /// Home district.
    pub district: Option<String>,
    /// Home village.
    pub village: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
}

/// Input for originating a loan account.
#[derive(Debug, Clone)]
pub struct CreateLoanInput {
    /// The client's unique identifier.
    pub client_id: ClientId,
    /// Borrower details.
    pub borrower: BorrowerProfile,
    /// Loan principal; must be strictly positive.
    pub principal: Money,
    /// Flat interest added once at origination; must be non-negative.
    pub monthly_interest: Money,
    /// Free-form note on what the loan is for.
    pub requirement: Option<String>,
}

/// Lifecycle status of a loan account.
///
/// Accounts are never deleted; a fully repaid account is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    /// Outstanding balance remains.
    Open,
    /// Balance has reached zero.
    Closed,
}

/// One client's loan: principal, interest, derived total, running balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanAccount {
    /// The client's unique identifier, immutable after creation.
    pub client_id: ClientId,
    /// Borrower details.
    pub borrower: BorrowerProfile,
    /// Loan principal.
    pub principal: Money,
    /// Flat interest added once at origination, never reapplied.
    pub monthly_interest: Money,
    /// Total owed at origination: principal + interest.
    pub total_amount: Money,
    /// Outstanding balance; equals `total_amount` minus all accepted
    /// payments, and never goes negative.
    pub current_balance: Money,
    /// Free-form note on what the loan is for.
    pub requirement: Option<String>,
    /// Server-assigned origination timestamp.
    pub created_at: DateTime<Utc>,
}

impl LoanAccount {
    /// Originates a loan account from validated input.
    ///
    /// The total owed is derived as principal + interest and the balance
    /// starts equal to it.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidAmount`] for a non-positive principal or
    /// negative interest, and [`LedgerError::InvalidInput`] for a blank
    /// borrower name or surname.
    pub fn originate(input: CreateLoanInput, now: DateTime<Utc>) -> Result<Self, LedgerError> {
        let principal = input.principal.require_positive()?;
        let monthly_interest = input.monthly_interest.require_non_negative()?;

        if input.borrower.name.trim().is_empty() {
            return Err(LedgerError::InvalidInput(
                "borrower name must not be blank".into(),
            ));
        }
        if input.borrower.surname.trim().is_empty() {
            return Err(LedgerError::InvalidInput(
                "borrower surname must not be blank".into(),
            ));
        }

        let total_amount = principal.add(monthly_interest);

        Ok(Self {
            client_id: input.client_id,
            borrower: input.borrower,
            principal,
            monthly_interest,
            total_amount,
            current_balance: total_amount,
            requirement: input.requirement,
            created_at: now,
        })
    }

    /// Returns the account's lifecycle status.
    #[must_use]
    pub fn status(&self) -> LoanStatus {
        if self.current_balance.is_zero() {
            LoanStatus::Closed
        } else {
            LoanStatus::Open
        }
    }
}
