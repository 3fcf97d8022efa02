//! Storage port consumed by the ledger service.
//!
//! The core never talks to a database directly; it talks to these traits.
//! An implementation must provide durable insert-if-absent for accounts,
//! atomic commit of a balance update together with its ledger entries, and
//! atomic append for cash movements.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mikopo_shared::types::{ClientId, Money};
use thiserror::Error;

use crate::auth::StaffUser;
use crate::cash::{CashMovement, MovementKind};
use crate::loan::LoanAccount;
use crate::payment::{NewPaymentEntry, PaymentEntry};

/// Errors surfaced by a storage implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint was violated.
    #[error("duplicate key: {0}")]
    Duplicate(String),

    /// The store could not complete the operation.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Durable storage for accounts, payments, and cash movements.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Inserts a new loan account.
    ///
    /// Fails with [`StoreError::Duplicate`] if an account already exists for
    /// the client identifier; the existing account is left untouched.
    async fn insert_account(&self, account: &LoanAccount) -> Result<(), StoreError>;

    /// Fetches the loan account for a client identifier.
    async fn fetch_account(&self, client: &ClientId)
        -> Result<Option<LoanAccount>, StoreError>;

    /// Returns a fresh snapshot of all loan accounts.
    async fn list_accounts(&self) -> Result<Vec<LoanAccount>, StoreError>;

    /// Commits an updated account balance together with its new ledger
    /// entries as one atomic unit, assigning sequence numbers.
    ///
    /// Either everything is applied or nothing is; a reader must never
    /// observe the balance without the entries or vice versa.
    async fn commit_payment(
        &self,
        account: &LoanAccount,
        entries: Vec<NewPaymentEntry>,
    ) -> Result<Vec<PaymentEntry>, StoreError>;

    /// Returns all payment entries for one client.
    async fn payments_for(&self, client: &ClientId) -> Result<Vec<PaymentEntry>, StoreError>;

    /// Returns the full payment log across all accounts.
    async fn all_payments(&self) -> Result<Vec<PaymentEntry>, StoreError>;

    /// Appends one cash movement atomically, assigning its sequence number.
    async fn append_movement(
        &self,
        kind: MovementKind,
        amount: Money,
        recorded_at: DateTime<Utc>,
    ) -> Result<CashMovement, StoreError>;

    /// Returns cash movements, optionally filtered by kind, oldest first.
    async fn movements(&self, kind: Option<MovementKind>)
        -> Result<Vec<CashMovement>, StoreError>;
}

/// Durable storage for back-office staff credentials.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StaffStore: Send + Sync {
    /// Inserts a new staff user.
    ///
    /// Fails with [`StoreError::Duplicate`] if the email is already taken.
    async fn insert_staff(&self, user: &StaffUser) -> Result<(), StoreError>;

    /// Looks a staff user up by email.
    async fn staff_by_email(&self, email: &str) -> Result<Option<StaffUser>, StoreError>;
}
