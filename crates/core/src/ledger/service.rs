//! Ledger service facade.
//!
//! Orchestrates lookups and applies payments and cash movements through the
//! storage port. Every balance-affecting operation goes through here; the
//! service is the sole authority on balances, and callers' pre-computed
//! totals are only ever retained as audit metadata.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use dashmap::DashMap;
use mikopo_shared::config::{LedgerConfig, OverpaymentPolicy};
use mikopo_shared::types::{ClientId, Money};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{info, warn};

use super::error::LedgerError;
use super::store::{LedgerStore, StoreError};
use crate::cash::{CashMovement, CashRegister, MovementKind};
use crate::loan::{CreateLoanInput, LoanAccount};
use crate::payment::{self, NewPaymentEntry, PaymentEntry, PaymentKind};

/// Ledger service over a storage implementation.
///
/// Balance-mutating operations for one client identifier are serialized
/// behind a per-identifier async mutex with a bounded wait; operations
/// against different accounts proceed in parallel. Cash movements are
/// commutative appends and take no lock.
pub struct LedgerService<S> {
    store: Arc<S>,
    locks: DashMap<ClientId, Arc<Mutex<()>>>,
    lock_wait: Duration,
    policy: OverpaymentPolicy,
}

impl<S: LedgerStore> LedgerService<S> {
    /// Creates a service over the given store.
    #[must_use]
    pub fn new(store: Arc<S>, config: &LedgerConfig) -> Self {
        Self {
            store,
            locks: DashMap::new(),
            lock_wait: config.lock_wait(),
            policy: config.overpayment_policy,
        }
    }

    /// Returns the configured over-payment policy.
    #[must_use]
    pub const fn overpayment_policy(&self) -> OverpaymentPolicy {
        self.policy
    }

    /// Originates a new loan account.
    ///
    /// # Errors
    ///
    /// `InvalidAmount`/`InvalidInput` for rejected input, `DuplicateClient`
    /// if an account already exists, `StorageUnavailable` on store failure.
    pub async fn create_loan_account(
        &self,
        input: CreateLoanInput,
    ) -> Result<LoanAccount, LedgerError> {
        let account = LoanAccount::originate(input, Utc::now())?;

        match self.store.insert_account(&account).await {
            Ok(()) => {
                info!(
                    client = %account.client_id,
                    total = %account.total_amount,
                    "loan account originated"
                );
                Ok(account)
            }
            Err(StoreError::Duplicate(_)) => Err(LedgerError::DuplicateClient(account.client_id)),
            Err(err) => Err(storage_failure("insert_account", &err)),
        }
    }

    /// Fetches the loan account for a client identifier.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown identifier, `StorageUnavailable` on store
    /// failure.
    pub async fn loan_account(&self, client: &ClientId) -> Result<LoanAccount, LedgerError> {
        self.store
            .fetch_account(client)
            .await
            .map_err(|err| storage_failure("fetch_account", &err))?
            .ok_or_else(|| LedgerError::NotFound(client.clone()))
    }

    /// Returns a fresh snapshot of all loan accounts.
    pub async fn list_loan_accounts(&self) -> Result<Vec<LoanAccount>, LedgerError> {
        self.store
            .list_accounts()
            .await
            .map_err(|err| storage_failure("list_accounts", &err))
    }

    /// Records a payment against a client's outstanding balance.
    ///
    /// The balance snapshots on the entry are computed here, from the
    /// store's own account state; `claimed_balance` is retained as audit
    /// metadata only. The balance update and the entry append commit as one
    /// atomic unit.
    ///
    /// # Errors
    ///
    /// `InvalidAmount` for a non-positive amount, `NotFound` for an unknown
    /// client, `OverPayment` under the reject policy, `Busy` if the
    /// per-account lock cannot be acquired in time, `StorageUnavailable` on
    /// store failure. Every error leaves state unchanged.
    pub async fn record_payment(
        &self,
        client: &ClientId,
        amount: Money,
        claimed_balance: Option<Money>,
    ) -> Result<PaymentEntry, LedgerError> {
        let amount = amount.require_positive()?;

        let _guard = self.lock_account(client).await?;

        let mut account = self.loan_account(client).await?;
        let outcome = payment::settle(account.current_balance, amount, self.policy)?;

        let now = Utc::now();
        let mut entries = vec![NewPaymentEntry {
            client_id: client.clone(),
            kind: PaymentKind::Repayment,
            balance_before: account.current_balance,
            amount: outcome.applied,
            balance_after: outcome.balance_after,
            claimed_balance,
            recorded_at: now,
        }];
        if let Some(surplus) = outcome.surplus {
            entries.push(NewPaymentEntry {
                client_id: client.clone(),
                kind: PaymentKind::Surplus,
                balance_before: outcome.balance_after,
                amount: surplus,
                balance_after: outcome.balance_after,
                claimed_balance: None,
                recorded_at: now,
            });
        }

        account.current_balance = outcome.balance_after;

        let mut recorded = self
            .store
            .commit_payment(&account, entries)
            .await
            .map_err(|err| storage_failure("commit_payment", &err))?;

        info!(
            client = %client,
            applied = %outcome.applied,
            balance = %account.current_balance,
            "payment recorded"
        );

        if recorded.is_empty() {
            return Err(storage_failure(
                "commit_payment",
                &StoreError::Unavailable("no entries returned".into()),
            ));
        }
        Ok(recorded.swap_remove(0))
    }

    /// Returns one client's payment entries, oldest first.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown client identifier.
    pub async fn payment_history(
        &self,
        client: &ClientId,
    ) -> Result<Vec<PaymentEntry>, LedgerError> {
        // Validate the identifier before delegating.
        let _account = self.loan_account(client).await?;

        let mut entries = self
            .store
            .payments_for(client)
            .await
            .map_err(|err| storage_failure("payments_for", &err))?;
        payment::sort_chronological(&mut entries);
        Ok(entries)
    }

    /// Returns the full payment log across all accounts, oldest first.
    pub async fn all_payments(&self) -> Result<Vec<PaymentEntry>, LedgerError> {
        let mut entries = self
            .store
            .all_payments()
            .await
            .map_err(|err| storage_failure("all_payments", &err))?;
        payment::sort_chronological(&mut entries);
        Ok(entries)
    }

    /// Records a cash top-up.
    pub async fn record_top_up(&self, amount: Money) -> Result<CashMovement, LedgerError> {
        self.record_movement(MovementKind::TopUp, amount).await
    }

    /// Records an operating expense.
    pub async fn record_expense(&self, amount: Money) -> Result<CashMovement, LedgerError> {
        self.record_movement(MovementKind::Expense, amount).await
    }

    /// Returns the organization's cash balance, replayed from the movement
    /// log. Never read from a stored counter.
    pub async fn cash_balance(&self) -> Result<Money, LedgerError> {
        let movements = self.cash_movements(None).await?;
        Ok(CashRegister::balance(&movements))
    }

    /// Returns cash movements, optionally filtered by kind, oldest first.
    pub async fn cash_movements(
        &self,
        kind: Option<MovementKind>,
    ) -> Result<Vec<CashMovement>, LedgerError> {
        self.store
            .movements(kind)
            .await
            .map_err(|err| storage_failure("movements", &err))
    }

    async fn record_movement(
        &self,
        kind: MovementKind,
        amount: Money,
    ) -> Result<CashMovement, LedgerError> {
        let amount = amount.require_positive()?;
        let movement = self
            .store
            .append_movement(kind, amount, Utc::now())
            .await
            .map_err(|err| storage_failure("append_movement", &err))?;
        info!(seq = movement.seq, kind = ?movement.kind, amount = %movement.amount, "cash movement recorded");
        Ok(movement)
    }

    /// Acquires the per-account mutex within the configured wait.
    async fn lock_account(&self, client: &ClientId) -> Result<OwnedMutexGuard<()>, LedgerError> {
        let cell = self.locks.entry(client.clone()).or_default().clone();
        tokio::time::timeout(self.lock_wait, cell.lock_owned())
            .await
            .map_err(|_| LedgerError::Busy(client.clone()))
    }
}

/// Wraps a store failure, logging the detail and keeping the internal error
/// text out of the boundary-facing message.
fn storage_failure(operation: &'static str, err: &StoreError) -> LedgerError {
    warn!(operation, error = %err, "storage operation failed");
    LedgerError::StorageUnavailable(operation.to_string())
}
