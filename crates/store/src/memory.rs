//! In-memory store backed by a single `RwLock` over the whole state.
//!
//! One write guard covers every mutation, which is what makes
//! `commit_payment` atomic: the account balance and its entries land
//! together or not at all. Sequence counters live inside the guarded state
//! so they can never drift from the rows they number.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use mikopo_core::auth::StaffUser;
use mikopo_core::cash::{CashMovement, MovementKind};
use mikopo_core::ledger::store::{LedgerStore, StaffStore, StoreError};
use mikopo_core::loan::LoanAccount;
use mikopo_core::payment::{NewPaymentEntry, PaymentEntry};
use mikopo_shared::types::{ClientId, Money};

#[derive(Default)]
struct State {
    accounts: BTreeMap<ClientId, LoanAccount>,
    payments: Vec<PaymentEntry>,
    movements: Vec<CashMovement>,
    staff: Vec<StaffUser>,
    payment_seq: u64,
    movement_seq: u64,
}

/// In-memory storage implementation.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<State>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent operation fail with
    /// [`StoreError::Unavailable`] until cleared. Test hook for exercising
    /// storage-failure paths.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("store marked unavailable".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl LedgerStore for MemoryStore {
    async fn insert_account(&self, account: &LoanAccount) -> Result<(), StoreError> {
        self.check_available()?;
        let mut state = self.state.write().await;
        if state.accounts.contains_key(&account.client_id) {
            return Err(StoreError::Duplicate(format!(
                "accounts.client_id: {}",
                account.client_id
            )));
        }
        state
            .accounts
            .insert(account.client_id.clone(), account.clone());
        debug!(client = %account.client_id, "account inserted");
        Ok(())
    }

    async fn fetch_account(
        &self,
        client: &ClientId,
    ) -> Result<Option<LoanAccount>, StoreError> {
        self.check_available()?;
        Ok(self.state.read().await.accounts.get(client).cloned())
    }

    async fn list_accounts(&self) -> Result<Vec<LoanAccount>, StoreError> {
        self.check_available()?;
        Ok(self.state.read().await.accounts.values().cloned().collect())
    }

    async fn commit_payment(
        &self,
        account: &LoanAccount,
        entries: Vec<NewPaymentEntry>,
    ) -> Result<Vec<PaymentEntry>, StoreError> {
        self.check_available()?;
        let mut state = self.state.write().await;

        // Account upsert and entry appends happen under this one guard.
        state
            .accounts
            .insert(account.client_id.clone(), account.clone());

        let mut recorded = Vec::with_capacity(entries.len());
        for entry in entries {
            state.payment_seq += 1;
            let stored = entry.with_seq(state.payment_seq);
            state.payments.push(stored.clone());
            recorded.push(stored);
        }
        debug!(
            client = %account.client_id,
            entries = recorded.len(),
            "payment committed"
        );
        Ok(recorded)
    }

    async fn payments_for(&self, client: &ClientId) -> Result<Vec<PaymentEntry>, StoreError> {
        self.check_available()?;
        Ok(self
            .state
            .read()
            .await
            .payments
            .iter()
            .filter(|entry| &entry.client_id == client)
            .cloned()
            .collect())
    }

    async fn all_payments(&self) -> Result<Vec<PaymentEntry>, StoreError> {
        self.check_available()?;
        Ok(self.state.read().await.payments.clone())
    }

    async fn append_movement(
        &self,
        kind: MovementKind,
        amount: Money,
        recorded_at: DateTime<Utc>,
    ) -> Result<CashMovement, StoreError> {
        self.check_available()?;
        let mut state = self.state.write().await;
        state.movement_seq += 1;
        let movement = CashMovement {
            seq: state.movement_seq,
            kind,
            amount,
            recorded_at,
        };
        state.movements.push(movement.clone());
        Ok(movement)
    }

    async fn movements(
        &self,
        kind: Option<MovementKind>,
    ) -> Result<Vec<CashMovement>, StoreError> {
        self.check_available()?;
        Ok(self
            .state
            .read()
            .await
            .movements
            .iter()
            .filter(|movement| kind.is_none_or(|k| movement.kind == k))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl StaffStore for MemoryStore {
    async fn insert_staff(&self, user: &StaffUser) -> Result<(), StoreError> {
        self.check_available()?;
        let mut state = self.state.write().await;
        if state.staff.iter().any(|existing| existing.email == user.email) {
            return Err(StoreError::Duplicate(format!(
                "staff.email: {}",
                user.email
            )));
        }
        state.staff.push(user.clone());
        Ok(())
    }

    async fn staff_by_email(&self, email: &str) -> Result<Option<StaffUser>, StoreError> {
        self.check_available()?;
        Ok(self
            .state
            .read()
            .await
            .staff
            .iter()
            .find(|user| user.email == email)
            .cloned())
    }
}
