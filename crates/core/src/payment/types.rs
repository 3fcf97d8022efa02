//! Payment ledger domain types.

use chrono::{DateTime, Utc};
use mikopo_shared::types::{ClientId, Money};
use serde::{Deserialize, Serialize};

/// Kind of payment ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentKind {
    /// A repayment applied against the outstanding balance.
    Repayment,
    /// A reconciling entry for the portion of a clamped over-payment that
    /// exceeded the balance. Does not move the balance.
    Surplus,
}

/// One appended row of the payment ledger.
///
/// The balance snapshots are computed by the ledger itself; a caller's
/// pre-computed balance is only ever retained as `claimed_balance`, audit
/// metadata that no computation trusts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentEntry {
    /// Store-assigned sequence number, unique across the ledger.
    pub seq: u64,
    /// The account this entry belongs to.
    pub client_id: ClientId,
    /// Entry kind.
    pub kind: PaymentKind,
    /// Outstanding balance before this entry was applied.
    pub balance_before: Money,
    /// The amount applied (or, for surplus entries, set aside).
    pub amount: Money,
    /// Outstanding balance after this entry was applied.
    pub balance_after: Money,
    /// The balance the caller claimed to see, if any. Audit only.
    pub claimed_balance: Option<Money>,
    /// Server-assigned timestamp.
    pub recorded_at: DateTime<Utc>,
}

/// A payment entry before the store has assigned its sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPaymentEntry {
    /// The account this entry belongs to.
    pub client_id: ClientId,
    /// Entry kind.
    pub kind: PaymentKind,
    /// Outstanding balance before this entry.
    pub balance_before: Money,
    /// The amount applied or set aside.
    pub amount: Money,
    /// Outstanding balance after this entry.
    pub balance_after: Money,
    /// The balance the caller claimed to see, if any. Audit only.
    pub claimed_balance: Option<Money>,
    /// Server-assigned timestamp.
    pub recorded_at: DateTime<Utc>,
}

impl NewPaymentEntry {
    /// Attaches the store-assigned sequence number.
    #[must_use]
    pub fn with_seq(self, seq: u64) -> PaymentEntry {
        PaymentEntry {
            seq,
            client_id: self.client_id,
            kind: self.kind,
            balance_before: self.balance_before,
            amount: self.amount,
            balance_after: self.balance_after,
            claimed_balance: self.claimed_balance,
            recorded_at: self.recorded_at,
        }
    }
}

/// Sorts entries oldest-first: by timestamp, sequence number as tie-break.
pub fn sort_chronological(entries: &mut [PaymentEntry]) {
    entries.sort_by(|a, b| {
        a.recorded_at
            .cmp(&b.recorded_at)
            .then(a.seq.cmp(&b.seq))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(seq: u64, at_secs: i64) -> PaymentEntry {
        PaymentEntry {
            seq,
            client_id: ClientId::new("C-9").unwrap(),
            kind: PaymentKind::Repayment,
            balance_before: Money::from_minor_units(1000),
            amount: Money::from_minor_units(100),
            balance_after: Money::from_minor_units(900),
            claimed_balance: None,
            recorded_at: Utc.timestamp_opt(at_secs, 0).unwrap(),
        }
    }

    #[test]
    fn test_sort_orders_by_timestamp_then_seq() {
        let mut entries = vec![entry(3, 200), entry(2, 100), entry(1, 100)];
        sort_chronological(&mut entries);
        let order: Vec<u64> = entries.iter().map(|e| e.seq).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn test_with_seq_preserves_fields() {
        let now = Utc::now();
        let fresh = NewPaymentEntry {
            client_id: ClientId::new("C-9").unwrap(),
            kind: PaymentKind::Repayment,
            balance_before: Money::from_minor_units(500),
            amount: Money::from_minor_units(200),
            balance_after: Money::from_minor_units(300),
            claimed_balance: Some(Money::from_minor_units(500)),
            recorded_at: now,
        };
        let stored = fresh.clone().with_seq(42);
        assert_eq!(stored.seq, 42);
        assert_eq!(stored.amount, fresh.amount);
        assert_eq!(stored.claimed_balance, fresh.claimed_balance);
        assert_eq!(stored.recorded_at, now);
    }
}
