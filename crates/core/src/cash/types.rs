//! Cash movement domain types.

use chrono::{DateTime, Utc};
use mikopo_shared::types::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of organization-level cash movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    /// Cash added to the float.
    TopUp,
    /// Operating expense paid out of the float.
    Expense,
}

/// One appended row of the cash log.
///
/// Movements are account-independent: they track the organization's own
/// liquidity, not any client's debt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashMovement {
    /// Store-assigned sequence number.
    pub seq: u64,
    /// Movement kind.
    pub kind: MovementKind,
    /// The moved amount; always positive, the kind carries the sign.
    pub amount: Money,
    /// Server-assigned timestamp.
    pub recorded_at: DateTime<Utc>,
}

impl CashMovement {
    /// Returns the signed contribution to the cash balance
    /// (top-ups positive, expenses negative).
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            MovementKind::TopUp => self.amount.amount(),
            MovementKind::Expense => -self.amount.amount(),
        }
    }
}
