//! Property-based tests for the cash balance projection.
//!
//! - The projection is order-insensitive (movements commute).
//! - The projection is idempotent: replaying twice yields the same value.
//! - The balance equals top-ups minus expenses, exactly.

use chrono::Utc;
use mikopo_shared::types::Money;
use proptest::prelude::*;

use super::register::CashRegister;
use super::types::{CashMovement, MovementKind};

fn movement_strategy() -> impl Strategy<Value = CashMovement> {
    (1i64..1_000_000i64, any::<bool>()).prop_map(|(cents, is_top_up)| CashMovement {
        seq: 0,
        kind: if is_top_up {
            MovementKind::TopUp
        } else {
            MovementKind::Expense
        },
        amount: Money::from_minor_units(cents),
        recorded_at: Utc::now(),
    })
}

fn log_strategy(max_len: usize) -> impl Strategy<Value = Vec<CashMovement>> {
    prop::collection::vec(movement_strategy(), 0..=max_len).prop_map(|mut log| {
        for (i, movement) in log.iter_mut().enumerate() {
            movement.seq = (i + 1) as u64;
        }
        log
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Replaying a shuffled log yields the same balance: movements commute.
    #[test]
    fn prop_projection_is_order_insensitive(log in log_strategy(30)) {
        let forward = CashRegister::balance(&log);
        let mut reversed = log.clone();
        reversed.reverse();
        prop_assert_eq!(forward, CashRegister::balance(&reversed));
    }

    /// Calling the projection twice without new movements yields the same
    /// value.
    #[test]
    fn prop_projection_is_idempotent(log in log_strategy(30)) {
        prop_assert_eq!(CashRegister::balance(&log), CashRegister::balance(&log));
    }

    /// The balance always equals top-ups minus expenses.
    #[test]
    fn prop_balance_equals_totals_difference(log in log_strategy(30)) {
        let totals = CashRegister::totals(&log);
        let balance = CashRegister::balance(&log);
        prop_assert_eq!(
            balance.amount(),
            totals.top_ups.amount() - totals.expenses.amount()
        );
    }
}
