//! Cash balance projection.
//!
//! The register keeps no running counter of its own. The balance is a pure
//! projection replayed from the movement log, so it can never drift from
//! what was actually recorded.

use mikopo_shared::types::Money;
use rust_decimal::Decimal;

use super::types::{CashMovement, MovementKind};

/// Totals of the cash log split by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CashTotals {
    /// Sum of all top-ups.
    pub top_ups: Money,
    /// Sum of all expenses.
    pub expenses: Money,
}

/// Pure projections over the cash movement log.
pub struct CashRegister;

impl CashRegister {
    /// Folds the movement log into the signed cash balance
    /// (top-ups positive, expenses negative).
    #[must_use]
    pub fn balance<'a, I>(movements: I) -> Money
    where
        I: IntoIterator<Item = &'a CashMovement>,
    {
        let total: Decimal = movements.into_iter().map(CashMovement::signed_amount).sum();
        Money::new(total)
    }

    /// Splits the movement log into per-kind totals.
    #[must_use]
    pub fn totals<'a, I>(movements: I) -> CashTotals
    where
        I: IntoIterator<Item = &'a CashMovement>,
    {
        let mut top_ups = Money::ZERO;
        let mut expenses = Money::ZERO;
        for movement in movements {
            match movement.kind {
                MovementKind::TopUp => top_ups = top_ups.add(movement.amount),
                MovementKind::Expense => expenses = expenses.add(movement.amount),
            }
        }
        CashTotals { top_ups, expenses }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn movement(seq: u64, kind: MovementKind, amount: Decimal) -> CashMovement {
        CashMovement {
            seq,
            kind,
            amount: Money::new(amount),
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn test_balance_folds_signed() {
        let log = vec![
            movement(1, MovementKind::TopUp, dec!(500)),
            movement(2, MovementKind::Expense, dec!(200)),
            movement(3, MovementKind::TopUp, dec!(50)),
        ];
        assert_eq!(CashRegister::balance(&log), Money::new(dec!(350)));
    }

    #[test]
    fn test_balance_can_go_negative() {
        let log = vec![
            movement(1, MovementKind::TopUp, dec!(100)),
            movement(2, MovementKind::Expense, dec!(250)),
        ];
        let balance = CashRegister::balance(&log);
        assert!(balance.is_negative());
        assert_eq!(balance.amount(), dec!(-150));
    }

    #[test]
    fn test_balance_of_empty_log_is_zero() {
        assert_eq!(CashRegister::balance(&[]), Money::ZERO);
    }

    #[test]
    fn test_projection_is_idempotent() {
        let log = vec![
            movement(1, MovementKind::TopUp, dec!(500)),
            movement(2, MovementKind::Expense, dec!(200)),
        ];
        assert_eq!(CashRegister::balance(&log), CashRegister::balance(&log));
    }

    #[test]
    fn test_totals_split_by_kind() {
        let log = vec![
            movement(1, MovementKind::TopUp, dec!(500)),
            movement(2, MovementKind::Expense, dec!(200)),
            movement(3, MovementKind::TopUp, dec!(50)),
        ];
        let totals = CashRegister::totals(&log);
        assert_eq!(totals.top_ups, Money::new(dec!(550)));
        assert_eq!(totals.expenses, Money::new(dec!(200)));
    }
}
