//! Payment settlement against an outstanding balance.
//!
//! Settlement is a pure computation: given the server's own notion of the
//! balance, a payment amount, and the over-payment policy, it produces the
//! applied amount, the balance after, and any surplus. The ledger service
//! turns the result into entries and commits them atomically.

use mikopo_shared::config::OverpaymentPolicy;
use mikopo_shared::types::{Money, Subtracted};

use super::types::{PaymentEntry, PaymentKind};
use crate::ledger::LedgerError;

/// Outcome of settling one payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    /// The amount actually applied against the balance.
    pub applied: Money,
    /// The balance after application. Never negative.
    pub balance_after: Money,
    /// The overshoot set aside under [`OverpaymentPolicy::ClampToZero`].
    pub surplus: Option<Money>,
}

/// Settles a payment against an outstanding balance.
///
/// # Errors
///
/// Returns [`LedgerError::InvalidAmount`] for a non-positive amount and
/// [`LedgerError::OverPayment`] when the amount exceeds the balance under
/// [`OverpaymentPolicy::Reject`].
pub fn settle(
    balance: Money,
    amount: Money,
    policy: OverpaymentPolicy,
) -> Result<Settlement, LedgerError> {
    let amount = amount.require_positive()?;

    match balance.subtract(amount) {
        Subtracted::Remaining(balance_after) => Ok(Settlement {
            applied: amount,
            balance_after,
            surplus: None,
        }),
        Subtracted::Negative(shortfall) => match policy {
            OverpaymentPolicy::Reject => Err(LedgerError::OverPayment { balance, amount }),
            OverpaymentPolicy::ClampToZero => Ok(Settlement {
                applied: balance,
                balance_after: Money::ZERO,
                surplus: Some(shortfall),
            }),
        },
    }
}

/// Replays a payment history against the account's original total.
///
/// Only repayment entries move the balance; surplus entries are reconciling
/// records. For a well-formed history the result equals the account's
/// current balance.
#[must_use]
pub fn replay_balance(total_amount: Money, entries: &[PaymentEntry]) -> Money {
    let repaid: Money = entries
        .iter()
        .filter(|e| e.kind == PaymentKind::Repayment)
        .map(|e| e.amount)
        .sum();
    Money::new(total_amount.amount() - repaid.amount())
}

/// Checks the history replay law over a single account's chronologically
/// ordered entries.
///
/// Each repayment must record `balance_before - amount == balance_after`,
/// each surplus must leave the balance unmoved, and each entry's
/// `balance_before` must equal the previous entry's `balance_after`.
#[must_use]
pub fn chain_is_consistent(entries: &[PaymentEntry]) -> bool {
    let mut previous_after: Option<Money> = None;

    for entry in entries {
        if let Some(prev) = previous_after {
            if entry.balance_before != prev {
                return false;
            }
        }

        let holds = match entry.kind {
            PaymentKind::Repayment => match entry.balance_before.subtract(entry.amount) {
                Subtracted::Remaining(after) => after == entry.balance_after,
                Subtracted::Negative(_) => false,
            },
            PaymentKind::Surplus => entry.balance_before == entry.balance_after,
        };
        if !holds {
            return false;
        }

        previous_after = Some(entry.balance_after);
    }

    true
}
