//! Property-based tests for payment settlement.
//!
//! - Final balance equals total minus the sum of accepted payments,
//!   regardless of sequence.
//! - The balance never goes negative under either policy.
//! - A recorded history replays to the live balance and forms a
//!   consistent chain.

use chrono::Utc;
use mikopo_shared::config::OverpaymentPolicy;
use mikopo_shared::types::{ClientId, Money};
use proptest::prelude::*;

use super::settle::{chain_is_consistent, replay_balance, settle};
use super::types::{NewPaymentEntry, PaymentEntry, PaymentKind};
use crate::ledger::LedgerError;

/// Strategy for positive amounts (0.01 to 10,000.00).
fn positive_amount() -> impl Strategy<Value = Money> {
    (1i64..1_000_000i64).prop_map(Money::from_minor_units)
}

/// Strategy for a sequence of payment attempts.
fn payment_sequence(max_len: usize) -> impl Strategy<Value = Vec<Money>> {
    prop::collection::vec(positive_amount(), 1..=max_len)
}

/// Applies a sequence of attempts the way the ledger service does, building
/// the entries an account's history would hold.
fn run_sequence(
    total: Money,
    attempts: &[Money],
    policy: OverpaymentPolicy,
) -> (Money, Vec<PaymentEntry>, Vec<Money>) {
    let client = ClientId::new("PROP-1").unwrap();
    let mut balance = total;
    let mut entries = Vec::new();
    let mut accepted = Vec::new();
    let mut seq = 0u64;

    for &amount in attempts {
        match settle(balance, amount, policy) {
            Ok(outcome) => {
                seq += 1;
                entries.push(
                    NewPaymentEntry {
                        client_id: client.clone(),
                        kind: PaymentKind::Repayment,
                        balance_before: balance,
                        amount: outcome.applied,
                        balance_after: outcome.balance_after,
                        claimed_balance: None,
                        recorded_at: Utc::now(),
                    }
                    .with_seq(seq),
                );
                if let Some(surplus) = outcome.surplus {
                    seq += 1;
                    entries.push(
                        NewPaymentEntry {
                            client_id: client.clone(),
                            kind: PaymentKind::Surplus,
                            balance_before: outcome.balance_after,
                            amount: surplus,
                            balance_after: outcome.balance_after,
                            claimed_balance: None,
                            recorded_at: Utc::now(),
                        }
                        .with_seq(seq),
                    );
                }
                accepted.push(outcome.applied);
                balance = outcome.balance_after;
            }
            Err(LedgerError::OverPayment { .. }) => {}
            Err(other) => panic!("unexpected settlement error: {other}"),
        }
    }

    (balance, entries, accepted)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The final balance equals total minus the sum of accepted payments,
    /// for any sequence under the reject policy.
    #[test]
    fn prop_final_balance_is_total_minus_accepted(
        total in positive_amount(),
        attempts in payment_sequence(20),
    ) {
        let (balance, _, accepted) = run_sequence(total, &attempts, OverpaymentPolicy::Reject);
        let accepted_sum: Money = accepted.into_iter().sum();

        prop_assert_eq!(
            balance.amount(),
            total.amount() - accepted_sum.amount(),
            "balance must reconcile against accepted payments"
        );
        prop_assert!(!balance.is_negative());
    }

    /// The balance never goes negative under the clamp policy either, and
    /// once it reaches zero it stays there.
    #[test]
    fn prop_clamp_never_negative(
        total in positive_amount(),
        attempts in payment_sequence(20),
    ) {
        let (balance, entries, _) = run_sequence(total, &attempts, OverpaymentPolicy::ClampToZero);

        prop_assert!(!balance.is_negative());
        for entry in &entries {
            prop_assert!(!entry.balance_after.is_negative());
        }

        // Every attempt lands once the balance is zero, so a non-empty
        // attempt list long enough to exhaust the total ends at zero.
        let attempted: Money = attempts.iter().copied().sum();
        if attempted >= total {
            prop_assert!(balance.is_zero());
        }
    }

    /// A recorded history replays to the live balance and forms a
    /// consistent chain, under either policy.
    #[test]
    fn prop_history_replay_law(
        total in positive_amount(),
        attempts in payment_sequence(20),
        clamp in any::<bool>(),
    ) {
        let policy = if clamp {
            OverpaymentPolicy::ClampToZero
        } else {
            OverpaymentPolicy::Reject
        };
        let (balance, entries, _) = run_sequence(total, &attempts, policy);

        prop_assert_eq!(replay_balance(total, &entries), balance);
        prop_assert!(chain_is_consistent(&entries));
    }

    /// Settlement of a single payment is deterministic.
    #[test]
    fn prop_settlement_deterministic(
        balance in positive_amount(),
        amount in positive_amount(),
    ) {
        let a = settle(balance, amount, OverpaymentPolicy::ClampToZero).unwrap();
        let b = settle(balance, amount, OverpaymentPolicy::ClampToZero).unwrap();
        prop_assert_eq!(a, b);
    }
}
