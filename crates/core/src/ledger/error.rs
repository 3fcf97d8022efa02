//! Ledger error taxonomy.
//!
//! Every error a ledger operation can produce maps onto a stable,
//! boundary-facing code. Storage failures are wrapped; their internal text
//! never doubles as the boundary message.

use mikopo_shared::error::AppError;
use mikopo_shared::types::{ClientId, Money, MoneyError};
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Malformed, negative, or zero amount where disallowed.
    #[error("invalid amount: {0}")]
    InvalidAmount(#[from] MoneyError),

    /// Invalid origination input (identifier or borrower profile).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No loan account exists for the client identifier.
    #[error("no loan account for client {0}")]
    NotFound(ClientId),

    /// A loan account already exists for the client identifier.
    #[error("a loan account already exists for client {0}")]
    DuplicateClient(ClientId),

    /// Payment exceeds the outstanding balance under the reject policy.
    #[error("payment of {amount} exceeds outstanding balance {balance}")]
    OverPayment {
        /// Outstanding balance at the time of the attempt.
        balance: Money,
        /// The rejected payment amount.
        amount: Money,
    },

    /// The per-account lock could not be acquired within the configured wait.
    #[error("account {0} is busy, retry with backoff")]
    Busy(ClientId),

    /// The backing store failed; the operation was not applied.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl LedgerError {
    /// Returns the stable code for boundary responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::DuplicateClient(_) => "DUPLICATE_CLIENT",
            Self::OverPayment { .. } => "OVER_PAYMENT",
            Self::Busy(_) => "BUSY",
            Self::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
        }
    }

    /// Returns true if this error is retryable with backoff.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Busy(_))
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InvalidAmount(_) | LedgerError::InvalidInput(_) => {
                Self::Validation(err.to_string())
            }
            LedgerError::NotFound(_) => Self::NotFound(err.to_string()),
            LedgerError::DuplicateClient(_) => Self::Conflict(err.to_string()),
            LedgerError::OverPayment { .. } => Self::BusinessRule(err.to_string()),
            LedgerError::Busy(_) => Self::Busy(err.to_string()),
            LedgerError::StorageUnavailable(_) => Self::Storage(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(raw: &str) -> ClientId {
        ClientId::new(raw).unwrap()
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            LedgerError::InvalidAmount(MoneyError::Negative).error_code(),
            "INVALID_AMOUNT"
        );
        assert_eq!(
            LedgerError::NotFound(client("C-1")).error_code(),
            "NOT_FOUND"
        );
        assert_eq!(
            LedgerError::DuplicateClient(client("C-1")).error_code(),
            "DUPLICATE_CLIENT"
        );
        assert_eq!(
            LedgerError::OverPayment {
                balance: Money::from_minor_units(100),
                amount: Money::from_minor_units(200),
            }
            .error_code(),
            "OVER_PAYMENT"
        );
        assert_eq!(LedgerError::Busy(client("C-1")).error_code(), "BUSY");
        assert_eq!(
            LedgerError::StorageUnavailable("io".into()).error_code(),
            "STORAGE_UNAVAILABLE"
        );
    }

    #[test]
    fn test_only_busy_is_retryable() {
        assert!(LedgerError::Busy(client("C-1")).is_retryable());
        assert!(!LedgerError::StorageUnavailable("io".into()).is_retryable());
        assert!(!LedgerError::NotFound(client("C-1")).is_retryable());
    }

    #[test]
    fn test_overpayment_display_carries_amounts() {
        let err = LedgerError::OverPayment {
            balance: Money::from_minor_units(20_000),
            amount: Money::from_minor_units(35_000),
        };
        assert_eq!(
            err.to_string(),
            "payment of 350.00 exceeds outstanding balance 200.00"
        );
    }

    #[test]
    fn test_boundary_mapping() {
        assert_eq!(
            AppError::from(LedgerError::Busy(client("C-1"))).error_code(),
            "BUSY"
        );
        assert_eq!(
            AppError::from(LedgerError::DuplicateClient(client("C-1"))).error_code(),
            "CONFLICT"
        );
        assert_eq!(
            AppError::from(LedgerError::InvalidAmount(MoneyError::Zero)).error_code(),
            "VALIDATION_ERROR"
        );
    }
}
