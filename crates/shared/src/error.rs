//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Boundary-facing application error.
///
/// Every internal error kind maps onto exactly one of these variants with a
/// stable code; internal storage error text is carried as context but a
/// transport layer should surface only the code and message.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Business rule violation.
    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    /// Conflict (e.g., duplicate entry).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The resource is busy; the caller may retry with backoff.
    #[error("Busy: {0}")]
    Busy(String),

    /// Backing storage failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the stable code for boundary responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BusinessRule(_) => "BUSINESS_RULE_VIOLATION",
            Self::Conflict(_) => "CONFLICT",
            Self::Busy(_) => "BUSY",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true if the caller may retry the operation.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Busy(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_distinct() {
        let errors = [
            AppError::Unauthorized(String::new()),
            AppError::NotFound(String::new()),
            AppError::Validation(String::new()),
            AppError::BusinessRule(String::new()),
            AppError::Conflict(String::new()),
            AppError::Busy(String::new()),
            AppError::Storage(String::new()),
            AppError::Internal(String::new()),
        ];
        let mut codes: Vec<_> = errors.iter().map(AppError::error_code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_only_busy_is_retryable() {
        assert!(AppError::Busy(String::new()).is_retryable());
        assert!(!AppError::Storage(String::new()).is_retryable());
        assert!(!AppError::Conflict(String::new()).is_retryable());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::NotFound("client 77".into()).to_string(),
            "Not found: client 77"
        );
        assert_eq!(
            AppError::Busy("ledger".into()).to_string(),
            "Busy: ledger"
        );
    }
}
