//! Staff registration and login verification.
//!
//! Back-office staff are the only users of the system; clients never log in.
//! Sessions and tokens are a transport concern and live outside the core.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mikopo_shared::error::AppError;
use mikopo_shared::types::UserId;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use super::password::{hash_password, verify_password, PasswordError};
use crate::ledger::store::{StaffStore, StoreError};

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// A back-office staff user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffUser {
    /// Unique identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Unique login email, stored lowercased.
    pub email: String,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Argon2id PHC-format password hash. Never the plaintext.
    pub password_hash: String,
    /// Server-assigned registration timestamp.
    pub created_at: DateTime<Utc>,
}

/// Input for registering a staff user.
#[derive(Debug, Clone)]
pub struct RegisterStaffInput {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Plaintext password; hashed before it is stored.
    pub password: String,
}

/// Errors from staff registration and login.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid registration input.
    #[error("invalid registration input: {0}")]
    InvalidInput(String),

    /// A user already exists for the email.
    #[error("a user already exists for email {0}")]
    DuplicateEmail(String),

    /// Unknown email or wrong password; indistinguishable to the caller.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Password hashing or verification failed.
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// The backing store failed; the operation was not applied.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidInput(_) => Self::Validation(err.to_string()),
            AuthError::DuplicateEmail(_) => Self::Conflict(err.to_string()),
            AuthError::InvalidCredentials => Self::Unauthorized(err.to_string()),
            AuthError::Password(_) => Self::Internal(err.to_string()),
            AuthError::StorageUnavailable(_) => Self::Storage(err.to_string()),
        }
    }
}

/// Staff directory service over a storage implementation.
pub struct StaffService<S> {
    store: Arc<S>,
}

impl<S: StaffStore> StaffService<S> {
    /// Creates a service over the given store.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Registers a staff user, hashing the password before storage.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for rejected input, `DuplicateEmail` if the email is
    /// taken, `StorageUnavailable` on store failure.
    pub async fn register(&self, input: RegisterStaffInput) -> Result<StaffUser, AuthError> {
        let email = normalize_email(&input.email)?;

        if input.name.trim().is_empty() {
            return Err(AuthError::InvalidInput("name must not be blank".into()));
        }
        if input.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::InvalidInput(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let user = StaffUser {
            id: UserId::new(),
            name: input.name.trim().to_string(),
            email: email.clone(),
            phone: input.phone,
            password_hash: hash_password(&input.password)?,
            created_at: Utc::now(),
        };

        match self.store.insert_staff(&user).await {
            Ok(()) => {
                info!(user = %user.id, "staff user registered");
                Ok(user)
            }
            Err(StoreError::Duplicate(_)) => Err(AuthError::DuplicateEmail(email)),
            Err(err) => {
                warn!(error = %err, "staff insert failed");
                Err(AuthError::StorageUnavailable("insert_staff".into()))
            }
        }
    }

    /// Verifies login credentials and returns the matching user.
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` for an unknown email or wrong password,
    /// `StorageUnavailable` on store failure.
    pub async fn verify_login(&self, email: &str, password: &str) -> Result<StaffUser, AuthError> {
        let email = normalize_email(email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .store
            .staff_by_email(&email)
            .await
            .map_err(|err| {
                warn!(error = %err, "staff lookup failed");
                AuthError::StorageUnavailable("staff_by_email".into())
            })?
            .ok_or(AuthError::InvalidCredentials)?;

        if verify_password(password, &user.password_hash)? {
            Ok(user)
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

fn normalize_email(raw: &str) -> Result<String, AuthError> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(AuthError::InvalidInput("email is not valid".into()));
    }
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::store::MockStaffStore;

    fn input() -> RegisterStaffInput {
        RegisterStaffInput {
            name: "Grace Mwakio".into(),
            email: "Grace@Office.example".into(),
            phone: Some("+255700000002".into()),
            password: "long-enough-password".into(),
        }
    }

    #[tokio::test]
    async fn test_register_normalizes_email_and_hashes() {
        let mut store = MockStaffStore::new();
        store.expect_insert_staff().returning(|_| Ok(()));

        let user = StaffService::new(Arc::new(store))
            .register(input())
            .await
            .unwrap();

        assert_eq!(user.email, "grace@office.example");
        assert!(user.password_hash.starts_with("$argon2id$"));
        assert_ne!(user.password_hash, "long-enough-password");
    }

    #[tokio::test]
    async fn test_register_rejects_short_password() {
        let store = MockStaffStore::new();
        let mut bad = input();
        bad.password = "short".into();

        let err = StaffService::new(Arc::new(store))
            .register(bad)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_register_maps_duplicate_email() {
        let mut store = MockStaffStore::new();
        store
            .expect_insert_staff()
            .returning(|_| Err(StoreError::Duplicate("staff.email".into())));

        let err = StaffService::new(Arc::new(store))
            .register(input())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::DuplicateEmail(_)));
    }

    #[tokio::test]
    async fn test_login_round_trip_and_rejection() {
        let stored = StaffUser {
            id: UserId::new(),
            name: "Grace Mwakio".into(),
            email: "grace@office.example".into(),
            phone: None,
            password_hash: hash_password("long-enough-password").unwrap(),
            created_at: Utc::now(),
        };

        let mut store = MockStaffStore::new();
        let found = stored.clone();
        store
            .expect_staff_by_email()
            .returning(move |_| Ok(Some(found.clone())));

        let service = StaffService::new(Arc::new(store));
        let user = service
            .verify_login(" GRACE@office.example ", "long-enough-password")
            .await
            .unwrap();
        assert_eq!(user.id, stored.id);

        let err = service
            .verify_login("grace@office.example", "wrong-password")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_unknown_email_is_invalid_credentials() {
        let mut store = MockStaffStore::new();
        store.expect_staff_by_email().returning(|_| Ok(None));

        let err = StaffService::new(Arc::new(store))
            .verify_login("nobody@office.example", "whatever-pass")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }
}
