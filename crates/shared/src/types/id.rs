//! Validated identifiers for type-safe entity references.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error raised for an unusable client identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientIdError {
    /// The identifier was empty or whitespace-only.
    #[error("client identifier must not be empty")]
    Empty,

    /// The identifier was longer than the allowed maximum.
    #[error("client identifier exceeds {} characters", ClientId::MAX_LEN)]
    TooLong,

    /// The identifier contained control characters.
    #[error("client identifier contains control characters")]
    ControlCharacters,
}

/// A client's unique identifier (the national ID number on file).
///
/// Immutable after loan origination; every loan account, and every payment
/// entry, references exactly one of these.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct ClientId(String);

impl ClientId {
    /// Maximum accepted identifier length.
    pub const MAX_LEN: usize = 128;

    /// Validates and normalizes a raw identifier.
    ///
    /// Surrounding whitespace is trimmed; the result must be non-empty, at
    /// most [`Self::MAX_LEN`] characters, and free of control characters.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientIdError`] describing the rejected input.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ClientIdError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ClientIdError::Empty);
        }
        if trimmed.chars().count() > Self::MAX_LEN {
            return Err(ClientIdError::TooLong);
        }
        if trimmed.chars().any(char::is_control) {
            return Err(ClientIdError::ControlCharacters);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ClientId {
    type Error = ClientIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClientId> for String {
    fn from(id: ClientId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for a back-office staff user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Creates a new random ID using UUID v7 (time-ordered).
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates an ID from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_id_trims_and_accepts() {
        let id = ClientId::new("  ID-829-441  ").unwrap();
        assert_eq!(id.as_str(), "ID-829-441");
        assert_eq!(id.to_string(), "ID-829-441");
    }

    #[test]
    fn test_client_id_rejects_empty() {
        assert_eq!(ClientId::new(""), Err(ClientIdError::Empty));
        assert_eq!(ClientId::new("   "), Err(ClientIdError::Empty));
    }

    #[test]
    fn test_client_id_rejects_too_long() {
        let long = "9".repeat(ClientId::MAX_LEN + 1);
        assert_eq!(ClientId::new(long), Err(ClientIdError::TooLong));
    }

    #[test]
    fn test_client_id_rejects_control_characters() {
        assert_eq!(
            ClientId::new("AB\u{0007}12"),
            Err(ClientIdError::ControlCharacters)
        );
    }

    #[test]
    fn test_client_id_equality_after_normalization() {
        assert_eq!(
            ClientId::new("X-100").unwrap(),
            ClientId::new(" X-100 ").unwrap()
        );
    }

    #[test]
    fn test_user_id_unique_and_parseable() {
        let a = UserId::new();
        let b = UserId::new();
        assert_ne!(a, b);

        let parsed: UserId = a.to_string().parse().unwrap();
        assert_eq!(parsed, a);
    }
}
