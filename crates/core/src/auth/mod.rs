//! Staff registration and password hashing.

pub mod password;
pub mod staff;

pub use password::{hash_password, verify_password, PasswordError};
pub use staff::{AuthError, RegisterStaffInput, StaffService, StaffUser};
