//! Ledger service facade, error taxonomy, and storage port.
//!
//! This module is the external surface of the core:
//! - Error taxonomy with stable boundary-facing codes
//! - The storage port the service consumes
//! - The service orchestrating loans, payments, and cash movements

pub mod error;
pub mod service;
pub mod store;

pub use error::LedgerError;
pub use service::LedgerService;
pub use store::{LedgerStore, StaffStore, StoreError};
