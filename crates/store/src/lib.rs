//! In-memory implementation of the Mikopo storage port.
//!
//! Provides the atomicity guarantees the ledger core requires: a payment's
//! balance update and its entries commit under one write guard, and cash
//! movements append atomically. Production would back the same port with a
//! durable database; the integration and concurrency suites for the ledger
//! run against this implementation.

pub mod memory;

pub use memory::MemoryStore;
