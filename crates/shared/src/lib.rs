//! Shared types, errors, and configuration for Mikopo.
//!
//! This crate provides common types used across all other crates:
//! - Money type with exact decimal precision
//! - Validated identifiers for clients and staff users
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, LedgerConfig, OverpaymentPolicy};
pub use error::{AppError, AppResult};
