//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Ledger tuning.
    #[serde(default)]
    pub ledger: LedgerConfig,
}

/// Policy applied when a payment exceeds the outstanding balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverpaymentPolicy {
    /// Reject the payment outright. The default.
    Reject,
    /// Accept the payment, drive the balance to exactly zero, and record the
    /// surplus as a distinct reconciling entry.
    ClampToZero,
}

/// Ledger tuning knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// How long a balance-mutating operation waits for its per-account lock
    /// before failing busy, in milliseconds.
    #[serde(default = "default_lock_wait_ms")]
    pub lock_wait_ms: u64,
    /// Over-payment handling policy.
    #[serde(default = "default_overpayment_policy")]
    pub overpayment_policy: OverpaymentPolicy,
}

fn default_lock_wait_ms() -> u64 {
    500
}

fn default_overpayment_policy() -> OverpaymentPolicy {
    OverpaymentPolicy::Reject
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            lock_wait_ms: default_lock_wait_ms(),
            overpayment_policy: default_overpayment_policy(),
        }
    }
}

impl LedgerConfig {
    /// Returns the lock wait as a [`std::time::Duration`].
    #[must_use]
    pub const fn lock_wait(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.lock_wait_ms)
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("MIKOPO").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
