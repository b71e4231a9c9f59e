//! Lifecycle configuration loaded from environment variables.

use domain::Money;

/// Orchestrator configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `DEPOSIT_CENTS` — flat deposit charged on online orders (default: `2000`)
#[derive(Debug, Clone)]
pub struct Config {
    /// Deposit amount for online orders. Flat, because the real total is
    /// unknown until inspection prices the services.
    pub deposit: Money,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let deposit_cents = std::env::var("DEPOSIT_CENTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(2000);
        Self {
            deposit: Money::from_cents(deposit_cents),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            deposit: Money::from_cents(2000),
        }
    }
}
