// Adapters layer: concrete implementations for external systems (bank, http).

pub mod bank;
pub mod health;

pub use bank::{AccountAuthorizer, LedgerBank};
pub use health::{check_health, HealthReport};
