pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::{check_health, AccountAuthorizer, HealthReport, LedgerBank};
pub use config::MachineConfig;
pub use core::{
    AuthorizationProvider, BalanceProvider, CashInventory, CommitPolicy, Denomination,
    DispenseCalculator, WithdrawalResult,
};
pub use utils::error::{AtmError, Result};
