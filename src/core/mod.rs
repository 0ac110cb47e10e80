pub mod dispenser;
pub mod inventory;

pub use crate::core::dispenser::{CommitPolicy, DispenseCalculator};
pub use crate::core::inventory::CashInventory;
pub use crate::domain::model::{Denomination, WithdrawalResult};
pub use crate::domain::ports::{AuthorizationProvider, BalanceProvider};
pub use crate::utils::error::Result;
