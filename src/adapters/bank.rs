use crate::core::{AuthorizationProvider, BalanceProvider};
use std::sync::Mutex;

/// In-process bank holding a single account balance.
///
/// An approved withdrawal is debited immediately, the way a card network
/// places a hold before the cash comes out.
#[derive(Debug)]
pub struct LedgerBank {
    account: String,
    balance: Mutex<u64>,
}

impl LedgerBank {
    pub fn new(account: impl Into<String>, balance: u64) -> Self {
        Self {
            account: account.into(),
            balance: Mutex::new(balance),
        }
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn current_balance(&self) -> u64 {
        self.balance.lock().map(|b| *b).unwrap_or(0)
    }
}

impl AuthorizationProvider for LedgerBank {
    fn authorize(&self, amount: u64) -> bool {
        let Ok(mut balance) = self.balance.lock() else {
            tracing::error!("Ledger for account {} is poisoned", self.account);
            return false;
        };

        if *balance < amount {
            tracing::debug!(
                "Account {} balance {} below requested {}",
                self.account,
                *balance,
                amount
            );
            return false;
        }

        *balance -= amount;
        tracing::debug!("Account {} debited {}, balance {}", self.account, amount, *balance);
        true
    }
}

impl BalanceProvider for LedgerBank {
    fn balance(&self, account: &str) -> u64 {
        if account == self.account {
            self.current_balance()
        } else {
            0
        }
    }
}

/// Approves withdrawals for one account by reading its balance.
pub struct AccountAuthorizer<B: BalanceProvider> {
    provider: B,
    account: String,
}

impl<B: BalanceProvider> AccountAuthorizer<B> {
    pub fn new(provider: B, account: impl Into<String>) -> Self {
        Self {
            provider,
            account: account.into(),
        }
    }

    pub fn account(&self) -> &str {
        &self.account
    }
}

impl<B: BalanceProvider> AuthorizationProvider for AccountAuthorizer<B> {
    fn authorize(&self, amount: u64) -> bool {
        let balance = self.provider.balance(&self.account);
        tracing::debug!("Account {} balance {}", self.account, balance);
        balance >= amount
    }
}
