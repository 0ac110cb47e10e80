/// Bank-side approval of a withdrawal.
///
/// The dispenser asks exactly once per withdrawal, before it touches any
/// bills. Implementations may debit the account on approval.
pub trait AuthorizationProvider: Send + Sync {
    fn authorize(&self, amount: u64) -> bool;
}

/// Bank that only exposes account balances.
pub trait BalanceProvider: Send + Sync {
    fn balance(&self, account: &str) -> u64;
}

impl<T: AuthorizationProvider + ?Sized> AuthorizationProvider for &T {
    fn authorize(&self, amount: u64) -> bool {
        (**self).authorize(amount)
    }
}

impl<T: AuthorizationProvider + ?Sized> AuthorizationProvider for Box<T> {
    fn authorize(&self, amount: u64) -> bool {
        (**self).authorize(amount)
    }
}

impl<T: BalanceProvider + ?Sized> BalanceProvider for &T {
    fn balance(&self, account: &str) -> u64 {
        (**self).balance(account)
    }
}
