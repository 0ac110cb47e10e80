use atm_dispenser::{
    AccountAuthorizer, AtmError, AuthorizationProvider, BalanceProvider, CashInventory,
    CommitPolicy, Denomination, DispenseCalculator, LedgerBank,
};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Bank double that answers a fixed verdict and records every amount asked.
struct MockBank {
    approve: bool,
    calls: Mutex<Vec<u64>>,
}

impl MockBank {
    fn new(approve: bool) -> Self {
        Self {
            approve,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn times_called_with(&self, amount: u64) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|&&a| a == amount)
            .count()
    }

    fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl AuthorizationProvider for MockBank {
    fn authorize(&self, amount: u64) -> bool {
        self.calls.lock().unwrap().push(amount);
        self.approve
    }
}

fn d(value: u32) -> Denomination {
    Denomination::new(value).unwrap()
}

fn as_map(entries: &[(u32, u64)]) -> BTreeMap<Denomination, u64> {
    entries.iter().map(|(v, c)| (d(*v), *c)).collect()
}

fn full_cassettes() -> CashInventory {
    let mut inventory = CashInventory::new();
    inventory
        .add_nominals([
            (d(100), 100),
            (d(50), 200),
            (d(20), 300),
            (d(10), 400),
            (d(5), 500),
            (d(2), 600),
            (d(1), 700),
        ])
        .unwrap();
    inventory
}

#[test]
fn test_withdraw_when_bank_approves_returns_biggest_bill() {
    let bank = MockBank::new(true);
    let mut atm = DispenseCalculator::new(&bank);
    atm.inventory_mut().add_bills(d(100), 1).unwrap();

    let result = atm.withdraw(100).unwrap();

    assert_eq!(result.into_map(), as_map(&[(100, 1)]));
    assert_eq!(bank.times_called_with(100), 1);
    assert_eq!(bank.total_calls(), 1);
}

#[test]
fn test_withdraw_when_bank_refuses_fails_without_touching_inventory() {
    let bank = MockBank::new(false);
    let mut atm = DispenseCalculator::new(&bank);
    atm.inventory_mut().add_bills(d(100), 1).unwrap();

    let err = atm.withdraw(100).unwrap_err();

    assert!(matches!(err, AtmError::AuthorizationDenied { amount: 100 }));
    assert_eq!(
        err.to_string(),
        "Insufficient funds in bank: withdrawal of 100 was not authorized"
    );
    assert_eq!(bank.times_called_with(100), 1);
    assert_eq!(atm.inventory().count(d(100)), Some(1));
}

#[test]
fn test_withdraw_when_atm_short_consumes_bill_under_partial_policy() {
    let bank = MockBank::new(true);
    let mut atm = DispenseCalculator::new(&bank).with_policy(CommitPolicy::Partial);
    atm.inventory_mut().add_bills(d(100), 1).unwrap();

    let err = atm.withdraw(200).unwrap_err();

    assert!(matches!(
        err,
        AtmError::InsufficientInventory {
            requested: 200,
            shortfall: 100
        }
    ));
    assert!(err.to_string().starts_with("Insufficient funds in ATM"));
    assert_eq!(bank.times_called_with(200), 1);
    // The single 100 was picked before the shortfall showed up.
    assert_eq!(atm.inventory().count(d(100)), Some(0));
}

#[test]
fn test_withdraw_when_atm_short_keeps_inventory_under_atomic_policy() {
    let bank = MockBank::new(true);
    let mut atm = DispenseCalculator::new(&bank);
    atm.inventory_mut().add_bills(d(100), 1).unwrap();

    let err = atm.withdraw(200).unwrap_err();

    assert!(matches!(err, AtmError::InsufficientInventory { .. }));
    assert_eq!(bank.times_called_with(200), 1);
    assert_eq!(atm.inventory().count(d(100)), Some(1));
}

#[test]
fn test_withdraw_from_full_cassettes_uses_only_hundreds() {
    let bank = MockBank::new(true);
    let mut atm = DispenseCalculator::with_inventory(&bank, full_cassettes());

    let result = atm.withdraw(1000).unwrap();

    assert_eq!(result.into_map(), as_map(&[(100, 10)]));
}

#[test]
fn test_withdraw_with_balance_lookup_bank() {
    struct FixedBalanceBank;
    impl BalanceProvider for FixedBalanceBank {
        fn balance(&self, account: &str) -> u64 {
            if account == "123456" {
                15_949_879
            } else {
                0
            }
        }
    }

    let mut atm = DispenseCalculator::with_inventory(
        AccountAuthorizer::new(FixedBalanceBank, "123456"),
        full_cassettes(),
    );
    let result = atm.withdraw(1000).unwrap();
    assert_eq!(result.into_map(), as_map(&[(100, 10)]));

    let mut stranger = DispenseCalculator::with_inventory(
        AccountAuthorizer::new(FixedBalanceBank, "000000"),
        full_cassettes(),
    );
    assert!(matches!(
        stranger.withdraw(1000),
        Err(AtmError::AuthorizationDenied { amount: 1000 })
    ));
}

#[test]
fn test_results_always_sum_to_request_and_respect_stock() {
    let bank = MockBank::new(true);

    for amount in [1u64, 3, 7, 19, 88, 99, 101, 187, 999, 1234, 5678] {
        let original = full_cassettes();
        let mut atm = DispenseCalculator::with_inventory(&bank, original.clone());

        let result = atm.withdraw(amount).unwrap();

        assert_eq!(result.total(), amount, "amount {}", amount);
        for (denomination, count) in result.iter() {
            assert!(count > 0);
            assert!(count <= original.count(denomination).unwrap());
            assert_eq!(
                atm.inventory().count(denomination).unwrap(),
                original.count(denomination).unwrap() - count
            );
        }
    }
}

#[test]
fn test_unrepresentable_amount_fails_under_both_policies() {
    let bank = MockBank::new(true);
    let mut stock = CashInventory::new();
    stock.add_nominals([(d(50), 2), (d(20), 2)]).unwrap();

    let mut atomic = DispenseCalculator::with_inventory(&bank, stock.clone());
    assert!(atomic.withdraw(75).is_err());
    assert_eq!(atomic.inventory(), &stock);

    let mut partial =
        DispenseCalculator::with_inventory(&bank, stock.clone()).with_policy(CommitPolicy::Partial);
    let err = partial.withdraw(75).unwrap_err();
    assert!(err.may_have_mutated_inventory());
    // 75 -> one 50, one 20, 5 stranded.
    assert_eq!(partial.inventory().count(d(50)), Some(1));
    assert_eq!(partial.inventory().count(d(20)), Some(1));
}

#[test]
fn test_ledger_bank_debits_across_withdrawals() {
    let bank = LedgerBank::new("123456", 250);
    let mut atm = DispenseCalculator::with_inventory(&bank, full_cassettes());

    assert!(atm.withdraw(200).is_ok());
    assert_eq!(bank.current_balance(), 50);

    let err = atm.withdraw(100).unwrap_err();
    assert!(matches!(err, AtmError::AuthorizationDenied { amount: 100 }));
    assert_eq!(atm.inventory().count(d(100)), Some(98));
}

#[test]
fn test_ledger_bank_stays_debited_when_atomic_withdrawal_falls_short() {
    let bank = LedgerBank::new("123456", 1000);
    let mut atm = DispenseCalculator::new(&bank);
    atm.inventory_mut().add_bills(d(100), 1).unwrap();

    let err = atm.withdraw(200).unwrap_err();

    assert!(matches!(err, AtmError::InsufficientInventory { .. }));
    // Cassettes are rolled back, the bank debit is not.
    assert_eq!(atm.inventory().count(d(100)), Some(1));
    assert_eq!(bank.current_balance(), 800);
}
