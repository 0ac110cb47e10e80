use crate::core::{AuthorizationProvider, CashInventory, Result, WithdrawalResult};
use crate::utils::error::AtmError;
use serde::{Deserialize, Serialize};

/// What happens to the inventory when a withdrawal cannot be fully covered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitPolicy {
    /// Bills are removed only once the whole amount is covered. The bank has
    /// already been asked by then, so a bank that debits on approval (such as
    /// `LedgerBank`) stays debited when the withdrawal fails on a shortfall.
    #[default]
    Atomic,
    /// Bills picked before the shortfall is detected stay removed.
    Partial,
}

/// Greedy largest-bill-first cash dispenser.
pub struct DispenseCalculator<A: AuthorizationProvider> {
    authorizer: A,
    inventory: CashInventory,
    policy: CommitPolicy,
}

impl<A: AuthorizationProvider> DispenseCalculator<A> {
    pub fn new(authorizer: A) -> Self {
        Self::with_inventory(authorizer, CashInventory::new())
    }

    pub fn with_inventory(authorizer: A, inventory: CashInventory) -> Self {
        Self {
            authorizer,
            inventory,
            policy: CommitPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: CommitPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> CommitPolicy {
        self.policy
    }

    pub fn inventory(&self) -> &CashInventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut CashInventory {
        &mut self.inventory
    }

    pub fn authorizer(&self) -> &A {
        &self.authorizer
    }

    pub fn into_parts(self) -> (A, CashInventory) {
        (self.authorizer, self.inventory)
    }

    /// Dispenses `amount` using as many large bills as possible.
    ///
    /// The bank is asked once, before any bill is picked. A refusal leaves
    /// the inventory untouched. If the bills cannot cover the amount exactly
    /// the call fails with [`AtmError::InsufficientInventory`]; under
    /// [`CommitPolicy::Partial`] the bills picked up to that point are gone.
    pub fn withdraw(&mut self, amount: u64) -> Result<WithdrawalResult> {
        if amount == 0 {
            tracing::debug!("Zero withdrawal requested, nothing to dispense");
            return Ok(WithdrawalResult::default());
        }

        if !self.authorizer.authorize(amount) {
            tracing::warn!("Bank refused withdrawal of {}", amount);
            return Err(AtmError::AuthorizationDenied { amount });
        }

        let (result, shortfall) = plan_greedy(&self.inventory, amount);

        if shortfall > 0 {
            if self.policy == CommitPolicy::Partial {
                self.commit(&result);
                tracing::warn!(
                    "Partial depletion: {} bills removed before shortfall",
                    result.bill_count()
                );
            }
            tracing::warn!(
                "Cannot dispense {}: {} left uncovered ({:?} policy)",
                amount,
                shortfall,
                self.policy
            );
            return Err(AtmError::InsufficientInventory {
                requested: amount,
                shortfall,
            });
        }

        self.commit(&result);
        tracing::info!("Dispensed {}: {}", amount, result);
        Ok(result)
    }

    fn commit(&mut self, result: &WithdrawalResult) {
        for (denomination, count) in result.iter() {
            self.inventory.take(denomination, count);
        }
    }
}

/// Walks the inventory from the largest bill down and returns the bills it
/// would hand out plus whatever is left uncovered.
///
/// Each denomination is visited once and only its own count decides how many
/// bills are taken, so committing this plan afterwards leaves the inventory in
/// the same state as decrementing during the walk.
fn plan_greedy(inventory: &CashInventory, amount: u64) -> (WithdrawalResult, u64) {
    let mut result = WithdrawalResult::default();
    let mut remaining = amount;

    for (denomination, available) in inventory.iter() {
        if remaining == 0 {
            break;
        }

        let face = u64::from(denomination.value());
        let take = (remaining / face).min(available);
        if take > 0 {
            tracing::debug!("Taking {} x {} ({} available)", take, denomination, available);
            result.record(denomination, take);
            remaining -= take * face;
        }
    }

    (result, remaining)
}
