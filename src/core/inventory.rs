use crate::core::{Denomination, Result};
use crate::utils::error::AtmError;
use std::collections::BTreeMap;

/// Bills loaded in the machine, one count per denomination.
///
/// Kept in a `BTreeMap` so the dispenser can walk denominations from the
/// largest down without sorting on every withdrawal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CashInventory {
    bills: BTreeMap<Denomination, u64>,
}

impl CashInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` bills of `denomination`. Adding zero bills is a no-op and
    /// does not register the denomination.
    pub fn add_bills(&mut self, denomination: Denomination, count: u64) -> Result<()> {
        if count == 0 {
            return Ok(());
        }

        let current = self.bills.get(&denomination).copied().unwrap_or(0);
        let updated = current
            .checked_add(count)
            .ok_or(AtmError::InventoryOverflow {
                denomination,
                count,
            })?;
        self.bills.insert(denomination, updated);

        tracing::debug!("Loaded {} x {} (now {})", count, denomination, updated);
        Ok(())
    }

    /// Loads several cassettes at once. Stops at the first rejected entry;
    /// entries before it stay loaded.
    pub fn add_nominals<I>(&mut self, nominals: I) -> Result<()>
    where
        I: IntoIterator<Item = (Denomination, u64)>,
    {
        for (denomination, count) in nominals {
            self.add_bills(denomination, count)?;
        }
        Ok(())
    }

    /// Denominations currently held, strictly descending.
    pub fn sorted_denominations(&self) -> Vec<Denomination> {
        self.bills.keys().rev().copied().collect()
    }

    pub fn count(&self, denomination: Denomination) -> Option<u64> {
        self.bills.get(&denomination).copied()
    }

    /// Entries from the largest denomination down.
    pub fn iter(&self) -> impl Iterator<Item = (Denomination, u64)> + '_ {
        self.bills.iter().rev().map(|(d, c)| (*d, *c))
    }

    /// Face value of everything loaded. Saturates instead of overflowing.
    pub fn total_value(&self) -> u64 {
        self.bills.iter().fold(0u64, |acc, (d, count)| {
            acc.saturating_add(u64::from(d.value()).saturating_mul(*count))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.bills.is_empty()
    }

    pub(crate) fn take(&mut self, denomination: Denomination, count: u64) {
        if let Some(available) = self.bills.get_mut(&denomination) {
            *available = available.saturating_sub(count);
        }
    }
}
