use crate::utils::error::{AtmError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Face value of a bill. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Denomination(u32);

impl Denomination {
    pub fn new(value: u32) -> Result<Self> {
        if value == 0 {
            return Err(AtmError::InvalidDenomination { value: 0 });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Denomination {
    type Error = AtmError;

    fn try_from(value: u32) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Denomination> for u32 {
    fn from(denomination: Denomination) -> Self {
        denomination.0
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bills handed out by one successful withdrawal, keyed by denomination.
///
/// Only positive counts are stored, and the values always sum to the
/// requested amount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WithdrawalResult {
    bills: BTreeMap<Denomination, u64>,
}

impl WithdrawalResult {
    pub(crate) fn record(&mut self, denomination: Denomination, count: u64) {
        if count > 0 {
            *self.bills.entry(denomination).or_insert(0) += count;
        }
    }

    pub fn count(&self, denomination: Denomination) -> Option<u64> {
        self.bills.get(&denomination).copied()
    }

    pub fn total(&self) -> u64 {
        self.bills
            .iter()
            .map(|(d, count)| u64::from(d.value()) * count)
            .sum()
    }

    pub fn bill_count(&self) -> u64 {
        self.bills.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bills.is_empty()
    }

    /// Entries from the largest denomination down.
    pub fn iter(&self) -> impl Iterator<Item = (Denomination, u64)> + '_ {
        self.bills.iter().rev().map(|(d, c)| (*d, *c))
    }

    pub fn into_map(self) -> BTreeMap<Denomination, u64> {
        self.bills
    }

    /// JSON object keyed by denomination, e.g. `{"100":10}`.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl fmt::Display for WithdrawalResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(d, count)| format!("{} x {}", count, d))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}
