use crate::adapters::LedgerBank;
use crate::core::{CashInventory, CommitPolicy, Denomination, DispenseCalculator};
use crate::utils::error::{AtmError, Result};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineConfig {
    pub machine: MachineInfo,
    pub bank: BankConfig,
    pub health: Option<HealthConfig>,
    #[serde(default)]
    pub inventory: Vec<CassetteConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineInfo {
    pub name: String,
    pub commit_policy: Option<CommitPolicy>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankConfig {
    pub account: String,
    pub balance: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CassetteConfig {
    pub denomination: u32,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: Option<LogFormat>,
}

impl MachineConfig {
    /// Reads and parses a machine file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR}` with the environment value. Unset variables are left
    /// as written so the parse error points at them.
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("static regex is valid")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn commit_policy(&self) -> CommitPolicy {
        self.machine.commit_policy.unwrap_or_default()
    }

    pub fn log_format(&self) -> LogFormat {
        self.logging
            .as_ref()
            .and_then(|l| l.format)
            .unwrap_or_default()
    }

    pub fn base_url(&self) -> Result<&str> {
        self.health
            .as_ref()
            .map(|h| h.base_url.as_str())
            .ok_or_else(|| AtmError::MissingConfigError {
                field: "health.base_url".to_string(),
            })
    }

    pub fn build_inventory(&self) -> Result<CashInventory> {
        let mut inventory = CashInventory::new();
        for cassette in &self.inventory {
            inventory.add_bills(Denomination::new(cassette.denomination)?, cassette.count)?;
        }
        Ok(inventory)
    }

    pub fn build_bank(&self) -> LedgerBank {
        LedgerBank::new(self.bank.account.clone(), self.bank.balance)
    }

    /// Ready-to-use machine: ledger bank, loaded cassettes, configured policy.
    pub fn build_dispenser(&self) -> Result<DispenseCalculator<LedgerBank>> {
        let inventory = self.build_inventory()?;
        Ok(DispenseCalculator::with_inventory(self.build_bank(), inventory)
            .with_policy(self.commit_policy()))
    }
}

impl Validate for MachineConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("machine.name", &self.machine.name)?;
        validation::validate_non_empty_string("bank.account", &self.bank.account)?;

        for cassette in &self.inventory {
            validation::validate_positive_number(
                "inventory.denomination",
                u64::from(cassette.denomination),
                1,
            )?;
        }
        validation::validate_unique(
            "inventory.denomination",
            self.inventory.iter().map(|c| c.denomination),
        )?;

        if let Some(health) = &self.health {
            validation::validate_url("health.base_url", &health.base_url)?;
        }

        Ok(())
    }
}
