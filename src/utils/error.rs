use crate::domain::model::Denomination;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtmError {
    #[error("Insufficient funds in bank: withdrawal of {amount} was not authorized")]
    AuthorizationDenied { amount: u64 },

    #[error("Insufficient funds in ATM: cannot dispense {requested}, {shortfall} left uncovered")]
    InsufficientInventory { requested: u64, shortfall: u64 },

    #[error("Invalid denomination: {value}")]
    InvalidDenomination { value: u64 },

    #[error("Inventory overflow: adding {count} bills of {denomination} exceeds capacity")]
    InventoryOverflow {
        denomination: Denomination,
        count: u64,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authorization,
    Inventory,
    Configuration,
    Network,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl AtmError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AtmError::AuthorizationDenied { .. } => ErrorCategory::Authorization,
            AtmError::InsufficientInventory { .. }
            | AtmError::InvalidDenomination { .. }
            | AtmError::InventoryOverflow { .. } => ErrorCategory::Inventory,
            AtmError::TomlError(_)
            | AtmError::InvalidConfigValueError { .. }
            | AtmError::MissingConfigError { .. }
            | AtmError::UrlError(_) => ErrorCategory::Configuration,
            AtmError::HttpError(_) => ErrorCategory::Network,
            AtmError::IoError(_) | AtmError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Authorization => ErrorSeverity::Medium,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Inventory | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Whether the failed call may have left the inventory partially depleted.
    pub fn may_have_mutated_inventory(&self) -> bool {
        matches!(self, AtmError::InsufficientInventory { .. })
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            AtmError::AuthorizationDenied { .. } => {
                "Check the account balance or request a smaller amount".to_string()
            }
            AtmError::InsufficientInventory { .. } => {
                "Request an amount the loaded denominations can cover, or refill the cassettes"
                    .to_string()
            }
            AtmError::InvalidDenomination { .. } => {
                "Denominations must be positive bill values".to_string()
            }
            AtmError::InventoryOverflow { .. } => {
                "Load fewer bills into a single cassette".to_string()
            }
            AtmError::TomlError(_) => "Make sure the machine file is valid TOML".to_string(),
            AtmError::InvalidConfigValueError { .. }
            | AtmError::MissingConfigError { .. } => {
                "Fix the machine file and run again".to_string()
            }
            AtmError::UrlError(_) => "Use an absolute http(s) base_url".to_string(),
            AtmError::HttpError(_) => {
                "Check that the service is running and reachable".to_string()
            }
            AtmError::IoError(_) => "Check that the file exists and is readable".to_string(),
            AtmError::SerializationError(_) => "Retry without --json".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AtmError::AuthorizationDenied { amount } => {
                format!("The bank declined the withdrawal of {}", amount)
            }
            AtmError::InsufficientInventory { requested, .. } => {
                format!("This machine cannot dispense exactly {}", requested)
            }
            AtmError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration problem in {}: {}", field, reason)
            }
            AtmError::MissingConfigError { field } => {
                format!("Configuration is missing {}", field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AtmError>;
