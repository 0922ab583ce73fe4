//! Ledger configuration.
//!
//! Passed explicitly to the registry at construction; nothing here reads
//! process-wide state.

use serde::{Deserialize, Serialize};

use crate::{Amount, CurrencyTag, Result, SplitledgerError, constants};

/// Configuration for a SplitLedger registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Currency used for parties created without a preference and for
    /// groups created with no members.
    pub default_currency: CurrencyTag,
    /// Value every member receives when a ledger is initialised.
    pub opening_balance: Amount,
}

impl LedgerConfig {
    /// Config with a specific default currency.
    #[must_use]
    pub fn with_currency(currency: impl Into<String>) -> Self {
        Self {
            default_currency: CurrencyTag::new(currency),
            ..Self::default()
        }
    }

    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json(doc: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(doc)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject configurations the registry cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.default_currency.is_empty() {
            return Err(SplitledgerError::Configuration(
                "default_currency must not be empty".into(),
            ));
        }
        Ok(())
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            default_currency: CurrencyTag::default(),
            opening_balance: constants::DEFAULT_OPENING_BALANCE,
        }
    }
}
