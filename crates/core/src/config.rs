//! Bank construction parameters

use crate::error::{TellerError, TellerResult};
use crate::types::AccountAmount;
use serde::{Deserialize, Serialize};

/// Parameters for building a bank
///
/// `reporting_threshold` and `num_workers` configure the orchestration around
/// the teller; the teller itself only uses the threshold for logging.
///
/// # Examples
///
/// ```
/// use tellerbank_core::BankConfig;
///
/// let config = BankConfig::from_json(r#"{"num_branches": 4, "accounts_per_branch": 16}"#).unwrap();
/// assert_eq!(config.num_branches, 4);
/// assert_eq!(config.initial_amount, BankConfig::default().initial_amount);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankConfig {
    /// Number of branches
    pub num_branches: u32,
    /// Number of accounts in each branch
    pub accounts_per_branch: u32,
    /// Opening balance of every account
    pub initial_amount: AccountAmount,
    /// Balance below which a withdrawal is reported
    pub reporting_threshold: AccountAmount,
    /// Size of the worker pool driving the bank
    pub num_workers: u32,
}

impl Default for BankConfig {
    fn default() -> Self {
        BankConfig {
            num_branches: 1,
            accounts_per_branch: 1,
            initial_amount: 1000,
            reporting_threshold: 0,
            num_workers: 1,
        }
    }
}

impl BankConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Check the parameters can build a bank
    pub fn validate(&self) -> TellerResult<()> {
        if self.num_branches == 0 {
            return Err(TellerError::InvalidConfig("num_branches must be > 0".into()));
        }
        if self.accounts_per_branch == 0 {
            return Err(TellerError::InvalidConfig(
                "accounts_per_branch must be > 0".into(),
            ));
        }
        if self.num_workers == 0 {
            return Err(TellerError::InvalidConfig("num_workers must be > 0".into()));
        }
        if self.initial_amount < 0 {
            return Err(TellerError::InvalidConfig(format!(
                "initial_amount must be >= 0, got {}",
                self.initial_amount
            )));
        }
        self.initial_total()?;
        Ok(())
    }

    /// Total money in a freshly built bank, or an error if it overflows
    pub fn initial_total(&self) -> TellerResult<AccountAmount> {
        let accounts = i64::from(self.num_branches) * i64::from(self.accounts_per_branch);
        accounts.checked_mul(self.initial_amount).ok_or_else(|| {
            TellerError::InvalidConfig(format!(
                "{} accounts of {} overflow the bank total",
                accounts, self.initial_amount
            ))
        })
    }
}
