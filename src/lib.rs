//! # Tellerbank
//!
//! A bank of branches and accounts shared by many worker threads performing
//! deposits, withdrawals and transfers.
//!
//! Correctness rests on one locking protocol: every operation takes the locks
//! it needs in a single global order (accounts by number, then branches by
//! id, then the bank's money lock) and releases them in reverse. That order
//! rules out circular waits, so any mix of concurrent operations completes.
//!
//! ## Quick Start
//!
//! ```
//! use tellerbank::prelude::*;
//!
//! let bank = Bank::init(1, 2, 0, 0, 1)?;
//! let a = AccountNumber::new(BranchId::new(0), 0);
//! let b = AccountNumber::new(BranchId::new(0), 1);
//!
//! bank.deposit(a, 100)?;
//! bank.deposit(b, 50)?;
//! bank.transfer(a, b, 30)?;
//! bank.transfer(b, a, 20)?;
//!
//! assert_eq!(bank.lookup(a).unwrap().balance(), 90);
//! assert_eq!(bank.lookup(b).unwrap().balance(), 60);
//! validate(&bank)?;
//! # Ok::<(), tellerbank::Error>(())
//! ```
//!
//! ## Crates
//!
//! - `tellerbank-core`: identifiers, amounts, errors, configuration
//! - `tellerbank-concurrency`: canonical-order lock acquisition
//! - `tellerbank-engine`: bank structure, teller operations, oracle

#![warn(missing_docs)]

mod error;

pub mod prelude;

pub use error::{Error, Result};

pub use tellerbank_concurrency::{lock_in_order, OrderedGuards, OrderedPair};
pub use tellerbank_engine::{
    compare, validate, Account, AccountAmount, AccountNumber, AccountSnapshot, Bank,
    BankBuilder, BankConfig, BankSnapshot, Branch, BranchId, BranchSnapshot, ConsistencyError,
    LedgerStats, ResultCode, TellerError, TellerResult,
};

/// Build a bank from a JSON configuration
///
/// ```
/// let bank = tellerbank::open_from_json(r#"{"num_branches": 2, "accounts_per_branch": 3}"#)?;
/// assert_eq!(bank.num_accounts(), 6);
/// # Ok::<(), tellerbank::Error>(())
/// ```
pub fn open_from_json(json: &str) -> Result<Bank> {
    let config = BankConfig::from_json(json)?;
    Ok(Bank::from_config(config)?)
}
