//! Convenient imports for Tellerbank.
//!
//! ```
//! use tellerbank::prelude::*;
//!
//! let bank = Bank::builder().num_branches(2).accounts_per_branch(4).build()?;
//! validate(&bank)?;
//! # Ok::<(), tellerbank::Error>(())
//! ```

// Main entry point
pub use tellerbank_engine::{Bank, BankBuilder, BankConfig};

// Error handling
pub use crate::error::{Error, Result};
pub use tellerbank_engine::{ConsistencyError, ResultCode, TellerError, TellerResult};

// Core types
pub use tellerbank_engine::{AccountAmount, AccountNumber, BranchId};

// Oracle
pub use tellerbank_engine::{compare, validate, BankSnapshot, LedgerStats};
