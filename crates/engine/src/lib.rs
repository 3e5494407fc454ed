//! Teller engine
//!
//! Owns the bank structure and the operations that mutate it:
//! - [`Account`], [`Branch`], [`Bank`]: balance cells and their owners
//! - teller operations: [`Bank::deposit`], [`Bank::withdraw`], [`Bank::transfer`]
//! - oracle: [`validate`], [`compare`], [`BankSnapshot`]
//!
//! ## Lock Order
//!
//! ```text
//! accounts (ascending AccountNumber)
//!   < branches (ascending BranchId)
//!   < money lock
//! ```
//!
//! Every operation acquires a subset of these locks in that order and releases
//! them in reverse by dropping guards.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod account;
mod bank;
mod branch;
mod ledger;
mod oracle;
mod snapshot;
mod teller;

pub use account::Account;
pub use bank::{Bank, BankBuilder};
pub use branch::Branch;
pub use ledger::LedgerStats;
pub use oracle::{compare, validate};
pub use snapshot::{AccountSnapshot, BankSnapshot, BranchSnapshot};

pub use tellerbank_core::{
    AccountAmount, AccountNumber, BankConfig, BranchId, ConsistencyError, ResultCode,
    TellerError, TellerResult,
};
