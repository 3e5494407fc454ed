//! Core types for the teller bank
//!
//! This crate defines the vocabulary shared by every other crate:
//! - [`AccountNumber`] / [`BranchId`]: identifiers with a load-bearing ordering
//! - [`AccountAmount`]: signed balance quantity
//! - [`TellerError`] / [`ConsistencyError`]: failure taxonomy
//! - [`BankConfig`]: construction parameters

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod types;

pub use config::BankConfig;
pub use error::{ConsistencyError, ResultCode, TellerError, TellerResult};
pub use types::{AccountAmount, AccountNumber, BranchId};
