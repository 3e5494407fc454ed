//! Error types for teller operations and consistency checks

use crate::types::{AccountAmount, AccountNumber, BranchId};
use thiserror::Error;

/// Failure of a teller operation or of bank construction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TellerError {
    /// The account number does not resolve. Detected before any lock is taken.
    #[error("account {account} not found")]
    AccountNotFound {
        /// Number that failed to resolve
        account: AccountNumber,
    },

    /// The source balance does not cover the amount.
    ///
    /// Detected with all locks held; nothing was mutated.
    #[error("insufficient funds in {account}: requested {requested}, available {available}")]
    InsufficientFunds {
        /// Account that would have been overdrawn
        account: AccountNumber,
        /// Amount asked for
        requested: AccountAmount,
        /// Balance observed under lock
        available: AccountAmount,
    },

    /// Caller passed a negative amount. Rejected before any lock is taken.
    #[error("negative amount {amount}")]
    NegativeAmount {
        /// Offending amount
        amount: AccountAmount,
    },

    /// Applying the amount would overflow a balance, aggregate or bank total.
    #[error("balance overflow applying to {account}")]
    BalanceOverflow {
        /// Account whose adjustment overflowed
        account: AccountNumber,
    },

    /// Construction parameters are unusable
    #[error("invalid bank configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for teller operations
pub type TellerResult<T> = std::result::Result<T, TellerError>;

/// Integer-style result codes for hosts that want them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultCode {
    /// Operation applied
    Success,
    /// Referenced account does not exist
    AccountNotFound,
    /// Source account could not cover the amount
    InsufficientFunds,
    /// Caller contract violation (negative amount, overflow, bad config)
    InvalidArgument,
}

impl TellerError {
    /// Map onto the coarse result code
    pub fn code(&self) -> ResultCode {
        match self {
            TellerError::AccountNotFound { .. } => ResultCode::AccountNotFound,
            TellerError::InsufficientFunds { .. } => ResultCode::InsufficientFunds,
            TellerError::NegativeAmount { .. }
            | TellerError::BalanceOverflow { .. }
            | TellerError::InvalidConfig(_) => ResultCode::InvalidArgument,
        }
    }
}

impl ResultCode {
    /// Collapse a teller result into its code
    pub fn of<T>(result: &TellerResult<T>) -> Self {
        match result {
            Ok(_) => ResultCode::Success,
            Err(e) => e.code(),
        }
    }
}

/// Structural inconsistency found by the oracle
///
/// Never produced by a correct locking protocol; it exists to catch bugs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyError {
    /// Stored branch aggregate differs from the sum of its accounts
    #[error("{branch}: stored aggregate {stored} != account sum {computed}")]
    BranchMismatch {
        /// Branch with the bad aggregate
        branch: BranchId,
        /// Aggregate held by the branch
        stored: AccountAmount,
        /// Sum of its account balances
        computed: AccountAmount,
    },

    /// Recorded bank total differs from the sum of branch aggregates
    #[error("bank total: recorded {recorded} != branch sum {computed}")]
    TotalMismatch {
        /// Total kept in the ledger
        recorded: AccountAmount,
        /// Sum of branch aggregates
        computed: AccountAmount,
    },

    /// Two banks differ in branch or account layout
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Two banks disagree on an account balance
    #[error("account {account}: {left} != {right}")]
    AccountMismatch {
        /// Account compared
        account: AccountNumber,
        /// Balance in the first bank
        left: AccountAmount,
        /// Balance in the second bank
        right: AccountAmount,
    },

    /// Two banks disagree on a branch aggregate
    #[error("{branch}: {left} != {right}")]
    BranchBalanceMismatch {
        /// Branch compared
        branch: BranchId,
        /// Aggregate in the first bank
        left: AccountAmount,
        /// Aggregate in the second bank
        right: AccountAmount,
    },
}
