//! Consistency oracle
//!
//! Off the hot path. Both checks exclude every teller operation while they
//! read, by holding the whole bank's lock set.

use crate::bank::Bank;
use crate::snapshot::BankSnapshot;
use tellerbank_core::ConsistencyError;
use tracing::{debug, error};

/// Check every branch aggregate against its accounts, and the recorded total
/// against the branch aggregates.
///
/// Holds every lock in the bank for the whole scan.
pub fn validate(bank: &Bank) -> Result<(), ConsistencyError> {
    let result = {
        let lock = bank.lock_all();
        BankSnapshot::capture(&lock).check()
    };

    if let Err(e) = &result {
        error!(error = %e, "bank failed validation");
    }
    result
}

/// Check two banks hold the same per-account and per-branch balances
///
/// Each bank is captured separately; the two are never locked together.
pub fn compare(left: &Bank, right: &Bank) -> Result<(), ConsistencyError> {
    let (a, b) = (left.snapshot(), right.snapshot());
    let diffs = a.diff(&b);
    match diffs.into_iter().next() {
        None => Ok(()),
        Some(first) => {
            debug!(error = %first, "banks differ");
            Err(first)
        }
    }
}
