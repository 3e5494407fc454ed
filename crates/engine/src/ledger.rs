//! Data guarded by the bank's money lock

use serde::{Deserialize, Serialize};
use tellerbank_core::AccountAmount;

/// Operation counters kept under the money lock
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerStats {
    /// Successful deposits
    pub deposits: u64,
    /// Successful withdrawals
    pub withdrawals: u64,
    /// Successful transfers between accounts of one branch
    pub intra_branch_transfers: u64,
    /// Successful transfers between branches
    pub cross_branch_transfers: u64,
    /// Withdrawals and transfers refused for insufficient funds
    pub rejected: u64,
    /// Money brought in by deposits
    ///
    /// Cumulative volume is unbounded even though every balance fits an
    /// `AccountAmount`, hence the wider type.
    pub deposited: i128,
    /// Money taken out by withdrawals
    pub withdrawn: i128,
}

impl LedgerStats {
    /// Successful teller operations of every kind
    pub fn committed(&self) -> u64 {
        self.deposits + self.withdrawals + self.intra_branch_transfers + self.cross_branch_transfers
    }

    /// Net money that entered the bank from outside
    pub fn net_external(&self) -> i128 {
        self.deposited - self.withdrawn
    }
}

/// Recorded bank total plus counters
#[derive(Debug)]
pub(crate) struct Ledger {
    total: AccountAmount,
    initial_total: AccountAmount,
    stats: LedgerStats,
}

impl Ledger {
    pub(crate) fn new(initial_total: AccountAmount) -> Self {
        Ledger {
            total: initial_total,
            initial_total,
            stats: LedgerStats::default(),
        }
    }

    pub(crate) fn total(&self) -> AccountAmount {
        self.total
    }

    pub(crate) fn initial_total(&self) -> AccountAmount {
        self.initial_total
    }

    pub(crate) fn stats(&self) -> &LedgerStats {
        &self.stats
    }

    /// `new_total` has already been overflow-checked by the caller.
    pub(crate) fn record_deposit(&mut self, amount: AccountAmount, new_total: AccountAmount) {
        self.total = new_total;
        self.stats.deposits += 1;
        self.stats.deposited += i128::from(amount);
    }

    pub(crate) fn record_withdrawal(&mut self, amount: AccountAmount, new_total: AccountAmount) {
        self.total = new_total;
        self.stats.withdrawals += 1;
        self.stats.withdrawn += i128::from(amount);
    }

    pub(crate) fn record_transfer(&mut self, cross_branch: bool) {
        if cross_branch {
            self.stats.cross_branch_transfers += 1;
        } else {
            self.stats.intra_branch_transfers += 1;
        }
    }

    pub(crate) fn record_rejection(&mut self) {
        self.stats.rejected += 1;
    }
}
