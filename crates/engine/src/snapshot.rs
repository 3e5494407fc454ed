//! Point-in-time copies of a bank
//!
//! A snapshot is captured with every lock in the bank held, so it never shows
//! a teller operation half-applied.

use crate::bank::{Bank, BankLock};
use crate::ledger::LedgerStats;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tellerbank_core::{AccountAmount, AccountNumber, BranchId, ConsistencyError};

/// One account balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    /// Account number
    pub number: AccountNumber,
    /// Balance
    pub balance: AccountAmount,
}

/// One branch: stored aggregate plus its accounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchSnapshot {
    /// Branch id
    pub id: BranchId,
    /// Aggregate as stored by the branch
    pub balance: AccountAmount,
    /// Accounts in ascending number order
    pub accounts: Vec<AccountSnapshot>,
}

impl BranchSnapshot {
    /// Sum of the account balances
    pub fn account_sum(&self) -> AccountAmount {
        self.accounts.iter().map(|a| a.balance).sum()
    }
}

/// Whole-bank copy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankSnapshot {
    /// Capture time
    pub taken_at: DateTime<Utc>,
    /// Total recorded in the ledger
    pub total: AccountAmount,
    /// Total the bank was opened with
    pub initial_total: AccountAmount,
    /// Branches in ascending id order
    pub branches: Vec<BranchSnapshot>,
    /// Ledger counters at capture time
    pub stats: LedgerStats,
}

impl BankSnapshot {
    pub(crate) fn capture(lock: &BankLock<'_>) -> Self {
        let mut branches: Vec<BranchSnapshot> = lock
            .branches
            .iter()
            .map(|(id, balance)| BranchSnapshot {
                id: *id,
                balance: *balance,
                accounts: Vec::new(),
            })
            .collect();

        for (number, balance) in lock.accounts.iter() {
            if let Some(branch) = branches.get_mut(number.branch_id().index()) {
                branch.accounts.push(AccountSnapshot {
                    number: *number,
                    balance: *balance,
                });
            }
        }

        BankSnapshot {
            taken_at: Utc::now(),
            total: lock.ledger.total(),
            initial_total: lock.ledger.initial_total(),
            branches,
            stats: lock.ledger.stats().clone(),
        }
    }

    /// Sum of the stored branch aggregates
    pub fn branch_sum(&self) -> AccountAmount {
        self.branches.iter().map(|b| b.balance).sum()
    }

    /// Balance of one account, if present
    pub fn account(&self, number: AccountNumber) -> Option<AccountAmount> {
        self.branches
            .get(number.branch_id().index())?
            .accounts
            .get(number.index() as usize)
            .map(|a| a.balance)
    }

    /// Check branch aggregates against their accounts, the recorded total
    /// against the branches, and the recorded total against the opening total
    /// plus net external flow. Reports the first mismatch.
    pub fn check(&self) -> Result<(), ConsistencyError> {
        for branch in &self.branches {
            let computed = branch.account_sum();
            if computed != branch.balance {
                return Err(ConsistencyError::BranchMismatch {
                    branch: branch.id,
                    stored: branch.balance,
                    computed,
                });
            }
        }

        let computed = self.branch_sum();
        if computed != self.total {
            return Err(ConsistencyError::TotalMismatch {
                recorded: self.total,
                computed,
            });
        }

        let expected = i128::from(self.initial_total) + self.stats.net_external();
        if expected != i128::from(self.total) {
            let computed = AccountAmount::try_from(expected).unwrap_or(if expected < 0 {
                AccountAmount::MIN
            } else {
                AccountAmount::MAX
            });
            return Err(ConsistencyError::TotalMismatch {
                recorded: self.total,
                computed,
            });
        }
        Ok(())
    }

    /// Every structural and balance difference between two snapshots
    ///
    /// Capture time and counters are not compared.
    pub fn diff(&self, other: &BankSnapshot) -> Vec<ConsistencyError> {
        let mut diffs = Vec::new();

        if self.branches.len() != other.branches.len() {
            diffs.push(ConsistencyError::ShapeMismatch(format!(
                "{} branches vs {}",
                self.branches.len(),
                other.branches.len()
            )));
            return diffs;
        }

        for (left, right) in self.branches.iter().zip(&other.branches) {
            if left.id != right.id || left.accounts.len() != right.accounts.len() {
                diffs.push(ConsistencyError::ShapeMismatch(format!(
                    "{} with {} accounts vs {} with {} accounts",
                    left.id,
                    left.accounts.len(),
                    right.id,
                    right.accounts.len()
                )));
                continue;
            }

            for (a, b) in left.accounts.iter().zip(&right.accounts) {
                if a.number != b.number {
                    diffs.push(ConsistencyError::ShapeMismatch(format!(
                        "account {} vs {}",
                        a.number, b.number
                    )));
                } else if a.balance != b.balance {
                    diffs.push(ConsistencyError::AccountMismatch {
                        account: a.number,
                        left: a.balance,
                        right: b.balance,
                    });
                }
            }

            if left.balance != right.balance {
                diffs.push(ConsistencyError::BranchBalanceMismatch {
                    branch: left.id,
                    left: left.balance,
                    right: right.balance,
                });
            }
        }
        diffs
    }
}

impl Bank {
    /// Consistent copy of every balance in the bank
    ///
    /// Holds every lock for the duration of the copy, so it waits for
    /// in-flight teller operations and blocks new ones until done.
    pub fn snapshot(&self) -> BankSnapshot {
        let lock = self.lock_all();
        BankSnapshot::capture(&lock)
    }
}
