//! Branch aggregate cell

use crate::account::Account;
use parking_lot::Mutex;
use tellerbank_core::{AccountAmount, AccountNumber, BranchId};

/// Aggregation unit owning a fixed set of accounts
///
/// The aggregate equals the sum of the account balances whenever no teller
/// operation holds any of this branch's locks.
#[derive(Debug)]
pub struct Branch {
    id: BranchId,
    balance: Mutex<AccountAmount>,
    accounts: Vec<Account>,
}

impl Branch {
    pub(crate) fn new(id: BranchId, num_accounts: u32, initial: AccountAmount) -> Self {
        let accounts: Vec<Account> = (0..num_accounts)
            .map(|index| Account::new(AccountNumber::new(id, index), initial))
            .collect();
        // Fits: the bank total was checked before any branch is built.
        let aggregate = initial * i64::from(num_accounts);
        Branch {
            id,
            balance: Mutex::new(aggregate),
            accounts,
        }
    }

    /// Branch id
    pub fn id(&self) -> BranchId {
        self.id
    }

    /// Stored aggregate, read under the branch lock
    pub fn balance(&self) -> AccountAmount {
        *self.balance.lock()
    }

    /// Accounts in ascending number order
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Account at `index` within this branch
    pub fn account(&self, index: u32) -> Option<&Account> {
        self.accounts.get(index as usize)
    }

    pub(crate) fn cell(&self) -> &Mutex<AccountAmount> {
        &self.balance
    }
}
