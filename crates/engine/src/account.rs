//! Account balance cell and the adjustment primitive

use crate::ledger::Ledger;
use parking_lot::{Mutex, MutexGuard};
use tellerbank_core::{AccountAmount, AccountNumber, BranchId, TellerError, TellerResult};

/// Smallest balance-holding unit
///
/// The balance lives behind the account's own mutex; it is never read or
/// written without holding it.
#[derive(Debug)]
pub struct Account {
    number: AccountNumber,
    balance: Mutex<AccountAmount>,
}

impl Account {
    pub(crate) fn new(number: AccountNumber, initial: AccountAmount) -> Self {
        Account {
            number,
            balance: Mutex::new(initial),
        }
    }

    /// Account number
    pub fn number(&self) -> AccountNumber {
        self.number
    }

    /// Owning branch
    pub fn branch_id(&self) -> BranchId {
        self.number.branch_id()
    }

    /// Current balance, read under the account lock
    pub fn balance(&self) -> AccountAmount {
        *self.balance.lock()
    }

    pub(crate) fn cell(&self) -> &Mutex<AccountAmount> {
        &self.balance
    }
}

/// Apply `delta` to an account and, when `branch` is given, to its branch
/// aggregate.
///
/// Takes no locks. The caller passes the guards of the account lock, the
/// branch lock (if updating the branch) and the money lock. Overflow must
/// already have been ruled out with [`checked`].
pub(crate) fn adjust(
    balance: &mut MutexGuard<'_, AccountAmount>,
    branch: Option<&mut MutexGuard<'_, AccountAmount>>,
    _money: &MutexGuard<'_, Ledger>,
    delta: AccountAmount,
) {
    **balance += delta;
    if let Some(aggregate) = branch {
        **aggregate += delta;
    }
}

/// `current + delta`, or [`TellerError::BalanceOverflow`] attributed to `account`
pub(crate) fn checked(
    account: AccountNumber,
    current: AccountAmount,
    delta: AccountAmount,
) -> TellerResult<AccountAmount> {
    current
        .checked_add(delta)
        .ok_or(TellerError::BalanceOverflow { account })
}
