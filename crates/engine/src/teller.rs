//! Teller operations: deposit, withdraw, transfer
//!
//! Each operation acquires exactly the locks it needs in the global order,
//! checks its preconditions with those locks held, mutates, and releases by
//! dropping guards. Failures after acquisition perform zero adjustments.
//!
//! ## Acquisition Order
//!
//! | Operation | Locks, in order |
//! |-----------|-----------------|
//! | deposit / withdraw | account → branch → money |
//! | transfer, same branch | account_low → account_high → money |
//! | transfer, cross branch | account_low → account_high → branch_low → branch_high → money |

use crate::account::{adjust, checked};
use crate::bank::Bank;
use tellerbank_concurrency::OrderedPair;
use tellerbank_core::{AccountAmount, AccountNumber, TellerError, TellerResult};
use tracing::{debug, trace};

fn ensure_non_negative(amount: AccountAmount) -> TellerResult<()> {
    if amount < 0 {
        return Err(TellerError::NegativeAmount { amount });
    }
    Ok(())
}

impl Bank {
    /// Deposit `amount` into `account`
    ///
    /// Fails with `NegativeAmount` or `AccountNotFound` before taking any lock.
    /// Otherwise succeeds unless a balance would overflow.
    pub fn deposit(&self, account: AccountNumber, amount: AccountAmount) -> TellerResult<()> {
        ensure_non_negative(amount)?;
        trace!(%account, amount, "deposit");

        let (branch, acct) = self.resolve(account)?;

        let mut balance = acct.cell().lock();
        let mut aggregate = branch.cell().lock();
        let mut ledger = self.money().lock();

        checked(account, *balance, amount)?;
        checked(account, *aggregate, amount)?;
        let new_total = checked(account, ledger.total(), amount)?;

        adjust(&mut balance, Some(&mut aggregate), &ledger, amount);
        ledger.record_deposit(amount, new_total);
        Ok(())
    }

    /// Withdraw `amount` from `account`
    ///
    /// The funds check runs with the account lock held; an unlocked check
    /// would race with concurrent withdrawals and transfers.
    pub fn withdraw(&self, account: AccountNumber, amount: AccountAmount) -> TellerResult<()> {
        ensure_non_negative(amount)?;
        trace!(%account, amount, "withdraw");

        let (branch, acct) = self.resolve(account)?;

        let mut balance = acct.cell().lock();
        let mut aggregate = branch.cell().lock();
        let mut ledger = self.money().lock();

        if amount > *balance {
            ledger.record_rejection();
            debug!(%account, amount, available = *balance, "withdraw refused");
            return Err(TellerError::InsufficientFunds {
                account,
                requested: amount,
                available: *balance,
            });
        }
        checked(account, *aggregate, -amount)?;
        let new_total = checked(account, ledger.total(), -amount)?;

        adjust(&mut balance, Some(&mut aggregate), &ledger, -amount);
        ledger.record_withdrawal(amount, new_total);

        if *balance < self.config().reporting_threshold {
            debug!(
                %account,
                balance = *balance,
                threshold = self.config().reporting_threshold,
                "balance below reporting threshold"
            );
        }
        Ok(())
    }

    /// Move `amount` from `src` to `dst`
    ///
    /// A self-transfer succeeds without locking anything. Accounts are locked
    /// in ascending number order; branches, only when they differ, in the same
    /// relative order; the money lock last. Because an account number carries
    /// its branch id in the high bits, the branch order never inverts the
    /// account order of a concurrent transfer in the other direction.
    pub fn transfer(
        &self,
        src: AccountNumber,
        dst: AccountNumber,
        amount: AccountAmount,
    ) -> TellerResult<()> {
        ensure_non_negative(amount)?;
        trace!(%src, %dst, amount, "transfer");

        let (src_branch, src_acct) = self.resolve(src)?;
        let (dst_branch, dst_acct) = self.resolve(dst)?;

        if src == dst {
            return Ok(());
        }

        // Same branch: net branch change is zero, so its lock is not taken.
        let update_branch = !src.is_same_branch(dst);

        let mut accounts = OrderedPair::lock(src, src_acct.cell(), dst, dst_acct.cell());
        let mut branches = if update_branch {
            Some(OrderedPair::lock(
                src,
                src_branch.cell(),
                dst,
                dst_branch.cell(),
            ))
        } else {
            None
        };
        let mut ledger = self.money().lock();

        let available = *accounts.left();
        if amount > available {
            ledger.record_rejection();
            debug!(%src, %dst, amount, available, "transfer refused");
            return Err(TellerError::InsufficientFunds {
                account: src,
                requested: amount,
                available,
            });
        }

        let (src_balance, dst_balance) = accounts.both_mut();
        checked(dst, **dst_balance, amount)?;

        match branches.as_mut() {
            Some(pair) => {
                let (src_aggregate, dst_aggregate) = pair.both_mut();
                checked(dst, **dst_aggregate, amount)?;
                checked(src, **src_aggregate, -amount)?;
                adjust(src_balance, Some(src_aggregate), &ledger, -amount);
                adjust(dst_balance, Some(dst_aggregate), &ledger, amount);
            }
            None => {
                adjust(src_balance, None, &ledger, -amount);
                adjust(dst_balance, None, &ledger, amount);
            }
        }
        ledger.record_transfer(update_branch);
        Ok(())
    }
}
