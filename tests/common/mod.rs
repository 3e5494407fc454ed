//! Shared helpers for integration tests

#![allow(dead_code)]

use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use tellerbank::prelude::*;

/// Route tracing output through the test harness (warnings and above)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_test_writer()
        .try_init();
}

/// Account `index` of branch `branch`
pub fn acct(branch: u32, index: u32) -> AccountNumber {
    AccountNumber::new(BranchId::new(branch), index)
}

/// Bank of `branches` × `accounts` accounts opened with `initial` each
pub fn create_bank(branches: u32, accounts: u32, initial: AccountAmount) -> Bank {
    init_tracing();
    Bank::builder()
        .num_branches(branches)
        .accounts_per_branch(accounts)
        .initial_amount(initial)
        .num_workers(8)
        .build()
        .expect("valid test bank")
}

/// Balance of one account
pub fn balance(bank: &Bank, n: AccountNumber) -> AccountAmount {
    bank.lookup(n).expect("account exists").balance()
}

/// Sum of every account balance
pub fn account_sum(bank: &Bank) -> AccountAmount {
    bank.snapshot()
        .branches
        .iter()
        .map(|b| b.account_sum())
        .sum()
}

/// Run `f` on another thread and fail the test if it does not finish in time
pub fn run_with_timeout<F>(timeout: Duration, f: F)
where
    F: FnOnce() + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    let handle = thread::spawn(move || {
        f();
        let _ = tx.send(());
    });
    match rx.recv_timeout(timeout) {
        Ok(()) => handle.join().expect("worker panicked"),
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            // Sender dropped without sending: the closure panicked.
            handle.join().expect("worker panicked");
        }
        Err(mpsc::RecvTimeoutError::Timeout) => {
            panic!("operations did not finish within {:?}: probable deadlock", timeout)
        }
    }
}

/// One teller operation, as generated by workloads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Deposit(AccountNumber, AccountAmount),
    Withdraw(AccountNumber, AccountAmount),
    Transfer(AccountNumber, AccountNumber, AccountAmount),
}

impl Op {
    pub fn apply(self, bank: &Bank) -> TellerResult<()> {
        match self {
            Op::Deposit(a, amount) => bank.deposit(a, amount),
            Op::Withdraw(a, amount) => bank.withdraw(a, amount),
            Op::Transfer(src, dst, amount) => bank.transfer(src, dst, amount),
        }
    }

    /// Net money this operation brings into the bank if it succeeds
    pub fn external_delta(self) -> AccountAmount {
        match self {
            Op::Deposit(_, amount) => amount,
            Op::Withdraw(_, amount) => -amount,
            Op::Transfer(..) => 0,
        }
    }
}
