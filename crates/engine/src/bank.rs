//! Bank: branch table, money lock and construction

use crate::account::Account;
use crate::branch::Branch;
use crate::ledger::{Ledger, LedgerStats};
use parking_lot::{Mutex, MutexGuard};
use tellerbank_concurrency::{lock_in_order, OrderedGuards};
use tellerbank_core::{
    AccountAmount, AccountNumber, BankConfig, BranchId, TellerError, TellerResult,
};
use tracing::info;

/// Top-level owner of all branches and the global money lock
///
/// Share it between worker threads by reference (`&Bank` in scoped threads or
/// `Arc<Bank>`). There is no ambient state: every mutation goes through the
/// lock-guarded fields of one instance.
///
/// # Example
///
/// ```
/// use tellerbank_engine::{AccountNumber, Bank, BranchId};
///
/// let bank = Bank::builder()
///     .num_branches(2)
///     .accounts_per_branch(2)
///     .initial_amount(100)
///     .build()
///     .unwrap();
///
/// let a = AccountNumber::new(BranchId::new(0), 0);
/// let b = AccountNumber::new(BranchId::new(1), 1);
/// bank.transfer(a, b, 30).unwrap();
/// assert_eq!(bank.lookup(a).unwrap().balance(), 70);
/// assert_eq!(bank.total_balance(), 400);
/// ```
#[derive(Debug)]
pub struct Bank {
    config: BankConfig,
    branches: Vec<Branch>,
    money: Mutex<Ledger>,
}

/// Every lock of a bank, held at once
///
/// Acquired in the global order (accounts, branches, money), so it excludes
/// every teller operation without ever inverting their order.
pub(crate) struct BankLock<'a> {
    // Declaration order is drop order: money first, accounts last.
    pub(crate) ledger: MutexGuard<'a, Ledger>,
    pub(crate) branches: OrderedGuards<'a, BranchId, AccountAmount>,
    pub(crate) accounts: OrderedGuards<'a, AccountNumber, AccountAmount>,
}

impl Bank {
    /// Build a bank of `num_branches` × `accounts_per_branch` accounts, each
    /// opened with `initial_amount`.
    ///
    /// `reporting_threshold` and `num_workers` are recorded in the
    /// configuration for the orchestration layer.
    pub fn init(
        num_branches: u32,
        accounts_per_branch: u32,
        initial_amount: AccountAmount,
        reporting_threshold: AccountAmount,
        num_workers: u32,
    ) -> TellerResult<Self> {
        Self::from_config(BankConfig {
            num_branches,
            accounts_per_branch,
            initial_amount,
            reporting_threshold,
            num_workers,
        })
    }

    /// Build a bank from a validated configuration
    pub fn from_config(config: BankConfig) -> TellerResult<Self> {
        config.validate()?;
        let total = config.initial_total()?;

        let branches = (0..config.num_branches)
            .map(|id| {
                Branch::new(
                    BranchId::new(id),
                    config.accounts_per_branch,
                    config.initial_amount,
                )
            })
            .collect();

        info!(
            branches = config.num_branches,
            accounts_per_branch = config.accounts_per_branch,
            initial_amount = config.initial_amount,
            total,
            "bank initialized"
        );

        Ok(Bank {
            config,
            branches,
            money: Mutex::new(Ledger::new(total)),
        })
    }

    /// Create a builder
    pub fn builder() -> BankBuilder {
        BankBuilder::new()
    }

    /// Configuration the bank was built from
    pub fn config(&self) -> &BankConfig {
        &self.config
    }

    /// Branches in ascending id order
    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    /// Branch by id
    pub fn branch(&self, id: BranchId) -> Option<&Branch> {
        self.branches.get(id.index())
    }

    /// Resolve an account number in O(1)
    pub fn lookup(&self, number: AccountNumber) -> Option<&Account> {
        self.branch(number.branch_id())?.account(number.index())
    }

    /// Every account number, ascending
    pub fn account_numbers(&self) -> impl Iterator<Item = AccountNumber> + '_ {
        self.branches
            .iter()
            .flat_map(|b| b.accounts().iter().map(Account::number))
    }

    /// Number of accounts across all branches
    pub fn num_accounts(&self) -> usize {
        self.branches.iter().map(|b| b.accounts().len()).sum()
    }

    /// Total money: the sum of branch aggregates
    ///
    /// Read with every branch lock and the money lock held, so no
    /// cross-branch transfer can be observed half-applied.
    pub fn total_balance(&self) -> AccountAmount {
        let branches = lock_in_order(self.branches.iter().map(|b| (b.id(), b.cell())));
        let _ledger = self.money.lock();
        branches.iter().map(|(_, balance)| *balance).sum()
    }

    /// Counters recorded by the teller so far
    pub fn stats(&self) -> LedgerStats {
        self.money.lock().stats().clone()
    }

    /// Branch and account for `number`, or `AccountNotFound`
    pub(crate) fn resolve(&self, number: AccountNumber) -> TellerResult<(&Branch, &Account)> {
        let branch = self
            .branch(number.branch_id())
            .ok_or(TellerError::AccountNotFound { account: number })?;
        let account = branch
            .account(number.index())
            .ok_or(TellerError::AccountNotFound { account: number })?;
        Ok((branch, account))
    }

    pub(crate) fn money(&self) -> &Mutex<Ledger> {
        &self.money
    }

    /// Acquire every lock in the bank in the global order
    pub(crate) fn lock_all(&self) -> BankLock<'_> {
        let accounts = lock_in_order(
            self.branches
                .iter()
                .flat_map(|b| b.accounts().iter().map(|a| (a.number(), a.cell()))),
        );
        let branches = lock_in_order(self.branches.iter().map(|b| (b.id(), b.cell())));
        let ledger = self.money.lock();
        BankLock {
            ledger,
            branches,
            accounts,
        }
    }
}

/// Builder for [`Bank`]
///
/// ```
/// use tellerbank_engine::Bank;
///
/// let bank = Bank::builder().num_branches(3).accounts_per_branch(10).build().unwrap();
/// assert_eq!(bank.num_accounts(), 30);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BankBuilder {
    config: BankConfig,
}

impl BankBuilder {
    /// Builder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    pub fn config(mut self, config: BankConfig) -> Self {
        self.config = config;
        self
    }

    /// Number of branches
    pub fn num_branches(mut self, n: u32) -> Self {
        self.config.num_branches = n;
        self
    }

    /// Accounts per branch
    pub fn accounts_per_branch(mut self, n: u32) -> Self {
        self.config.accounts_per_branch = n;
        self
    }

    /// Opening balance of every account
    pub fn initial_amount(mut self, amount: AccountAmount) -> Self {
        self.config.initial_amount = amount;
        self
    }

    /// Low-balance reporting threshold
    pub fn reporting_threshold(mut self, amount: AccountAmount) -> Self {
        self.config.reporting_threshold = amount;
        self
    }

    /// Worker pool size
    pub fn num_workers(mut self, n: u32) -> Self {
        self.config.num_workers = n;
        self
    }

    /// Build the bank
    pub fn build(self) -> TellerResult<Bank> {
        Bank::from_config(self.config)
    }
}
