//! Identifier and amount types
//!
//! An [`AccountNumber`] packs its owning [`BranchId`] into the high 32 bits and
//! the within-branch index into the low 32 bits. Comparing two account numbers
//! therefore also compares their branches (non-strictly), which is what lets
//! the teller lock branches in the same relative order as accounts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Signed balance quantity. No fractional unit is assumed.
pub type AccountAmount = i64;

const INDEX_BITS: u32 = 32;
const INDEX_MASK: u64 = (1 << INDEX_BITS) - 1;

/// Identifier of a branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BranchId(u32);

impl BranchId {
    /// Create a branch id
    pub const fn new(id: u32) -> Self {
        BranchId(id)
    }

    /// Raw value
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Position of this branch in the bank's branch table
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for BranchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "branch#{}", self.0)
    }
}

/// Identifier of an account
///
/// Totally ordered. The ordering is consistent with [`BranchId`] ordering:
/// `a <= b` implies `a.branch_id() <= b.branch_id()`.
///
/// # Examples
///
/// ```
/// use tellerbank_core::{AccountNumber, BranchId};
///
/// let a = AccountNumber::new(BranchId::new(2), 7);
/// assert_eq!(a.branch_id(), BranchId::new(2));
/// assert_eq!(a.index(), 7);
/// assert!(a < AccountNumber::new(BranchId::new(3), 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountNumber(u64);

impl AccountNumber {
    /// Build an account number from its branch and within-branch index
    pub const fn new(branch: BranchId, index: u32) -> Self {
        AccountNumber(((branch.0 as u64) << INDEX_BITS) | index as u64)
    }

    /// Wrap a raw number, e.g. one supplied by a caller that may not resolve
    pub const fn from_raw(raw: u64) -> Self {
        AccountNumber(raw)
    }

    /// Raw value
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Owning branch, recovered in O(1) from the high bits
    pub const fn branch_id(self) -> BranchId {
        BranchId((self.0 >> INDEX_BITS) as u32)
    }

    /// Index of the account within its branch
    pub const fn index(self) -> u32 {
        (self.0 & INDEX_MASK) as u32
    }

    /// Whether both accounts belong to the same branch
    pub const fn is_same_branch(self, other: AccountNumber) -> bool {
        self.branch_id().0 == other.branch_id().0
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016x}", self.0)
    }
}
