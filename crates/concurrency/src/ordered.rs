//! Canonical-order acquisition of several mutexes
//!
//! ## Protocol
//!
//! ```text
//! lock:    key_low  ->  key_high  (-> ...)
//! release: key_high ->  key_low   (reverse, by guard drop)
//! ```
//!
//! Two callers that request overlapping sets of locks through these helpers
//! always request the shared locks in the same relative order, so no circular
//! wait can form between them.

use parking_lot::{Mutex, MutexGuard};

/// Two mutexes held together, acquired lowest key first
///
/// Accessors are in *argument* order (`left`, `both_mut`), independent of which
/// lock was acquired first, so callers never have to track the swap.
pub struct OrderedPair<'a, T> {
    // Fields drop in declaration order: the second-acquired guard goes first.
    second: MutexGuard<'a, T>,
    first: MutexGuard<'a, T>,
    swapped: bool,
}

impl<'a, T> OrderedPair<'a, T> {
    /// Lock `left` and `right` in ascending key order
    ///
    /// Keys must differ: locking the same resource twice would self-deadlock,
    /// so callers short-circuit that case before getting here.
    pub fn lock<K: Ord>(
        left_key: K,
        left: &'a Mutex<T>,
        right_key: K,
        right: &'a Mutex<T>,
    ) -> Self {
        debug_assert!(left_key != right_key, "ordered pair needs distinct keys");
        debug_assert!(!std::ptr::eq(left, right), "ordered pair needs distinct mutexes");

        let swapped = right_key < left_key;
        let (low, high) = if swapped { (right, left) } else { (left, right) };

        let first = low.lock();
        let second = high.lock();
        OrderedPair {
            second,
            first,
            swapped,
        }
    }

    /// Value behind the `left` mutex
    pub fn left(&self) -> &T {
        if self.swapped {
            &*self.second
        } else {
            &*self.first
        }
    }

    /// Both guards, mutably, in argument order
    pub fn both_mut(&mut self) -> (&mut MutexGuard<'a, T>, &mut MutexGuard<'a, T>) {
        if self.swapped {
            (&mut self.second, &mut self.first)
        } else {
            (&mut self.first, &mut self.second)
        }
    }
}

/// A set of guards acquired in ascending key order
///
/// Dropping releases them in descending order.
pub struct OrderedGuards<'a, K, T> {
    guards: Vec<(K, MutexGuard<'a, T>)>,
}

/// Lock every mutex in `items`, lowest key first
///
/// Keys must be unique. The returned guards iterate in acquisition order.
pub fn lock_in_order<'a, K, T, I>(items: I) -> OrderedGuards<'a, K, T>
where
    K: Ord,
    I: IntoIterator<Item = (K, &'a Mutex<T>)>,
{
    let mut pending: Vec<(K, &'a Mutex<T>)> = items.into_iter().collect();
    pending.sort_by(|a, b| a.0.cmp(&b.0));
    debug_assert!(
        pending.windows(2).all(|w| w[0].0 != w[1].0),
        "lock_in_order needs unique keys"
    );

    tracing::trace!(count = pending.len(), "acquiring ordered lock set");

    let mut guards = Vec::with_capacity(pending.len());
    for (key, mutex) in pending {
        guards.push((key, mutex.lock()));
    }
    OrderedGuards { guards }
}

impl<'a, K, T> OrderedGuards<'a, K, T> {
    /// Number of locks held
    pub fn len(&self) -> usize {
        self.guards.len()
    }

    /// Whether no locks are held
    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }

    /// Held values with their keys, in acquisition order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &T)> + '_ {
        self.guards.iter().map(|(k, g)| (k, &**g))
    }
}

impl<'a, K, T> Drop for OrderedGuards<'a, K, T> {
    fn drop(&mut self) {
        // Vec drops front to back; pop so the last-acquired lock goes first.
        while let Some(guard) = self.guards.pop() {
            drop(guard);
        }
    }
}
