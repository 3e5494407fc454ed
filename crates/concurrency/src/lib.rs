//! Lock-ordering primitives for the teller
//!
//! Every multi-lock acquisition in the bank goes through this crate so that
//! locks are always taken in one canonical order and released in reverse:
//! - [`OrderedPair`]: two mutexes, acquired lowest key first
//! - [`OrderedGuards`]: an arbitrary set, acquired in ascending key order
//!
//! Release is guard drop. Early returns therefore can never leak a lock.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ordered;

pub use ordered::{lock_in_order, OrderedGuards, OrderedPair};
