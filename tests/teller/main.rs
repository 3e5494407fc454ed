//! Teller Integration Tests
//!
//! Tests for the teller operations and their locking protocol as seen by
//! multiple worker threads sharing one bank.

#[path = "../common/mod.rs"]
mod common;

mod oracle;
mod properties;
