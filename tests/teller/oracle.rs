//! Oracle Tests
//!
//! Validate and compare, run against banks that are being mutated.

use crate::common::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tellerbank::prelude::*;

/// Test every snapshot taken mid-workload is internally consistent
#[test]
fn test_snapshots_consistent_during_workload() {
    let bank = Arc::new(create_bank(4, 4, 1_000));
    let done = Arc::new(AtomicBool::new(false));

    let observer = {
        let bank = Arc::clone(&bank);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let mut scans = 0;
            while !done.load(Ordering::Acquire) || scans == 0 {
                let snap = bank.snapshot();
                snap.check().unwrap();
                // Only transfers run, so the total never moves.
                assert_eq!(snap.branch_sum(), 16_000);
                scans += 1;
            }
            scans
        })
    };

    let workers: Vec<_> = (0..4u64)
        .map(|seed| {
            let bank = Arc::clone(&bank);
            thread::spawn(move || {
                let mut rng = StdRng::seed_from_u64(seed);
                for _ in 0..5_000 {
                    let src = acct(rng.gen_range(0..4), rng.gen_range(0..4));
                    let dst = acct(rng.gen_range(0..4), rng.gen_range(0..4));
                    let _ = bank.transfer(src, dst, rng.gen_range(0..50));
                }
            })
        })
        .collect();

    for w in workers {
        w.join().unwrap();
    }
    done.store(true, Ordering::Release);
    assert!(observer.join().unwrap() > 0);
    validate(&bank).unwrap();
}

/// Test different schedules of one commutative workload end in equal banks
#[test]
fn test_schedules_converge_to_equal_state() {
    const BRANCHES: u32 = 3;
    const ACCOUNTS: u32 = 4;

    // Ample funds and small amounts: no operation can be refused, so the
    // multiset commutes.
    let mut rng = StdRng::seed_from_u64(7);
    let mut ops = Vec::new();
    for _ in 0..4_000 {
        let a = acct(rng.gen_range(0..BRANCHES), rng.gen_range(0..ACCOUNTS));
        let b = acct(rng.gen_range(0..BRANCHES), rng.gen_range(0..ACCOUNTS));
        let amount = rng.gen_range(0..10);
        ops.push(match rng.gen_range(0..3) {
            0 => Op::Deposit(a, amount),
            1 => Op::Withdraw(a, amount),
            _ => Op::Transfer(a, b, amount),
        });
    }

    let run = |shuffle_seed: u64, threads: usize| {
        let bank = Arc::new(create_bank(BRANCHES, ACCOUNTS, 1_000_000));
        let mut order = ops.clone();
        order.shuffle(&mut StdRng::seed_from_u64(shuffle_seed));

        let chunk = (order.len() + threads - 1) / threads;
        let handles: Vec<_> = order
            .chunks(chunk)
            .map(|part| {
                let part = part.to_vec();
                let bank = Arc::clone(&bank);
                thread::spawn(move || {
                    for op in part {
                        op.apply(&bank).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        bank
    };

    let first = run(1, 2);
    let second = run(2, 6);
    validate(&first).unwrap();
    validate(&second).unwrap();
    compare(&first, &second).unwrap();
    assert_eq!(first.stats(), second.stats());
}

/// Test compare reports the first differing account
#[test]
fn test_compare_reports_difference() {
    let left = create_bank(2, 2, 10);
    let right = create_bank(2, 2, 10);
    right.deposit(acct(1, 1), 1).unwrap();

    assert_eq!(
        compare(&left, &right),
        Err(ConsistencyError::AccountMismatch {
            account: acct(1, 1),
            left: 10,
            right: 11,
        })
    );
    assert!(compare(&left, &create_bank(1, 2, 10)).is_err());
}
