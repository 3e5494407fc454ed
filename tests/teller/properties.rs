//! Property Tests
//!
//! Sequential operation sequences checked against a plain balance model.

use crate::common::*;
use proptest::prelude::*;
use std::collections::BTreeMap;
use tellerbank::prelude::{validate, AccountAmount, AccountNumber, ResultCode};

const BRANCHES: u32 = 3;
const ACCOUNTS: u32 = 3;
const INITIAL: AccountAmount = 50;

fn account_strategy() -> impl Strategy<Value = AccountNumber> {
    // One index past the end so unknown accounts are exercised too.
    (0..=BRANCHES, 0..ACCOUNTS).prop_map(|(b, i)| acct(b, i))
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (account_strategy(), 0..80i64).prop_map(|(a, x)| Op::Deposit(a, x)),
        (account_strategy(), 0..80i64).prop_map(|(a, x)| Op::Withdraw(a, x)),
        (account_strategy(), account_strategy(), 0..80i64)
            .prop_map(|(a, b, x)| Op::Transfer(a, b, x)),
    ]
}

/// Expected outcome of `op` on the model, applied to the model on success
fn apply_model(model: &mut BTreeMap<AccountNumber, AccountAmount>, op: Op) -> ResultCode {
    match op {
        Op::Deposit(a, x) => {
            if !model.contains_key(&a) {
                return ResultCode::AccountNotFound;
            }
            *model.get_mut(&a).unwrap() += x;
        }
        Op::Withdraw(a, x) => {
            let Some(balance) = model.get_mut(&a) else {
                return ResultCode::AccountNotFound;
            };
            if x > *balance {
                return ResultCode::InsufficientFunds;
            }
            *balance -= x;
        }
        Op::Transfer(src, dst, x) => {
            if !model.contains_key(&src) || !model.contains_key(&dst) {
                return ResultCode::AccountNotFound;
            }
            if src == dst {
                return ResultCode::Success;
            }
            if x > model[&src] {
                return ResultCode::InsufficientFunds;
            }
            *model.get_mut(&src).unwrap() -= x;
            *model.get_mut(&dst).unwrap() += x;
        }
    }
    ResultCode::Success
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_matches_model_and_conserves(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let bank = create_bank(BRANCHES, ACCOUNTS, INITIAL);
        let mut model: BTreeMap<_, _> = bank.account_numbers().map(|n| (n, INITIAL)).collect();
        let mut net_external = 0;

        for op in ops {
            let before = bank.snapshot();
            let expected = apply_model(&mut model, op);
            let actual = ResultCode::of(&op.apply(&bank));
            prop_assert_eq!(actual, expected, "op {:?}", op);

            if actual == ResultCode::Success {
                net_external += op.external_delta();
            } else {
                // Failed operations leave every balance untouched.
                prop_assert!(before.diff(&bank.snapshot()).is_empty());
            }
        }

        for (n, expected) in &model {
            prop_assert_eq!(balance(&bank, *n), *expected);
        }
        let initial_total = (BRANCHES * ACCOUNTS) as AccountAmount * INITIAL;
        prop_assert_eq!(bank.total_balance(), initial_total + net_external);
        prop_assert!(validate(&bank).is_ok());
    }

    #[test]
    fn prop_self_transfer_changes_nothing(index in 0..ACCOUNTS, amount in 0..=INITIAL) {
        let bank = create_bank(BRANCHES, ACCOUNTS, INITIAL);
        let before = bank.snapshot();
        let n = acct(1, index);
        prop_assert!(bank.transfer(n, n, amount).is_ok());
        prop_assert!(before.diff(&bank.snapshot()).is_empty());
    }
}
