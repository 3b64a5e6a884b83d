//! Property tests for positions.
//!
//! Invariants tested:
//! - Over any deposit/withdraw sequence, principal withdrawn equals principal
//!   deposited and the pool's supply tracks the position, including stake
//!   deposited on the staker's behalf by a sponsor.
//! - Over-withdrawal always fails and leaves state untouched.
//! - A zero deposit settles pending reward once; repeating it pays nothing.

use common::LedgerError;
use proptest::prelude::*;

use crate::harness::Harness;

#[derive(Clone, Debug)]
enum Op {
    /// Amount, and whether a sponsor funds it.
    Deposit(i128, bool),
    Withdraw(i128),
    Advance(u32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0i128..2_000, any::<bool>())
            .prop_map(|(amount, sponsored)| Op::Deposit(amount, sponsored)),
        (0i128..2_000).prop_map(Op::Withdraw),
        (0u32..5).prop_map(Op::Advance),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_principal_is_conserved(ops in prop::collection::vec(op_strategy(), 1..20)) {
        let h = Harness::new(100);
        let (pool_id, token) = h.add_pool(10);
        let initial = 10_000i128;
        let staker = h.staker(&token, initial);
        let sponsor = h.staker(&token, initial);

        let mut staked = 0i128;
        let mut deposited = 0i128;
        let mut sponsored = 0i128;
        let mut withdrawn = 0i128;

        for op in ops {
            match op {
                Op::Deposit(amount, by_sponsor) => {
                    let funder = if by_sponsor { &sponsor } else { &staker };
                    let amount = amount.min(h.balance(&token, funder));
                    h.chef.deposit(funder, &pool_id, &amount, &staker);
                    staked += amount;
                    deposited += amount;
                    if by_sponsor {
                        sponsored += amount;
                    }
                }
                Op::Withdraw(amount) => {
                    if amount > staked {
                        let result = h.chef.try_withdraw(&staker, &pool_id, &amount, &staker);
                        prop_assert!(matches!(result, Err(Ok(LedgerError::InsufficientBalance))));
                    } else {
                        h.chef.withdraw(&staker, &pool_id, &amount, &staker);
                        staked -= amount;
                        withdrawn += amount;
                    }
                }
                Op::Advance(epochs) => h.advance(epochs),
            }
            prop_assert_eq!(h.chef.user_info(&pool_id, &staker).amount, staked);
            prop_assert_eq!(h.chef.user_info(&pool_id, &sponsor).amount, 0);
            prop_assert_eq!(h.chef.pool_info(&pool_id).total_staked, staked);
        }

        h.chef.withdraw(&staker, &pool_id, &staked, &staker);
        withdrawn += staked;

        prop_assert_eq!(withdrawn, deposited);
        prop_assert_eq!(h.balance(&token, &sponsor), initial - sponsored);
        prop_assert_eq!(h.balance(&token, &staker), initial + sponsored);
        prop_assert_eq!(h.balance(&token, &h.chef.address), 0);
    }

    #[test]
    fn prop_over_withdraw_never_mutates(
        stake in 0i128..5_000,
        excess in 1i128..5_000,
        elapsed in 0u32..50,
    ) {
        let h = Harness::new(100);
        let (pool_id, token) = h.add_pool(10);
        let staker = h.staker(&token, stake);
        h.chef.deposit(&staker, &pool_id, &stake, &staker);
        h.advance(elapsed);

        let pool_before = h.chef.pool_info(&pool_id);
        let position_before = h.chef.user_info(&pool_id, &staker);

        let result = h.chef.try_withdraw(&staker, &pool_id, &(stake + excess), &staker);
        prop_assert!(matches!(result, Err(Ok(LedgerError::InsufficientBalance))));

        prop_assert_eq!(h.chef.pool_info(&pool_id), pool_before);
        prop_assert_eq!(h.chef.user_info(&pool_id, &staker), position_before);
        prop_assert_eq!(h.balance(&h.reward_token, &staker), 0);
    }

    #[test]
    fn prop_zero_deposit_settles_once(stake in 1i128..5_000, elapsed in 1u32..100) {
        let h = Harness::new(100);
        let (pool_id, token) = h.add_pool(10);
        let staker = h.staker(&token, stake);
        h.chef.deposit(&staker, &pool_id, &stake, &staker);
        h.advance(elapsed);

        let pending = h.chef.pending_reward(&pool_id, &staker);
        let first = h.chef.deposit(&staker, &pool_id, &0, &staker);
        let second = h.chef.deposit(&staker, &pool_id, &0, &staker);

        prop_assert_eq!(first, pending);
        prop_assert_eq!(second, 0);
        prop_assert_eq!(h.chef.user_info(&pool_id, &staker).amount, stake);
        prop_assert_eq!(h.balance(&h.reward_token, &staker), pending);
    }
}
