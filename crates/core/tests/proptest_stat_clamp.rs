//! Property-based tests for resource stat clamping
//!
//! Validates stat invariants:
//! - The level stays inside [min, max] under arbitrary mutation sequences
//! - The level is never NaN, even for NaN/infinite inputs
//! - add/subtract report exactly the delta applied

use proptest::prelude::*;
use thirstcraft_core::ResourceStat;

/// Mutation operations applied to a stat in sequence.
#[derive(Debug, Clone)]
enum Op {
    Add(f32),
    Subtract(f32),
    Set(f32),
}

fn arb_amount() -> impl Strategy<Value = f32> {
    prop_oneof![
        -1e6f32..1e6f32,
        Just(f32::NAN),
        Just(f32::INFINITY),
        Just(f32::NEG_INFINITY),
        Just(f32::MAX),
        Just(f32::MIN),
    ]
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        arb_amount().prop_map(Op::Add),
        arb_amount().prop_map(Op::Subtract),
        arb_amount().prop_map(Op::Set),
    ]
}

proptest! {
    /// Property: the level never escapes [0, max] and never becomes NaN.
    #[test]
    fn level_stays_clamped(
        max in 1.0f32..1000.0,
        ops in prop::collection::vec(arb_op(), 0..64),
    ) {
        let mut stat = ResourceStat::full(max);

        for op in ops {
            match op {
                Op::Add(v) => { stat.add(v); }
                Op::Subtract(v) => { stat.subtract(v); }
                Op::Set(v) => stat.set_level(v),
            }

            prop_assert!(
                stat.level().is_finite(),
                "Level became non-finite: {}",
                stat.level()
            );
            prop_assert!(
                stat.level() >= 0.0 && stat.level() <= max,
                "Level {} escaped [0, {}]",
                stat.level(),
                max
            );
        }
    }

    /// Property: add returns exactly the delta applied.
    #[test]
    fn add_reports_applied_delta(
        start in 0.0f32..100.0,
        amount in 0.0f32..200.0,
    ) {
        let mut stat = ResourceStat::with_level(100.0, start);
        let before = stat.level();
        let applied = stat.add(amount);

        prop_assert!((stat.level() - (before + applied)).abs() < 1e-3);
        prop_assert!(applied <= amount + 1e-3);
    }

    /// Property: subtract returns exactly the delta removed.
    #[test]
    fn subtract_reports_removed_delta(
        start in 0.0f32..100.0,
        amount in 0.0f32..200.0,
    ) {
        let mut stat = ResourceStat::with_level(100.0, start);
        let before = stat.level();
        let removed = stat.subtract(amount);

        prop_assert!((stat.level() - (before - removed)).abs() < 1e-3);
        prop_assert!(removed <= amount + 1e-3);
    }

    /// Property: percentage is always inside [0, 1].
    #[test]
    fn percentage_in_unit_range(
        max in 1.0f32..1000.0,
        level in arb_amount(),
    ) {
        let stat = ResourceStat::with_level(max, level);
        let pct = stat.percentage();
        prop_assert!((0.0..=1.0).contains(&pct), "Percentage {} out of range", pct);
    }
}
