//! # Clock Tests

use primsim_core::sim::{Clock, Edge};
use rstest::rstest;

#[test]
fn starts_high_at_time_zero() {
    let clk = Clock::new(10_000, 2);
    assert!(clk.level());
    assert_eq!(clk.now_ps(), 0);
    assert_eq!(clk.cycles(), 0);
    assert_eq!(clk.step_ps(), 5_000);
}

#[test]
fn level_follows_half_periods() {
    let clk = Clock::new(10_000, 2);
    assert!(clk.level_at(0));
    assert!(clk.level_at(4_999));
    assert!(!clk.level_at(5_000));
    assert!(!clk.level_at(9_999));
    assert!(clk.level_at(10_000));
}

/// Every discipline produces exactly one rising and one falling edge per period.
#[rstest]
#[case(2)]
#[case(4)]
#[case(10)]
fn one_edge_pair_per_period(#[case] steps_per_cycle: u32) {
    let mut clk = Clock::new(10_000, steps_per_cycle);
    assert_eq!(clk.steps_per_cycle(), u64::from(steps_per_cycle));

    let edges: Vec<Edge> = (0..steps_per_cycle * 5)
        .filter_map(|_| clk.advance())
        .collect();
    assert_eq!(edges.len(), 10);
    assert!(edges.chunks(2).all(|p| p == [Edge::Falling, Edge::Rising]));
    assert_eq!(clk.now_ps(), 50_000);
    assert_eq!(clk.cycles(), 5);
    assert!(clk.level());
}

#[test]
fn half_period_alternates_level_each_step() {
    let mut clk = Clock::new(10_000, 2);
    for step in 1..=8u64 {
        let _ = clk.advance();
        assert_eq!(clk.now_ps(), step * 5_000);
        assert_eq!(clk.level(), step % 2 == 0);
    }
}
