//! # Bus Responder Tests
//!
//! Request classification, read/write servicing, acknowledge policies and
//! the reserved range.

use pretty_assertions::assert_eq;
use primsim_core::Memory;
use primsim_core::common::{BusAddr, ERASED_BYTE};
use primsim_core::config::AckPolicy;
use primsim_core::core::{ByteSelect, CoreOutputs};
use primsim_core::soc::{BusRegion, BusResponder, BusResponse};
use proptest::prelude::*;
use rstest::rstest;

use crate::common::harness::{request, write_request};

fn loaded() -> Memory {
    let mut mem = Memory::new();
    mem.load(BusAddr::new(0x40), &[0x34, 0x12]).unwrap();
    mem
}

#[test]
fn classify_regions() {
    let bus = BusResponder::new(AckPolicy::ClockLow, Some(0xFFFE));
    assert_eq!(bus.classify(&CoreOutputs::default()), BusRegion::Idle);
    assert_eq!(bus.classify(&request(0xFFFD, ByteSelect::LOW)), BusRegion::Memory);
    assert_eq!(bus.classify(&request(0xFFFE, ByteSelect::LOW)), BusRegion::Reserved);
    assert_eq!(bus.classify(&request(0xFFFF, ByteSelect::WORD)), BusRegion::Reserved);

    let flat = BusResponder::new(AckPolicy::ClockLow, None);
    assert_eq!(flat.classify(&request(0xFFFF, ByteSelect::WORD)), BusRegion::Memory);
}

#[test]
fn idle_request_is_not_acknowledged() {
    let mut bus = BusResponder::new(AckPolicy::Immediate, Some(0xFFFE));
    let mut mem = loaded();
    let response = bus.service(&mut mem, &CoreOutputs::default(), false);
    assert_eq!(response, BusResponse::default());
    assert_eq!(bus.stats().idle, 1);
    assert_eq!(bus.stats().acks, 0);
}

#[rstest]
#[case::clock_low_high_phase(AckPolicy::ClockLow, true, false)]
#[case::clock_low_low_phase(AckPolicy::ClockLow, false, true)]
#[case::immediate_high_phase(AckPolicy::Immediate, true, true)]
#[case::immediate_low_phase(AckPolicy::Immediate, false, true)]
fn read_data_driven_ack_by_policy(
    #[case] policy: AckPolicy,
    #[case] clock_high: bool,
    #[case] expect_ack: bool,
) {
    let mut bus = BusResponder::new(policy, Some(0xFFFE));
    let mut mem = loaded();
    let response = bus.service(&mut mem, &request(0x40, ByteSelect::WORD), clock_high);
    assert_eq!(
        response,
        BusResponse {
            data_in: 0x1234,
            ack: expect_ack
        }
    );
}

#[test]
fn write_commits_only_while_clock_high() {
    let mut bus = BusResponder::new(AckPolicy::ClockLow, Some(0xFFFE));
    let mut mem = Memory::new();
    let req = write_request(0x80, ByteSelect::WORD, 0xBEEF);

    let _ = bus.service(&mut mem, &req, false);
    assert!(mem.is_erased());

    let _ = bus.service(&mut mem, &req, true);
    assert_eq!(mem.read(BusAddr::new(0x80), ByteSelect::WORD), 0xBEEF);
    assert_eq!(bus.stats().writes, 1);
}

#[test]
fn write_step_returns_data_before_write() {
    let mut bus = BusResponder::new(AckPolicy::Immediate, Some(0xFFFE));
    let mut mem = loaded();
    let response = bus.service(&mut mem, &write_request(0x40, ByteSelect::WORD, 0xAAAA), true);
    assert_eq!(response.data_in, 0x1234);
    assert_eq!(mem.read(BusAddr::new(0x40), ByteSelect::WORD), 0xAAAA);
}

#[test]
fn low_lane_write_only_touches_addressed_byte() {
    let mut bus = BusResponder::new(AckPolicy::ClockLow, Some(0xFFFE));
    let mut mem = Memory::new();
    let _ = bus.service(&mut mem, &write_request(0x80, ByteSelect::LOW, 0xBEEF), true);
    assert_eq!(mem.read_u8(BusAddr::new(0x80)), 0xEF);
    assert_eq!(mem.read_u8(BusAddr::new(0x81)), ERASED_BYTE);
}

#[test]
fn reserved_access_is_absorbed() {
    let mut bus = BusResponder::new(AckPolicy::ClockLow, Some(0xFFFE));
    let mut mem = Memory::new();
    let response = bus.service(&mut mem, &write_request(0xFFFE, ByteSelect::WORD, 0x1234), true);
    assert_eq!(response.data_in, 0);
    assert!(!response.ack);
    assert!(mem.is_erased());

    let response = bus.service(&mut mem, &write_request(0xFFFE, ByteSelect::WORD, 0x1234), false);
    assert!(response.ack);
    assert!(mem.is_erased());
    assert_eq!(bus.stats().reserved, 2);
    assert_eq!(bus.stats().writes, 0);
}

#[test]
fn high_lane_at_top_wraps_to_zero_without_reserved_range() {
    let mut bus = BusResponder::new(AckPolicy::ClockLow, None);
    let mut mem = Memory::new();
    let _ = bus.service(&mut mem, &write_request(0xFFFF, ByteSelect::HIGH, 0x5A00), true);
    assert_eq!(mem.read_u8(BusAddr::new(0x0000)), 0x5A);
    assert_eq!(mem.read_u8(BusAddr::new(0xFFFF)), ERASED_BYTE);
}

#[test]
fn stats_count_requests_and_acks() {
    let mut bus = BusResponder::new(AckPolicy::ClockLow, Some(0xFFFE));
    let mut mem = loaded();
    let req = request(0x40, ByteSelect::LOW);
    let _ = bus.service(&mut mem, &req, true);
    let _ = bus.service(&mut mem, &req, false);
    let _ = bus.service(&mut mem, &CoreOutputs::default(), false);
    let stats = bus.stats();
    assert_eq!(stats.memory_requests, 2);
    assert_eq!(stats.acks, 1);
    assert_eq!(stats.idle, 1);
}

fn any_policy() -> impl Strategy<Value = AckPolicy> {
    prop_oneof![Just(AckPolicy::ClockLow), Just(AckPolicy::Immediate)]
}

proptest! {
    /// Acknowledge is never asserted while byte-select is zero.
    #[test]
    fn no_ack_without_byte_select(
        policy in any_policy(),
        addr in any::<u16>(),
        write_enable in any::<bool>(),
        data_out in any::<u16>(),
        clock_high in any::<bool>(),
    ) {
        let mut bus = BusResponder::new(policy, Some(0xFFFE));
        let mut mem = Memory::new();
        let outputs = CoreOutputs {
            byte_select: ByteSelect::NONE,
            address: BusAddr::new(addr),
            write_enable,
            data_out,
            finished: false,
        };
        let response = bus.service(&mut mem, &outputs, clock_high);
        prop_assert!(!response.ack);
        prop_assert!(mem.is_erased());
    }

    /// A word written through the bus reads back unchanged below the reserved range.
    #[test]
    fn bus_word_round_trip(addr in 0u16..0xFFFD, value in any::<u16>()) {
        let mut bus = BusResponder::new(AckPolicy::ClockLow, Some(0xFFFE));
        let mut mem = Memory::new();
        let _ = bus.service(&mut mem, &write_request(addr, ByteSelect::WORD, value), true);
        let response = bus.service(&mut mem, &request(addr, ByteSelect::WORD), false);
        prop_assert_eq!(response.data_in, value);
        prop_assert!(response.ack);
    }
}
