//! # Memory Tests
//!
//! Erased state, byte-lane masking, wraparound and image placement.

use pretty_assertions::assert_eq;
use primsim_core::Memory;
use primsim_core::common::{BusAddr, ERASED_BYTE, LoadError, MEMORY_SIZE};
use primsim_core::core::ByteSelect;
use proptest::prelude::*;

#[test]
fn new_memory_is_erased() {
    let mem = Memory::new();
    assert!(mem.is_erased());
    assert_eq!(mem.as_slice().len(), MEMORY_SIZE);
    assert!(mem.as_slice().iter().all(|&b| b == ERASED_BYTE));
    assert_eq!(mem.read(BusAddr::new(0x1234), ByteSelect::WORD), 0xFFFF);
}

#[test]
fn word_is_little_endian() {
    let mut mem = Memory::new();
    mem.load(BusAddr::new(0x10), &[0x34, 0x12]).unwrap();
    assert_eq!(mem.read(BusAddr::new(0x10), ByteSelect::WORD), 0x1234);
}

#[test]
fn unselected_lanes_read_zero() {
    let mut mem = Memory::new();
    mem.load(BusAddr::new(0x10), &[0x34, 0x12]).unwrap();
    assert_eq!(mem.read(BusAddr::new(0x10), ByteSelect::LOW), 0x0034);
    assert_eq!(mem.read(BusAddr::new(0x10), ByteSelect::HIGH), 0x1200);
    assert_eq!(mem.read(BusAddr::new(0x10), ByteSelect::NONE), 0x0000);
}

#[test]
fn low_lane_write_leaves_neighbour() {
    let mut mem = Memory::new();
    mem.write(BusAddr::new(0x20), ByteSelect::LOW, 0xBEEF);
    assert_eq!(mem.read_u8(BusAddr::new(0x20)), 0xEF);
    assert_eq!(mem.read_u8(BusAddr::new(0x21)), ERASED_BYTE);
}

#[test]
fn high_lane_write_leaves_base() {
    let mut mem = Memory::new();
    mem.write(BusAddr::new(0x20), ByteSelect::HIGH, 0xBEEF);
    assert_eq!(mem.read_u8(BusAddr::new(0x20)), ERASED_BYTE);
    assert_eq!(mem.read_u8(BusAddr::new(0x21)), 0xBE);
}

#[test]
fn word_access_wraps_at_top() {
    let mut mem = Memory::new();
    mem.write(BusAddr::new(0xFFFF), ByteSelect::WORD, 0xA55A);
    assert_eq!(mem.read_u8(BusAddr::new(0xFFFF)), 0x5A);
    assert_eq!(mem.read_u8(BusAddr::new(0x0000)), 0xA5);
    assert_eq!(mem.read(BusAddr::new(0xFFFF), ByteSelect::WORD), 0xA55A);
}

#[test]
fn load_places_bytes_at_offset() {
    let mut mem = Memory::new();
    mem.load(BusAddr::new(0x100), &[1, 2, 3]).unwrap();
    assert_eq!(mem.as_slice()[0x100..0x103], [1, 2, 3]);
    assert_eq!(mem.read_u8(BusAddr::new(0xFF)), ERASED_BYTE);
    assert_eq!(mem.read_u8(BusAddr::new(0x103)), ERASED_BYTE);
}

#[test]
fn empty_load_keeps_memory_erased() {
    let mut mem = Memory::new();
    mem.load(BusAddr::new(0), &[]).unwrap();
    assert!(mem.is_erased());
}

#[test]
fn full_window_image_fits() {
    let mut mem = Memory::new();
    let image = vec![0u8; MEMORY_SIZE];
    mem.load(BusAddr::new(0), &image).unwrap();
    assert!(mem.as_slice().iter().all(|&b| b == 0));
}

#[test]
fn overflowing_load_is_rejected_untouched() {
    let mut mem = Memory::new();
    let err = mem.load(BusAddr::new(0xFFFE), &[1, 2, 3]).unwrap_err();
    assert!(matches!(
        err,
        LoadError::Overflow {
            offset: 0xFFFE,
            len: 3
        }
    ));
    assert!(mem.is_erased());
}

proptest! {
    /// A full-word write followed by a full-word read returns the data, anywhere.
    #[test]
    fn word_round_trip(addr in any::<u16>(), value in any::<u16>()) {
        let mut mem = Memory::new();
        mem.write(BusAddr::new(addr), ByteSelect::WORD, value);
        prop_assert_eq!(mem.read(BusAddr::new(addr), ByteSelect::WORD), value);
    }

    /// A single-lane write touches exactly one byte.
    #[test]
    fn single_lane_write_touches_one_byte(addr in any::<u16>(), value in any::<u16>(), high in any::<bool>()) {
        let mut mem = Memory::new();
        let select = if high { ByteSelect::HIGH } else { ByteSelect::LOW };
        mem.write(BusAddr::new(addr), select, value);
        let changed = mem.as_slice().iter().filter(|&&b| b != ERASED_BYTE).count();
        let [lo, hi] = value.to_le_bytes();
        let written = if high { hi } else { lo };
        prop_assert_eq!(changed, usize::from(written != ERASED_BYTE));
    }
}
