//! Global Harness Constants.
//!
//! This module defines system-wide constants used across the harness. It includes:
//! 1. **Memory Constants:** Window size and the erased fill pattern.
//! 2. **Bus Constants:** Byte-select lane bits and the reserved top-of-memory range.
//! 3. **Timing Constants:** Default clock period and cycle budget.

/// Size of the flat memory window in bytes (64 KiB, 16-bit address space).
pub const MEMORY_SIZE: usize = 0x1_0000;

/// Value every memory byte holds before an image is loaded.
///
/// Matches the core's `SIMEND` opcode so a fetch from unprogrammed memory halts
/// the simulation instead of executing garbage.
pub const ERASED_BYTE: u8 = 0xFF;

/// Byte-select bit enabling the low byte lane (`address`).
pub const BYTE_SELECT_LOW: u8 = 0b01;

/// Byte-select bit enabling the high byte lane (`address + 1`).
pub const BYTE_SELECT_HIGH: u8 = 0b10;

/// First address of the range reserved for non-memory devices.
///
/// Accesses at or above this address are acknowledged but never touch memory.
pub const RESERVED_BASE: u16 = 0xFFFE;

/// Clock period in picoseconds (100 MHz).
pub const CLOCK_PERIOD_PS: u64 = 10_000;

/// Number of full clock periods a run may last, reset included.
pub const MAX_CYCLES: u64 = 20;

/// Default waveform output file, relative to the working directory.
pub const TRACE_FILE: &str = "trace.vcd";
