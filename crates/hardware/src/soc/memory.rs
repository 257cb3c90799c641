//! Flat 64 KiB memory model.
//!
//! This module implements the byte array the bus responder reads and writes. It provides:
//! 1. **Storage:** A fixed 65536-byte window, filled with the erased pattern at creation.
//! 2. **Lane Access:** Byte-select aware 16-bit reads and writes with wraparound at `0xFFFF`.
//! 3. **Loading:** Bulk placement of an image before simulation starts.

use std::fmt;

use crate::common::constants::{ERASED_BYTE, MEMORY_SIZE};
use crate::common::error::LoadError;
use crate::common::BusAddr;
use crate::core::ByteSelect;

/// The harness memory window.
///
/// Capacity is fixed at 64 KiB for the lifetime of the value. Because every
/// [`BusAddr`] is a valid index, no access can leave the window.
#[derive(Clone, PartialEq, Eq)]
pub struct Memory {
    bytes: Box<[u8; MEMORY_SIZE]>,
}

impl Memory {
    /// Creates an erased memory window.
    pub fn new() -> Self {
        Self {
            bytes: Box::new([ERASED_BYTE; MEMORY_SIZE]),
        }
    }

    /// Reads one byte.
    #[inline]
    pub fn read_u8(&self, addr: BusAddr) -> u8 {
        self.bytes[addr.index()]
    }

    /// Writes one byte.
    #[inline]
    pub fn write_u8(&mut self, addr: BusAddr, value: u8) {
        self.bytes[addr.index()] = value;
    }

    /// Reads the lanes selected by `select`.
    ///
    /// The low byte comes from `addr`, the high byte from `addr + 1` (wrapping).
    /// Unselected lanes read as zero.
    pub fn read(&self, addr: BusAddr, select: ByteSelect) -> u16 {
        let lo = if select.low() { self.read_u8(addr) } else { 0 };
        let hi = if select.high() {
            self.read_u8(addr.next())
        } else {
            0
        };
        u16::from_le_bytes([lo, hi])
    }

    /// Writes the lanes selected by `select`; unselected bytes are left untouched.
    pub fn write(&mut self, addr: BusAddr, select: ByteSelect, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        if select.low() {
            self.write_u8(addr, lo);
        }
        if select.high() {
            self.write_u8(addr.next(), hi);
        }
    }

    /// Copies `data` into memory starting at `offset`.
    ///
    /// The image must fit entirely below the end of the window; it never wraps.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Overflow` without modifying memory if the image would
    /// extend past `0xFFFF`.
    pub fn load(&mut self, offset: BusAddr, data: &[u8]) -> Result<(), LoadError> {
        let start = offset.index();
        let end = start
            .checked_add(data.len())
            .filter(|&end| end <= MEMORY_SIZE)
            .ok_or(LoadError::Overflow {
                offset: offset.val(),
                len: data.len(),
            })?;
        self.bytes[start..end].copy_from_slice(data);
        Ok(())
    }

    /// Returns `true` if every byte still holds the erased pattern.
    pub fn is_erased(&self) -> bool {
        self.bytes.iter().all(|&b| b == ERASED_BYTE)
    }

    /// Returns the whole window as a slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..]
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Memory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memory")
            .field("size", &MEMORY_SIZE)
            .field("erased", &self.is_erased())
            .finish()
    }
}
