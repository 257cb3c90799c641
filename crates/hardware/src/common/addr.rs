//! Bus address type.
//!
//! This module defines a strong type for addresses on the core's 16-bit bus. It provides:
//! 1. **Type Safety:** Keeps bus addresses apart from raw data words and host indices.
//! 2. **Wraparound:** Makes modulo-65536 address arithmetic explicit at every call site.
//! 3. **Indexing:** Converts to a host index that is always inside the memory window.

use std::fmt;

/// An address on the core's 16-bit memory bus.
///
/// Every value is a valid index into the 64 KiB memory window, so indexing by
/// `BusAddr` can never leave the window. Incrementing wraps from `0xFFFF` to `0x0000`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BusAddr(pub u16);

impl BusAddr {
    /// Creates a new bus address from a raw 16-bit value.
    #[inline(always)]
    pub const fn new(addr: u16) -> Self {
        Self(addr)
    }

    /// Returns the raw 16-bit address value.
    #[inline(always)]
    pub const fn val(self) -> u16 {
        self.0
    }

    /// Returns the address as a host index into the memory window.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the address of the following byte, wrapping modulo 65536.
    ///
    /// # Returns
    ///
    /// `self + 1`, with `0xFFFF` wrapping to `0x0000`.
    #[inline(always)]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Returns the address `delta` bytes further on, wrapping modulo 65536.
    #[inline(always)]
    pub const fn offset(self, delta: u16) -> Self {
        Self(self.0.wrapping_add(delta))
    }
}

impl From<u16> for BusAddr {
    fn from(addr: u16) -> Self {
        Self(addr)
    }
}

impl fmt::Display for BusAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}
