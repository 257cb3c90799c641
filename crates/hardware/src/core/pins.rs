//! Pin-level interface of the core under test.
//!
//! Inputs are driven by the harness before each evaluation; outputs are sampled by
//! the bus responder and the run loop after it.

use crate::common::BusAddr;
use crate::common::constants::{BYTE_SELECT_HIGH, BYTE_SELECT_LOW};

/// Two-bit byte-lane mask of a bus request.
///
/// Bit 0 enables the low byte at `address`, bit 1 the high byte at `address + 1`.
/// Bits above bit 1 are discarded on construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ByteSelect(u8);

impl ByteSelect {
    /// No lane active: the bus is idle.
    pub const NONE: Self = Self(0);
    /// Low byte only.
    pub const LOW: Self = Self(BYTE_SELECT_LOW);
    /// High byte only.
    pub const HIGH: Self = Self(BYTE_SELECT_HIGH);
    /// Both bytes (16-bit word).
    pub const WORD: Self = Self(BYTE_SELECT_LOW | BYTE_SELECT_HIGH);

    /// Builds a mask from raw pin bits, keeping only the two lane bits.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & (BYTE_SELECT_LOW | BYTE_SELECT_HIGH))
    }

    /// Returns the raw two-bit mask.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns `true` when no lane is selected.
    #[inline]
    pub const fn is_idle(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` when the low byte lane is selected.
    #[inline]
    pub const fn low(self) -> bool {
        self.0 & BYTE_SELECT_LOW != 0
    }

    /// Returns `true` when the high byte lane is selected.
    #[inline]
    pub const fn high(self) -> bool {
        self.0 & BYTE_SELECT_HIGH != 0
    }
}

/// Values the harness drives into the core.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CoreInputs {
    /// Clock level.
    pub clock: bool,
    /// Synchronous reset, active high.
    pub reset: bool,
    /// Read data returned by the bus.
    pub data_in: u16,
    /// Bus acknowledge.
    pub ack: bool,
}

/// Values the core drives towards the harness.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CoreOutputs {
    /// Active byte lanes; `NONE` means no request.
    pub byte_select: ByteSelect,
    /// Request address.
    pub address: BusAddr,
    /// Request is a write.
    pub write_enable: bool,
    /// Write data.
    pub data_out: u16,
    /// The core has reached the end of its program.
    pub finished: bool,
}

/// Full pin state at one point in simulated time, as handed to the recorder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PinSnapshot {
    /// Inputs driven during the step.
    pub inputs: CoreInputs,
    /// Outputs after the step's evaluation.
    pub outputs: CoreOutputs,
}
