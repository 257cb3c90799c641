//! Bus responder.
//!
//! Answers the core's memory requests once per evaluation step. It performs:
//! 1. **Decode:** Classifies a request as idle, memory, or reserved-device space.
//! 2. **Read:** Drives byte-select masked memory data onto `data_in` on every active step.
//! 3. **Write:** Commits write data only while the clock is high, modelling a synchronous port.
//! 4. **Acknowledge:** Raises `ack` according to the configured [`AckPolicy`].
//!
//! Reserved addresses are acknowledged and otherwise ignored; no device is
//! attached to that range.

use tracing::debug;

use crate::common::BusAddr;
use crate::config::{AckPolicy, HarnessConfig};
use crate::core::CoreOutputs;
use crate::soc::memory::Memory;

/// Values the responder drives back into the core.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BusResponse {
    /// Read data for the core's `data_in` pins.
    pub data_in: u16,
    /// Acknowledge for the core's `ack` pin.
    pub ack: bool,
}

/// Address-space classification of one bus step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BusRegion {
    /// No byte lane selected.
    Idle,
    /// Request inside the memory window.
    Memory,
    /// Request at or above the reserved base.
    Reserved,
}

/// Per-run counters kept by the responder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BusStats {
    /// Steps with no byte lane selected.
    pub idle: u64,
    /// Steps with an active request to memory.
    pub memory_requests: u64,
    /// Steps on which a write was committed to memory.
    pub writes: u64,
    /// Steps with an active request to the reserved range.
    pub reserved: u64,
    /// Steps on which `ack` was asserted.
    pub acks: u64,
}

/// Memory-mapped bus responder.
#[derive(Clone, Debug)]
pub struct BusResponder {
    ack_policy: AckPolicy,
    reserved_base: Option<BusAddr>,
    stats: BusStats,
}

impl BusResponder {
    /// Creates a responder.
    ///
    /// # Arguments
    ///
    /// * `ack_policy` - Acknowledge timing, fixed for the responder's lifetime.
    /// * `reserved_base` - First non-memory address, or `None` to map all 64 KiB.
    pub const fn new(ack_policy: AckPolicy, reserved_base: Option<u16>) -> Self {
        let reserved_base = match reserved_base {
            Some(base) => Some(BusAddr::new(base)),
            None => None,
        };
        Self {
            ack_policy,
            reserved_base,
            stats: BusStats {
                idle: 0,
                memory_requests: 0,
                writes: 0,
                reserved: 0,
                acks: 0,
            },
        }
    }

    /// Creates a responder from the harness configuration.
    pub const fn from_config(config: &HarnessConfig) -> Self {
        Self::new(config.ack_policy, config.reserved_base)
    }

    /// Returns the acknowledge policy.
    pub const fn ack_policy(&self) -> AckPolicy {
        self.ack_policy
    }

    /// Returns the counters accumulated so far.
    pub const fn stats(&self) -> BusStats {
        self.stats
    }

    /// Classifies the request currently on the core's output pins.
    pub fn classify(&self, outputs: &CoreOutputs) -> BusRegion {
        if outputs.byte_select.is_idle() {
            BusRegion::Idle
        } else if self.reserved_base.is_some_and(|base| outputs.address >= base) {
            BusRegion::Reserved
        } else {
            BusRegion::Memory
        }
    }

    const fn ack_for(&self, clock_high: bool) -> bool {
        match self.ack_policy {
            AckPolicy::Immediate => true,
            AckPolicy::ClockLow => !clock_high,
        }
    }

    /// Services one evaluation step.
    ///
    /// # Arguments
    ///
    /// * `memory` - Memory window backing the bus.
    /// * `outputs` - The core's outputs from the most recent evaluation.
    /// * `clock_high` - Clock level before this step's toggle.
    ///
    /// # Returns
    ///
    /// The `data_in`/`ack` values to drive for the next evaluation. Read data
    /// reflects memory before any write committed on the same step.
    pub fn service(
        &mut self,
        memory: &mut Memory,
        outputs: &CoreOutputs,
        clock_high: bool,
    ) -> BusResponse {
        let response = match self.classify(outputs) {
            BusRegion::Idle => {
                self.stats.idle += 1;
                return BusResponse::default();
            }
            BusRegion::Memory => {
                self.stats.memory_requests += 1;
                let select = outputs.byte_select;
                let data_in = memory.read(outputs.address, select);
                if outputs.write_enable && clock_high {
                    memory.write(outputs.address, select, outputs.data_out);
                    self.stats.writes += 1;
                    debug!(
                        addr = %outputs.address,
                        select = select.bits(),
                        data = outputs.data_out,
                        "bus write"
                    );
                }
                BusResponse {
                    data_in,
                    ack: self.ack_for(clock_high),
                }
            }
            BusRegion::Reserved => {
                self.stats.reserved += 1;
                debug!(
                    addr = %outputs.address,
                    write = outputs.write_enable,
                    "reserved-range access absorbed"
                );
                BusResponse {
                    data_in: 0,
                    ack: self.ack_for(clock_high),
                }
            }
        };
        if response.ack {
            self.stats.acks += 1;
        }
        response
    }
}
