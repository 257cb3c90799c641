//! Memory system seen by the core.
//!
//! This module contains everything on the far side of the core's bus pins. It provides:
//! 1. **Memory:** The flat, erased-on-creation 64 KiB byte window.
//! 2. **Bus:** The responder that turns pin-level requests into memory reads and writes.

/// Bus responder.
pub mod bus;

/// Flat memory model.
pub mod memory;

pub use bus::{BusRegion, BusResponder, BusResponse, BusStats};
pub use memory::Memory;
