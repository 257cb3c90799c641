//! Cycle-level test harness library.
//!
//! This crate drives a synchronous 16-bit core through its pins with the following:
//! 1. **Core:** The `Core` pin-level trait and a behavioral prim core model.
//! 2. **Memory:** A flat 64 KiB window and the bus responder serving the core's requests.
//! 3. **Simulation:** Image loader, picosecond clock, and the reset/run sequencer.
//! 4. **Trace:** Waveform recording in value change dump format.
//! 5. **Statistics:** Step, cycle, and bus counters for a run.

/// Common types and constants (bus addresses, errors).
pub mod common;
/// Harness configuration (defaults, clock discipline, acknowledge policy).
pub mod config;
/// Core pin interface and reference core.
pub mod core;
/// Image loader, clock, and harness.
pub mod sim;
/// Memory window and bus responder.
pub mod soc;
/// Run statistics collection and reporting.
pub mod stats;
/// Waveform recorders.
pub mod trace;

/// Root configuration type; use `HarnessConfig::default()` or `HarnessConfig::from_json`.
pub use crate::config::HarnessConfig;
/// Pin-level core interface.
pub use crate::core::Core;
/// Top-level harness; construct with `Harness::new`.
pub use crate::sim::Harness;
/// Memory window.
pub use crate::soc::Memory;
