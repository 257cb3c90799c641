//! Simulation control and image loading.
//!
//! Provides the image loader, the picosecond clock, and the harness that
//! sequences reset, bus servicing and core evaluation.

pub mod clock;
pub mod harness;
pub mod loader;

pub use clock::{Clock, Edge};
pub use harness::{Harness, RunOutcome, SequencerState, StopReason};
