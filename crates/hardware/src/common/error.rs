//! Harness error definitions.
//!
//! This module defines the error types reported by the harness. It provides:
//! 1. **Load Errors:** Image files that cannot be read or do not fit the memory window.
//! 2. **Configuration Errors:** Invalid clock, budget, or JSON configuration.
//! 3. **Trace Errors:** Waveform recorder I/O and protocol failures.
//! 4. **Harness Errors:** The umbrella type returned by the run loop.
//!
//! Bus accesses to reserved addresses are deliberately absent: they are absorbed,
//! not reported.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::sim::harness::SequencerState;

/// Failure while placing an image into memory.
///
/// When a load fails, memory is left exactly as it was before the call.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The image file could not be opened or read.
    #[error("could not read image '{}': {source}", .path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The image would extend past the end of the 64 KiB window.
    #[error("image of {len} bytes at offset {offset:#06x} does not fit the 64 KiB memory window")]
    Overflow {
        /// Requested load offset.
        offset: u16,
        /// Image length in bytes.
        len: usize,
    },
}

/// Invalid harness configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The clock period cannot be split into two equal phases.
    #[error("clock period must be a non-zero even number of picoseconds, got {0}")]
    ClockPeriod(u64),

    /// The cycle budget leaves no room for the reset pulse.
    #[error("cycle budget must be at least one clock period")]
    ZeroBudget,

    /// The sub-cycle step count does not fit the clock period.
    #[error(
        "sub-cycle step count {steps} must be even, at least 2, and divide the clock period of {period_ps} ps"
    )]
    SubCycleSteps {
        /// Requested evaluation steps per clock period.
        steps: u32,
        /// Configured clock period.
        period_ps: u64,
    },

    /// The JSON document could not be deserialized.
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure in the waveform recorder.
#[derive(Debug, Error)]
pub enum TraceError {
    /// Writing the waveform file failed.
    #[error("waveform I/O error: {0}")]
    Io(#[from] io::Error),

    /// A dump was requested at or before the previous timestamp.
    #[error("timestamp {time} ps is not after the previous dump at {last} ps")]
    NonMonotonic {
        /// Rejected timestamp.
        time: u64,
        /// Timestamp of the last accepted dump.
        last: u64,
    },

    /// The recorder was used after `close`.
    #[error("waveform recorder is already closed")]
    Closed,
}

/// Errors surfaced by the harness run loop.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Image loading failed.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The waveform recorder failed.
    #[error(transparent)]
    Trace(#[from] TraceError),

    /// An operation was attempted in the wrong sequencer state.
    #[error("operation requires the {expected:?} state, harness is {actual:?}")]
    InvalidState {
        /// State the operation needs.
        expected: SequencerState,
        /// State the harness is in.
        actual: SequencerState,
    },
}
