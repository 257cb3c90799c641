//! Waveform recording.
//!
//! The harness feeds a recorder one pin snapshot per evaluation step. Recorders
//! are owned by the harness, closed on the finalize path, and dropped right after.

/// Value change dump writer.
pub mod vcd;

pub use vcd::VcdRecorder;

use crate::common::error::TraceError;
use crate::core::PinSnapshot;

/// Sink for timestamped pin snapshots.
pub trait WaveformRecorder {
    /// Records the pin state at `time_ps`.
    ///
    /// # Errors
    ///
    /// Fails if `time_ps` does not increase, the recorder is closed, or the
    /// underlying writer fails.
    fn dump(&mut self, time_ps: u64, pins: &PinSnapshot) -> Result<(), TraceError>;

    /// Flushes and closes the waveform. Further dumps fail with `TraceError::Closed`.
    ///
    /// # Errors
    ///
    /// Fails if the final flush fails or the recorder was already closed.
    fn close(&mut self) -> Result<(), TraceError>;
}
