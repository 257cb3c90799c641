//! Common utilities and types used throughout the harness.
//!
//! This module provides the building blocks shared by every component. It includes:
//! 1. **Address Types:** A strong type for 16-bit bus addresses with explicit wraparound.
//! 2. **Constants:** Memory window, byte-select, and timing constants.
//! 3. **Error Handling:** Load, configuration, trace, and harness error types.

/// Bus address type.
pub mod addr;

/// Common constants used throughout the harness.
pub mod constants;

/// Error types.
pub mod error;

pub use addr::BusAddr;
pub use constants::{ERASED_BYTE, MEMORY_SIZE};
pub use error::{ConfigError, HarnessError, LoadError, TraceError};
