//! Shared test infrastructure.


/// Mock cores and recorders.
pub mod mocks;
