//! Core under test.
//!
//! This module defines the contract between the harness and the core it drives. It provides:
//! 1. **Pins:** Input and output pin bundles plus the byte-select mask.
//! 2. **Core Trait:** The stimulus/response interface every core model implements.
//! 3. **Reference Core:** `PrimCore`, a behavioral model of the prim bus master used by the CLI.
//!
//! The harness never looks inside a core. Anything that implements [`Core`] can be
//! driven, whether it is a behavioral model or a wrapper around generated RTL.

/// Pin bundles and byte-select mask.
pub mod pins;

/// Behavioral prim core model.
pub mod prim;

pub use pins::{ByteSelect, CoreInputs, CoreOutputs, PinSnapshot};
pub use prim::PrimCore;

/// Synchronous core driven by the harness.
///
/// Every step the harness calls `set_inputs`, then `eval`, then samples `outputs`.
/// Outputs must only change inside `eval`.
pub trait Core {
    /// Drives the input pins. Takes effect at the next `eval`.
    fn set_inputs(&mut self, inputs: CoreInputs);

    /// Returns the current output pins.
    fn outputs(&self) -> CoreOutputs;

    /// Evaluates the model against the current inputs (edge detection included).
    fn eval(&mut self);

    /// Runs end-of-simulation hooks. Called exactly once, before the recorder closes.
    fn finalize(&mut self);
}

impl<C: Core + ?Sized> Core for Box<C> {
    fn set_inputs(&mut self, inputs: CoreInputs) {
        (**self).set_inputs(inputs);
    }

    fn outputs(&self) -> CoreOutputs {
        (**self).outputs()
    }

    fn eval(&mut self) {
        (**self).eval();
    }

    fn finalize(&mut self) {
        (**self).finalize();
    }
}
