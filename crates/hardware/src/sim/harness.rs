//! Harness: owns the core, memory, bus responder, clock and recorder side-by-side.
//!
//! A run moves through three states. `Reset` holds the reset pin high for one
//! clock period, `Running` repeats the step sequence below, and `Finished` is
//! entered when the core raises `finished` or the cycle budget is spent.
//!
//! One step is always, in order:
//! 1. service the bus against the outputs of the previous evaluation,
//! 2. advance time (toggling the clock when a half period is crossed),
//! 3. evaluate the core,
//! 4. hand the pin snapshot to the recorder.

use std::fmt;

use tracing::{info, trace};

use crate::common::error::{ConfigError, HarnessError, TraceError};
use crate::config::HarnessConfig;
use crate::core::{Core, CoreInputs, PinSnapshot};
use crate::sim::clock::Clock;
use crate::soc::{BusResponder, Memory};
use crate::stats::HarnessStats;
use crate::trace::WaveformRecorder;

/// Clock/reset sequencer state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequencerState {
    /// Reset pulse pending or in progress.
    Reset,
    /// Reset released; the core is being clocked.
    Running,
    /// Core finalized, recorder closed.
    Finished,
}

/// Why a run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The core asserted `finished`.
    CoreFinished,
    /// Simulated time reached the cycle budget.
    BudgetExhausted,
}

/// Summary of a completed run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunOutcome {
    /// Exit condition.
    pub reason: StopReason,
    /// Simulated time at the end of the run.
    pub time_ps: u64,
    /// Full clock periods elapsed.
    pub cycles: u64,
    /// Evaluation steps taken, reset steps included.
    pub steps: u64,
}

/// Top-level harness: exclusive owner of the core under test and its surroundings.
pub struct Harness<C: Core> {
    core: C,
    memory: Memory,
    bus: BusResponder,
    clock: Clock,
    inputs: CoreInputs,
    recorder: Option<Box<dyn WaveformRecorder>>,
    state: SequencerState,
    budget_ps: u64,
    stats: HarnessStats,
}

impl<C: Core> Harness<C> {
    /// Creates a harness around `core` and a (usually pre-loaded) memory window.
    ///
    /// # Errors
    ///
    /// Returns the validation error if `config` is not runnable.
    pub fn new(core: C, memory: Memory, config: &HarnessConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            core,
            memory,
            bus: BusResponder::from_config(config),
            clock: Clock::new(config.clock_period_ps, config.discipline.steps_per_cycle()),
            inputs: CoreInputs::default(),
            recorder: None,
            state: SequencerState::Reset,
            budget_ps: config.budget_ps(),
            stats: HarnessStats::new(),
        })
    }

    /// Attaches a waveform recorder. It is closed and dropped when the harness finalizes.
    #[must_use]
    pub fn with_recorder(mut self, recorder: Box<dyn WaveformRecorder>) -> Self {
        self.recorder = Some(recorder);
        self
    }

    /// Returns the sequencer state.
    pub const fn state(&self) -> SequencerState {
        self.state
    }

    /// Returns the core under test.
    pub const fn core(&self) -> &C {
        &self.core
    }

    /// Returns the memory window.
    pub const fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Returns the memory window for pre-run setup.
    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    /// Returns the clock.
    pub const fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Returns the inputs driven on the most recent evaluation.
    pub const fn inputs(&self) -> CoreInputs {
        self.inputs
    }

    /// Returns `true` while a recorder is attached and open.
    pub const fn is_recording(&self) -> bool {
        self.recorder.is_some()
    }

    /// Returns statistics for the run so far.
    pub fn stats(&self) -> HarnessStats {
        let mut stats = self.stats.clone();
        stats.cycles = self.clock.cycles();
        stats.sim_time_ps = self.clock.now_ps();
        stats.bus = self.bus.stats();
        stats
    }

    fn require(&self, expected: SequencerState) -> Result<(), HarnessError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(HarnessError::InvalidState {
                expected,
                actual: self.state,
            })
        }
    }

    /// Advances time one step, evaluates the core and records the result.
    fn advance(&mut self) -> Result<(), TraceError> {
        if let Some(edge) = self.clock.advance() {
            trace!(time_ps = self.clock.now_ps(), ?edge, "clock edge");
        }
        self.inputs.clock = self.clock.level();
        self.core.set_inputs(self.inputs);
        self.core.eval();
        self.stats.steps += 1;

        if let Some(recorder) = self.recorder.as_mut() {
            let pins = PinSnapshot {
                inputs: self.inputs,
                outputs: self.core.outputs(),
            };
            recorder.dump(self.clock.now_ps(), &pins)?;
        }
        Ok(())
    }

    /// Applies the reset pulse and moves to `Running`.
    ///
    /// Reset is held high, with `data_in` and `ack` cleared, for one full clock
    /// period: two steps under the half-period discipline, ending on a rising
    /// edge. The bus is not serviced while reset is asserted.
    ///
    /// # Errors
    ///
    /// `InvalidState` unless the harness is in `Reset`; trace errors from the recorder.
    pub fn reset(&mut self) -> Result<(), HarnessError> {
        self.require(SequencerState::Reset)?;
        self.inputs = CoreInputs {
            clock: self.clock.level(),
            reset: true,
            data_in: 0,
            ack: false,
        };
        self.core.set_inputs(self.inputs);
        for _ in 0..self.clock.steps_per_cycle() {
            self.advance()?;
        }
        self.inputs.reset = false;
        self.core.set_inputs(self.inputs);
        self.state = SequencerState::Running;
        info!(time_ps = self.clock.now_ps(), "reset released");
        Ok(())
    }

    /// Runs one step: service the bus, then advance the clock and evaluate.
    ///
    /// # Errors
    ///
    /// `InvalidState` unless the harness is `Running`; trace errors from the recorder.
    pub fn step(&mut self) -> Result<(), HarnessError> {
        self.require(SequencerState::Running)?;
        let outputs = self.core.outputs();
        let response = self
            .bus
            .service(&mut self.memory, &outputs, self.clock.level());
        self.inputs.data_in = response.data_in;
        self.inputs.ack = response.ack;
        self.advance()?;
        Ok(())
    }

    fn run_loop(&mut self) -> Result<StopReason, HarnessError> {
        if self.state == SequencerState::Reset {
            self.reset()?;
        }
        loop {
            if self.clock.now_ps() >= self.budget_ps {
                return Ok(StopReason::BudgetExhausted);
            }
            self.step()?;
            if self.core.outputs().finished {
                return Ok(StopReason::CoreFinished);
            }
        }
    }

    /// Runs reset (if still pending) and steps until the core finishes or the
    /// budget is spent, then finalizes.
    ///
    /// The core is finalized and the recorder closed even when a step fails.
    ///
    /// # Errors
    ///
    /// `InvalidState` if the harness already finished; the first trace error otherwise.
    pub fn run(&mut self) -> Result<RunOutcome, HarnessError> {
        if self.state == SequencerState::Finished {
            return Err(HarnessError::InvalidState {
                expected: SequencerState::Running,
                actual: self.state,
            });
        }
        let result = self.run_loop();
        let closed = self.finalize();
        let reason = result?;
        closed?;

        let outcome = RunOutcome {
            reason,
            time_ps: self.clock.now_ps(),
            cycles: self.clock.cycles(),
            steps: self.stats.steps,
        };
        match reason {
            StopReason::CoreFinished => info!(time_ps = outcome.time_ps, "simulation finished"),
            StopReason::BudgetExhausted => {
                info!(time_ps = outcome.time_ps, "cycle budget exhausted");
            }
        }
        Ok(outcome)
    }

    /// Finalizes the core, then closes and releases the recorder.
    ///
    /// Idempotent: once `Finished`, further calls do nothing.
    ///
    /// # Errors
    ///
    /// Returns the recorder's close error. The core is finalized regardless.
    pub fn finalize(&mut self) -> Result<(), TraceError> {
        if self.state == SequencerState::Finished {
            return Ok(());
        }
        self.state = SequencerState::Finished;
        self.core.finalize();
        if let Some(mut recorder) = self.recorder.take() {
            recorder.close()?;
        }
        Ok(())
    }

    /// Consumes the harness and returns the core and memory.
    pub fn into_parts(self) -> (C, Memory) {
        (self.core, self.memory)
    }
}

impl<C: Core> fmt::Debug for Harness<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Harness")
            .field("state", &self.state)
            .field("clock", &self.clock)
            .field("inputs", &self.inputs)
            .field("budget_ps", &self.budget_ps)
            .field("recording", &self.recorder.is_some())
            .finish_non_exhaustive()
    }
}
