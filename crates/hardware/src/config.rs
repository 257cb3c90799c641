//! Configuration system for the harness.
//!
//! This module defines the configuration structure and enums used to parameterize
//! a run. It provides:
//! 1. **Defaults:** Baseline clock period, cycle budget, and memory map.
//! 2. **Structures:** `HarnessConfig` with per-field serde defaults.
//! 3. **Enums:** Clock discipline and bus acknowledge policy.
//!
//! Configuration is supplied as JSON (`HarnessConfig::from_json`) or built with
//! `HarnessConfig::default()`, which is what the CLI uses.

use std::path::PathBuf;

use serde::Deserialize;

use crate::common::error::ConfigError;

/// Default configuration values for the harness.
mod defaults {
    use std::path::PathBuf;

    use crate::common::constants;

    /// Clock period in picoseconds.
    pub const CLOCK_PERIOD_PS: u64 = constants::CLOCK_PERIOD_PS;

    /// Run length in clock periods.
    pub const MAX_CYCLES: u64 = constants::MAX_CYCLES;

    /// First reserved (non-memory) bus address.
    pub const RESERVED_BASE: Option<u16> = Some(constants::RESERVED_BASE);

    /// Waveform output path.
    pub fn trace_path() -> Option<PathBuf> {
        Some(PathBuf::from(constants::TRACE_FILE))
    }
}

/// How simulated time is divided between clock edges.
///
/// Both disciplines keep the clock high for the first half of every period and
/// low for the second half; they differ only in how many evaluation steps fall
/// inside each phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum ClockDiscipline {
    /// One step per half period; the clock toggles on every step.
    #[default]
    HalfPeriod,
    /// Several steps per period; the clock toggles only when time crosses a
    /// half-period boundary, letting the bus react between edges.
    SubCycle {
        /// Evaluation steps per full clock period. Must be even.
        steps_per_cycle: u32,
    },
}

impl ClockDiscipline {
    /// Returns the number of evaluation steps in one full clock period.
    pub const fn steps_per_cycle(self) -> u32 {
        match self {
            Self::HalfPeriod => 2,
            Self::SubCycle { steps_per_cycle } => steps_per_cycle,
        }
    }
}

/// When the bus responder asserts `ack` for an active request.
///
/// The policy is fixed for the whole run. It decides whether the core sees a
/// single-cycle or a double-cycle bus latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum AckPolicy {
    /// Acknowledge only while the clock is low, after the active edge was serviced.
    #[default]
    ClockLow,
    /// Acknowledge whenever byte-select is non-zero.
    Immediate,
}

/// Root harness configuration.
///
/// # Examples
///
/// ```
/// use primsim_core::config::{AckPolicy, ClockDiscipline, HarnessConfig};
///
/// let json = r#"{
///     "clock_period_ps": 20000,
///     "max_cycles": 100,
///     "discipline": { "SubCycle": { "steps_per_cycle": 8 } },
///     "ack_policy": "Immediate",
///     "reserved_base": null,
///     "trace_path": null
/// }"#;
///
/// let config = HarnessConfig::from_json(json).unwrap();
/// assert_eq!(config.max_cycles, 100);
/// assert_eq!(config.discipline, ClockDiscipline::SubCycle { steps_per_cycle: 8 });
/// assert_eq!(config.ack_policy, AckPolicy::Immediate);
/// assert_eq!(config.reserved_base, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HarnessConfig {
    /// Clock period in picoseconds. Must be even and non-zero.
    #[serde(default = "HarnessConfig::default_clock_period_ps")]
    pub clock_period_ps: u64,

    /// Run length in full clock periods, counted from time zero (reset included).
    #[serde(default = "HarnessConfig::default_max_cycles")]
    pub max_cycles: u64,

    /// Step granularity.
    #[serde(default)]
    pub discipline: ClockDiscipline,

    /// Acknowledge timing.
    #[serde(default)]
    pub ack_policy: AckPolicy,

    /// First address of the reserved device range. `None` maps all 64 KiB as memory.
    #[serde(default = "HarnessConfig::default_reserved_base")]
    pub reserved_base: Option<u16>,

    /// Waveform output file. `None` disables recording.
    #[serde(default = "defaults::trace_path")]
    pub trace_path: Option<PathBuf>,
}

impl HarnessConfig {
    fn default_clock_period_ps() -> u64 {
        defaults::CLOCK_PERIOD_PS
    }

    fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }

    fn default_reserved_base() -> Option<u16> {
        defaults::RESERVED_BASE
    }

    /// Parses and validates a JSON configuration document.
    ///
    /// Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Json` for malformed input and the matching
    /// validation error for out-of-range values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the clock and budget settings describe a runnable harness.
    ///
    /// # Errors
    ///
    /// * `ClockPeriod` if the period is zero or odd.
    /// * `ZeroBudget` if `max_cycles` is zero.
    /// * `SubCycleSteps` if the step count is odd, below 2, or does not divide the period.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let period = self.clock_period_ps;
        if period == 0 || period % 2 != 0 {
            return Err(ConfigError::ClockPeriod(period));
        }
        if self.max_cycles == 0 {
            return Err(ConfigError::ZeroBudget);
        }
        let steps = self.discipline.steps_per_cycle();
        if steps < 2 || steps % 2 != 0 || period % u64::from(steps) != 0 {
            return Err(ConfigError::SubCycleSteps {
                steps,
                period_ps: period,
            });
        }
        Ok(())
    }

    /// Returns the simulated time at which the run stops, in picoseconds.
    pub const fn budget_ps(&self) -> u64 {
        self.max_cycles.saturating_mul(self.clock_period_ps)
    }

    /// Returns the duration of one evaluation step, in picoseconds.
    pub fn step_ps(&self) -> u64 {
        self.clock_period_ps / u64::from(self.discipline.steps_per_cycle().max(1))
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            clock_period_ps: defaults::CLOCK_PERIOD_PS,
            max_cycles: defaults::MAX_CYCLES,
            discipline: ClockDiscipline::default(),
            ack_policy: AckPolicy::default(),
            reserved_base: defaults::RESERVED_BASE,
            trace_path: defaults::trace_path(),
        }
    }
}
