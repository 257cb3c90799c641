//! Simulated time and clock generation.
//!
//! The clock is high for the first half of every period and low for the second,
//! starting high at time zero. Each call to [`Clock::advance`] moves time forward
//! by one step; the level changes only when a half-period boundary is crossed.

/// Direction of a clock transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    /// Low to high.
    Rising,
    /// High to low.
    Falling,
}

/// Picosecond time base and clock level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clock {
    period_ps: u64,
    step_ps: u64,
    now_ps: u64,
    level: bool,
}

impl Clock {
    /// Creates a clock at time zero, level high.
    ///
    /// `steps_per_cycle` must be even and divide `period_ps`; the harness
    /// configuration validates this before a clock is built.
    pub fn new(period_ps: u64, steps_per_cycle: u32) -> Self {
        Self {
            period_ps,
            step_ps: period_ps / u64::from(steps_per_cycle.max(1)),
            now_ps: 0,
            level: true,
        }
    }

    /// Returns the current simulated time in picoseconds.
    pub const fn now_ps(&self) -> u64 {
        self.now_ps
    }

    /// Returns the current clock level.
    pub const fn level(&self) -> bool {
        self.level
    }

    /// Returns the clock period in picoseconds.
    pub const fn period_ps(&self) -> u64 {
        self.period_ps
    }

    /// Returns the step length in picoseconds.
    pub const fn step_ps(&self) -> u64 {
        self.step_ps
    }

    /// Returns the number of evaluation steps in one clock period.
    pub const fn steps_per_cycle(&self) -> u64 {
        self.period_ps / self.step_ps
    }

    /// Returns the number of full clock periods elapsed.
    pub const fn cycles(&self) -> u64 {
        self.now_ps / self.period_ps
    }

    /// Returns the clock level at time `t_ps`.
    pub const fn level_at(&self, t_ps: u64) -> bool {
        (t_ps / (self.period_ps / 2)) % 2 == 0
    }

    /// Advances time by one step.
    ///
    /// # Returns
    ///
    /// The edge crossed during the step, if any.
    pub fn advance(&mut self) -> Option<Edge> {
        self.now_ps += self.step_ps;
        let level = self.level_at(self.now_ps);
        let edge = match (self.level, level) {
            (false, true) => Some(Edge::Rising),
            (true, false) => Some(Edge::Falling),
            _ => None,
        };
        self.level = level;
        edge
    }
}
