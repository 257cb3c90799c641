//! Harness statistics collection and reporting.
//!
//! This module tracks what happened during a run. It provides:
//! 1. **Time:** Evaluation steps, completed clock cycles, and simulated picoseconds.
//! 2. **Bus:** Idle steps, memory requests, committed writes, reserved accesses, acknowledges.
//! 3. **Host:** Wall-clock duration and simulation speed.

use std::time::Instant;

use crate::soc::BusStats;

/// Statistics for one harness run.
#[derive(Clone, Debug)]
pub struct HarnessStats {
    start_time: Instant,
    /// Evaluation steps taken, reset steps included.
    pub steps: u64,
    /// Full clock periods elapsed.
    pub cycles: u64,
    /// Simulated time in picoseconds.
    pub sim_time_ps: u64,
    /// Bus responder counters.
    pub bus: BusStats,
}

impl HarnessStats {
    /// Creates an empty record; the host timer starts now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            steps: 0,
            cycles: 0,
            sim_time_ps: 0,
            bus: BusStats::default(),
        }
    }

    /// Returns host seconds since the record was created.
    pub fn host_seconds(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    /// Prints the report to stdout.
    pub fn print(&self) {
        let seconds = self.host_seconds();
        let khz = if seconds > 0.0 {
            (self.cycles as f64 / seconds) / 1000.0
        } else {
            0.0
        };
        println!("\n==========================================================");
        println!("HARNESS STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {:.4} s", seconds);
        println!("sim_time                 {} ps", self.sim_time_ps);
        println!("sim_cycles               {}", self.cycles);
        println!("sim_steps                {}", self.steps);
        println!("sim_freq                 {:.2} kHz", khz);
        println!("----------------------------------------------------------");
        println!("BUS");
        println!("  bus.idle               {}", self.bus.idle);
        println!("  bus.memory_requests    {}", self.bus.memory_requests);
        println!("  bus.writes             {}", self.bus.writes);
        println!("  bus.reserved           {}", self.bus.reserved);
        println!("  bus.acks               {}", self.bus.acks);
        println!("==========================================================");
    }
}

impl Default for HarnessStats {
    fn default() -> Self {
        Self::new()
    }
}
