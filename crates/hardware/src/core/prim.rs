//! Behavioral model of the prim stack core's bus master.
//!
//! This is a reference core for running the harness without generated RTL. It models:
//! 1. **Sequencing:** A two-state fetch/execute machine clocked on the rising edge.
//! 2. **Bus Requests:** Byte opcode fetches, byte/word immediate reads, byte/word stores.
//! 3. **Halting:** Fetching `SIMEND` (`0xFF`, the erased memory value) raises `finished`.
//!
//! Only the opcodes needed to exercise every bus lane are modelled. Anything else
//! is logged and retired as a `NOP`.

use tracing::{debug, warn};

use super::Core;
use super::pins::{ByteSelect, CoreInputs, CoreOutputs};
use crate::common::BusAddr;

/// Depth of the circular data stack.
pub const STACK_DEPTH: usize = 8;

/// Opcodes understood by the model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    /// No operation.
    Nop = 0x00,
    /// Push the byte following the opcode.
    Push8 = 0x02,
    /// Push the little-endian word following the opcode.
    Push = 0x03,
    /// Pop an address, pop a value, store its low byte.
    Store8 = 0x04,
    /// Pop an address, pop a value, store the word.
    Store = 0x05,
    /// End of simulation.
    SimEnd = 0xFF,
}

impl Opcode {
    /// Decodes an opcode byte; `None` for encodings the model does not implement.
    pub const fn decode(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(Self::Nop),
            0x02 => Some(Self::Push8),
            0x03 => Some(Self::Push),
            0x04 => Some(Self::Store8),
            0x05 => Some(Self::Store),
            0xFF => Some(Self::SimEnd),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Fetch,
    Execute(Opcode),
}

/// Behavioral prim core.
#[derive(Clone, Debug)]
pub struct PrimCore {
    inputs: CoreInputs,
    last_clock: bool,
    phase: Phase,
    pc: u16,
    stack: [u16; STACK_DEPTH],
    sp: usize,
    halted: bool,
    retired: u64,
    finalized: bool,
}

impl PrimCore {
    /// Creates a core in its power-on state (fetching from address 0).
    pub const fn new() -> Self {
        Self {
            inputs: CoreInputs {
                clock: false,
                reset: false,
                data_in: 0,
                ack: false,
            },
            last_clock: false,
            phase: Phase::Fetch,
            pc: 0,
            stack: [0; STACK_DEPTH],
            sp: 0,
            halted: false,
            retired: 0,
            finalized: false,
        }
    }

    /// Returns the program counter.
    pub const fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the top of the data stack.
    pub const fn top(&self) -> u16 {
        self.stack[self.sp]
    }

    /// Returns the number of instructions retired since the last reset.
    pub const fn retired(&self) -> u64 {
        self.retired
    }

    /// Returns `true` once `finalize` has run.
    pub const fn is_finalized(&self) -> bool {
        self.finalized
    }

    const fn second(&self) -> u16 {
        self.stack[(self.sp + STACK_DEPTH - 1) % STACK_DEPTH]
    }

    fn push(&mut self, value: u16) {
        self.sp = (self.sp + 1) % STACK_DEPTH;
        self.stack[self.sp] = value;
    }

    fn pop(&mut self) -> u16 {
        let value = self.stack[self.sp];
        self.sp = (self.sp + STACK_DEPTH - 1) % STACK_DEPTH;
        value
    }

    fn reset_state(&mut self) {
        self.phase = Phase::Fetch;
        self.pc = 0;
        self.stack = [0; STACK_DEPTH];
        self.sp = 0;
        self.halted = false;
        self.retired = 0;
    }

    fn retire(&mut self) {
        self.retired += 1;
        self.phase = Phase::Fetch;
    }

    fn rising_edge(&mut self) {
        if self.inputs.reset {
            self.reset_state();
            return;
        }
        if self.halted {
            return;
        }

        let ack = self.inputs.ack;
        let data = self.inputs.data_in;
        match self.phase {
            Phase::Fetch => {
                if !ack {
                    return;
                }
                let byte = (data & 0xFF) as u8;
                let op = Opcode::decode(byte).unwrap_or_else(|| {
                    warn!(pc = self.pc, opcode = byte, "unknown opcode, executing as NOP");
                    Opcode::Nop
                });
                self.pc = self.pc.wrapping_add(1);
                if op == Opcode::SimEnd {
                    debug!(pc = self.pc, "SIMEND fetched");
                    self.halted = true;
                }
                self.phase = Phase::Execute(op);
            }
            Phase::Execute(op) => match op {
                Opcode::Nop => self.retire(),
                Opcode::Push8 if ack => {
                    self.push(data & 0xFF);
                    self.pc = self.pc.wrapping_add(1);
                    self.retire();
                }
                Opcode::Push if ack => {
                    self.push(data);
                    self.pc = self.pc.wrapping_add(2);
                    self.retire();
                }
                Opcode::Store8 | Opcode::Store if ack => {
                    let _addr = self.pop();
                    let _value = self.pop();
                    self.retire();
                }
                _ => {}
            },
        }
    }
}

impl Default for PrimCore {
    fn default() -> Self {
        Self::new()
    }
}

impl Core for PrimCore {
    fn set_inputs(&mut self, inputs: CoreInputs) {
        self.inputs = inputs;
    }

    fn outputs(&self) -> CoreOutputs {
        let idle = CoreOutputs {
            finished: self.halted,
            ..CoreOutputs::default()
        };
        if self.halted {
            return idle;
        }
        let pc = BusAddr::new(self.pc);
        match self.phase {
            Phase::Fetch | Phase::Execute(Opcode::Push8) => CoreOutputs {
                byte_select: ByteSelect::LOW,
                address: pc,
                ..idle
            },
            Phase::Execute(Opcode::Push) => CoreOutputs {
                byte_select: ByteSelect::WORD,
                address: pc,
                ..idle
            },
            Phase::Execute(op @ (Opcode::Store8 | Opcode::Store)) => CoreOutputs {
                byte_select: if op == Opcode::Store8 {
                    ByteSelect::LOW
                } else {
                    ByteSelect::WORD
                },
                address: BusAddr::new(self.top()),
                write_enable: true,
                data_out: self.second(),
                finished: false,
            },
            Phase::Execute(Opcode::Nop | Opcode::SimEnd) => idle,
        }
    }

    fn eval(&mut self) {
        let rising = self.inputs.clock && !self.last_clock;
        self.last_clock = self.inputs.clock;
        if rising {
            self.rising_edge();
        }
    }

    fn finalize(&mut self) {
        self.finalized = true;
        debug!(pc = self.pc, retired = self.retired, "prim core finalized");
    }
}
