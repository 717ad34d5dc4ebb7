use anyhow::Error;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::addressing::{self, Decoded};
use crate::disasm::{self, TraceSink};
use crate::exec;
use crate::memory::{Bus, STACK_BASE};
use crate::opcodes::{Entry, TABLE};

bitflags! {
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status: u8 {
const C = 1 << 0; // Carry
const Z = 1 << 1; // Zero
const I = 1 << 2; // Interrupt disable
const D = 1 << 3; // Decimal mode (not honored by the arithmetic core)
const B = 1 << 4; // Break
const U = 1 << 5; // Unused, always reads as 1
const V = 1 << 6; // Overflow
const N = 1 << 7; // Negative
}
}

#[derive(thiserror::Error, Debug)]
pub enum Trap {
    #[error("Invalid opcode {opcode:#04x} at {pc:#06x}")]
    InvalidOpcode { pc: u16, opcode: u8 },
    #[error("Program image of {len} bytes exceeds the 64 KiB address space")]
    OutOfBounds { len: usize },
    #[error("Bus error at {addr:#06x}: {source}")]
    Bus {
        addr: u16,
        #[source]
        source: Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum State {
    Running,
    Halted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cpu {
    pub pc: u16,       // Program counter
    pub a: u8,         // Accumulator
    pub x: u8,         // Index register X
    pub y: u8,         // Index register Y
    pub s: u8,         // Stack pointer into page 1
    pub p: Status,     // Processor status, NV-BDIZC
    pub state: State,
    pub cycles: u64,
    /// One past the last loaded program byte; fetching at or beyond it
    /// halts the loop.
    pub prog_end: u32,
    /// Context of the most recently executed instruction.
    pub ctx: Option<Decoded>,
}

impl Cpu {
    pub fn new() -> Self {
        Self {
            pc: 0,
            a: 0,
            x: 0,
            y: 0,
            s: 0,
            p: Status::U,
            state: State::Running,
            cycles: 0,
            prog_end: 0,
            ctx: None,
        }
    }

    pub fn reset(&mut self, pc: u16, prog_end: u32) {
        self.pc = pc;
        self.prog_end = prog_end;
        self.state = State::Running;
        self.cycles = 0;
        self.ctx = None;
    }

    pub fn is_halted(&self) -> bool {
        self.state == State::Halted
    }

    /// Status register as pushed or dumped; the unused bit always reads 1.
    pub fn status_byte(&self) -> u8 {
        (self.p | Status::U).bits()
    }

    /// Z from a zero result, N from bit 7. Shared by every instruction
    /// whose documented semantics update Z/N.
    pub(crate) fn set_zn(&mut self, result: u8) {
        self.p.set(Status::Z, result == 0);
        self.p.set(Status::N, result & 0x80 != 0);
    }

    pub(crate) fn push<B: Bus>(&mut self, bus: &mut B, val: u8) -> Result<(), Trap> {
        let addr = STACK_BASE | u16::from(self.s);
        bus.write_u8(addr, val)
            .map_err(|source| Trap::Bus { addr, source })?;
        self.s = self.s.wrapping_sub(1);
        Ok(())
    }

    pub(crate) fn pull<B: Bus>(&mut self, bus: &mut B) -> Result<u8, Trap> {
        self.s = self.s.wrapping_add(1);
        let addr = STACK_BASE | u16::from(self.s);
        bus.read_u8(addr)
            .map_err(|source| Trap::Bus { addr, source })
    }

    /// One fetch-decode-execute cycle. Returns after exactly one
    /// instruction so a caller can inspect state between steps. No fetch
    /// occurs once the loop has halted.
    pub fn step<B: Bus, T: TraceSink>(
        &mut self,
        bus: &mut B,
        trace: &mut T,
    ) -> Result<State, Trap> {
        if self.state == State::Halted {
            return Ok(State::Halted);
        }
        let pc = self.pc;
        if u32::from(pc) >= self.prog_end {
            tracing::debug!(pc, "program end reached, halting");
            self.state = State::Halted;
            return Ok(State::Halted);
        }

        let opcode = bus
            .read_u8(pc)
            .map_err(|source| Trap::Bus { addr: pc, source })?;
        let (mnemonic, mode, cycles) = match TABLE[opcode as usize] {
            Entry::Op {
                mnemonic,
                mode,
                cycles,
            } => (mnemonic, mode, cycles),
            Entry::Invalid => {
                self.state = State::Halted;
                return Err(Trap::InvalidOpcode { pc, opcode });
            }
        };

        let (operand, raw) = addressing::resolve(self, bus, mode, mnemonic.access())?;
        let decoded = Decoded {
            pc,
            mnemonic,
            mode,
            operand,
            raw,
            len: mode.len(),
            cycles,
        };
        let rendered = disasm::fmt_operand(mode, raw, pc);
        trace.record(mnemonic.as_str(), &rendered);
        tracing::trace!(pc, "{} {}", mnemonic.as_str(), rendered);

        exec::execute(self, bus, mnemonic, operand)?;
        self.cycles += u64::from(cycles);
        self.ctx = Some(decoded);
        Ok(self.state)
    }

    /// Step until the loop halts or an optional host-supplied step budget
    /// runs out. The core itself imposes no bound.
    pub fn run<B: Bus, T: TraceSink>(
        &mut self,
        bus: &mut B,
        trace: &mut T,
        max_steps: Option<u64>,
    ) -> Result<State, Trap> {
        let mut steps = 0u64;
        while self.state == State::Running {
            if let Some(cap) = max_steps {
                if steps >= cap {
                    break;
                }
            }
            self.step(bus, trace)?;
            steps += 1;
        }
        Ok(self.state)
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}
