use serde::{Deserialize, Serialize};

use crate::cpu::{Cpu, Trap};
use crate::memory::Bus;
use crate::opcodes::{Access, AddrMode, Mnemonic};

/// Tagged operand handed from the resolver to the operation. A literal is
/// a value already fetched; an address is a location the operation may
/// read, write, or jump to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operand {
    Implied,
    Accumulator,
    Literal(u8),
    Address(u16),
}

/// Everything known about one fetched instruction. Rebuilt every step and
/// kept on the CPU for inspection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Decoded {
    pub pc: u16,
    pub mnemonic: Mnemonic,
    pub mode: AddrMode,
    pub operand: Operand,
    /// Operand bytes as fetched from the instruction stream; unused
    /// positions are zero.
    pub raw: [u8; 2],
    pub len: u8,
    pub cycles: u8,
}

fn read<B: Bus>(bus: &mut B, addr: u16) -> Result<u8, Trap> {
    bus.read_u8(addr)
        .map_err(|source| Trap::Bus { addr, source })
}

fn read_word<B: Bus>(bus: &mut B, addr: u16) -> Result<u16, Trap> {
    bus.read_u16(addr)
        .map_err(|source| Trap::Bus { addr, source })
}

/// Pointer fetch from the zero page: the high byte of a pointer whose low
/// byte sits at 0xFF comes from 0x00 of the same page, never 0x0100.
fn read_zp_ptr<B: Bus>(bus: &mut B, ptr: u8) -> Result<u16, Trap> {
    let lo = read(bus, u16::from(ptr))?;
    let hi = read(bus, u16::from(ptr.wrapping_add(1)))?;
    Ok(u16::from_le_bytes([lo, hi]))
}

fn finish<B: Bus>(bus: &mut B, addr: u16, access: Access) -> Result<Operand, Trap> {
    match access {
        Access::Value => Ok(Operand::Literal(read(bus, addr)?)),
        Access::Target | Access::None => Ok(Operand::Address(addr)),
    }
}

/// Resolve one addressing mode. Reads operand bytes starting at PC+1,
/// advances PC past the whole instruction, and returns the tagged operand
/// together with the raw operand bytes for rendering.
pub fn resolve<B: Bus>(
    cpu: &mut Cpu,
    bus: &mut B,
    mode: AddrMode,
    access: Access,
) -> Result<(Operand, [u8; 2]), Trap> {
    let pc = cpu.pc;
    let mut raw = [0u8; 2];
    let len = mode.len();
    if len >= 2 {
        raw[0] = read(bus, pc.wrapping_add(1))?;
    }
    if len >= 3 {
        raw[1] = read(bus, pc.wrapping_add(2))?;
    }
    cpu.pc = pc.wrapping_add(u16::from(len));

    let operand = match mode {
        AddrMode::Implied => Operand::Implied,
        AddrMode::Accumulator => Operand::Accumulator,
        AddrMode::Immediate => Operand::Literal(raw[0]),
        AddrMode::ZeroPage => finish(bus, u16::from(raw[0]), access)?,
        AddrMode::ZeroPageX => finish(bus, u16::from(raw[0].wrapping_add(cpu.x)), access)?,
        AddrMode::ZeroPageY => finish(bus, u16::from(raw[0].wrapping_add(cpu.y)), access)?,
        AddrMode::Absolute => finish(bus, u16::from_le_bytes(raw), access)?,
        AddrMode::AbsoluteX => {
            let addr = u16::from_le_bytes(raw).wrapping_add(u16::from(cpu.x));
            finish(bus, addr, access)?
        }
        AddrMode::AbsoluteY => {
            let addr = u16::from_le_bytes(raw).wrapping_add(u16::from(cpu.y));
            finish(bus, addr, access)?
        }
        AddrMode::Indirect => {
            // Used only by JMP: the operand word is a pointer to the target.
            let ptr = u16::from_le_bytes(raw);
            Operand::Address(read_word(bus, ptr)?)
        }
        AddrMode::Relative => {
            let offset = raw[0] as i8;
            Operand::Address(cpu.pc.wrapping_add(offset as u16))
        }
        AddrMode::IndirectX => {
            let ptr = raw[0].wrapping_add(cpu.x);
            let addr = read_zp_ptr(bus, ptr)?;
            finish(bus, addr, access)?
        }
        AddrMode::IndirectY => {
            let base = read_zp_ptr(bus, raw[0])?;
            let addr = base.wrapping_add(u16::from(cpu.y));
            finish(bus, addr, access)?
        }
    };
    Ok((operand, raw))
}
