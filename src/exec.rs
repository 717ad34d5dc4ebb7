use crate::addressing::Operand;
use crate::cpu::{Cpu, State, Status, Trap};
use crate::memory::Bus;
use crate::opcodes::Mnemonic;

fn value<B: Bus>(cpu: &Cpu, bus: &mut B, operand: Operand) -> Result<u8, Trap> {
    Ok(match operand {
        Operand::Literal(v) => v,
        Operand::Address(addr) => bus
            .read_u8(addr)
            .map_err(|source| Trap::Bus { addr, source })?,
        Operand::Accumulator => cpu.a,
        Operand::Implied => 0,
    })
}

fn write_back<B: Bus>(cpu: &mut Cpu, bus: &mut B, operand: Operand, val: u8) -> Result<(), Trap> {
    match operand {
        Operand::Address(addr) => bus
            .write_u8(addr, val)
            .map_err(|source| Trap::Bus { addr, source })?,
        Operand::Accumulator => cpu.a = val,
        Operand::Literal(_) | Operand::Implied => {}
    }
    Ok(())
}

fn branch(cpu: &mut Cpu, operand: Operand, flag: Status, want_set: bool) {
    // The resolver already computed the target; a not-taken branch keeps
    // the post-fetch PC.
    let taken = cpu.p.contains(flag) == want_set;
    if let (true, Operand::Address(target)) = (taken, operand) {
        cpu.pc = target;
    }
}

fn adc(cpu: &mut Cpu, val: u8) {
    let sum = u16::from(cpu.a) + u16::from(val) + u16::from(cpu.p.contains(Status::C));
    let result = (sum & 0xFF) as u8;
    cpu.p.set(Status::C, sum > 0xFF);
    cpu.p.set(Status::V, (!(cpu.a ^ val) & (cpu.a ^ result)) & 0x80 != 0);
    cpu.a = result;
    cpu.set_zn(result);
}

fn compare(cpu: &mut Cpu, reg: u8, val: u8) {
    cpu.p.set(Status::C, reg >= val);
    cpu.set_zn(reg.wrapping_sub(val));
}

/// Apply one instruction's semantics to registers, memory, and flags.
/// The opcode table guarantees the operand variant each mnemonic expects.
pub fn execute<B: Bus>(
    cpu: &mut Cpu,
    bus: &mut B,
    mnemonic: Mnemonic,
    operand: Operand,
) -> Result<(), Trap> {
    match mnemonic {
        // Loads and register transfers
        Mnemonic::Lda => {
            cpu.a = value(cpu, bus, operand)?;
            cpu.set_zn(cpu.a);
        }
        Mnemonic::Ldx => {
            cpu.x = value(cpu, bus, operand)?;
            cpu.set_zn(cpu.x);
        }
        Mnemonic::Ldy => {
            cpu.y = value(cpu, bus, operand)?;
            cpu.set_zn(cpu.y);
        }
        Mnemonic::Tax => {
            cpu.x = cpu.a;
            cpu.set_zn(cpu.x);
        }
        Mnemonic::Tay => {
            cpu.y = cpu.a;
            cpu.set_zn(cpu.y);
        }
        Mnemonic::Txa => {
            cpu.a = cpu.x;
            cpu.set_zn(cpu.a);
        }
        Mnemonic::Tya => {
            cpu.a = cpu.y;
            cpu.set_zn(cpu.a);
        }
        Mnemonic::Tsx => {
            cpu.x = cpu.s;
            cpu.set_zn(cpu.x);
        }
        // Stack-pointer write is the one transfer with no flag effect
        Mnemonic::Txs => cpu.s = cpu.x,

        // Stores
        Mnemonic::Sta => {
            let a = cpu.a;
            write_back(cpu, bus, operand, a)?;
        }
        Mnemonic::Stx => {
            let x = cpu.x;
            write_back(cpu, bus, operand, x)?;
        }
        Mnemonic::Sty => {
            let y = cpu.y;
            write_back(cpu, bus, operand, y)?;
        }

        // Arithmetic
        Mnemonic::Adc => {
            let v = value(cpu, bus, operand)?;
            adc(cpu, v);
        }
        Mnemonic::Sbc => {
            // ADC of the one's complement; carry doubles as "not borrow"
            let v = value(cpu, bus, operand)?;
            adc(cpu, !v);
        }

        // Compares
        Mnemonic::Cmp => {
            let (reg, v) = (cpu.a, value(cpu, bus, operand)?);
            compare(cpu, reg, v);
        }
        Mnemonic::Cpx => {
            let (reg, v) = (cpu.x, value(cpu, bus, operand)?);
            compare(cpu, reg, v);
        }
        Mnemonic::Cpy => {
            let (reg, v) = (cpu.y, value(cpu, bus, operand)?);
            compare(cpu, reg, v);
        }

        // Logical
        Mnemonic::And => {
            let v = value(cpu, bus, operand)?;
            cpu.a &= v;
            cpu.set_zn(cpu.a);
        }
        Mnemonic::Ora => {
            let v = value(cpu, bus, operand)?;
            cpu.a |= v;
            cpu.set_zn(cpu.a);
        }
        Mnemonic::Eor => {
            let v = value(cpu, bus, operand)?;
            cpu.a ^= v;
            cpu.set_zn(cpu.a);
        }
        Mnemonic::Bit => {
            // N and V come from the operand itself, Z from the masked test
            let v = value(cpu, bus, operand)?;
            let t = cpu.a & v;
            cpu.p.set(Status::Z, t == 0);
            cpu.p.set(Status::N, v & 0x80 != 0);
            cpu.p.set(Status::V, v & 0x40 != 0);
        }

        // Shifts and rotates, on the accumulator or memory
        Mnemonic::Asl => {
            let v = value(cpu, bus, operand)?;
            let result = v << 1;
            cpu.p.set(Status::C, v & 0x80 != 0);
            cpu.set_zn(result);
            write_back(cpu, bus, operand, result)?;
        }
        Mnemonic::Lsr => {
            let v = value(cpu, bus, operand)?;
            let result = v >> 1;
            cpu.p.set(Status::C, v & 0x01 != 0);
            cpu.set_zn(result);
            write_back(cpu, bus, operand, result)?;
        }
        Mnemonic::Rol => {
            let v = value(cpu, bus, operand)?;
            let result = (v << 1) | u8::from(cpu.p.contains(Status::C));
            cpu.p.set(Status::C, v & 0x80 != 0);
            cpu.set_zn(result);
            write_back(cpu, bus, operand, result)?;
        }
        Mnemonic::Ror => {
            let v = value(cpu, bus, operand)?;
            let result = (v >> 1) | (u8::from(cpu.p.contains(Status::C)) << 7);
            cpu.p.set(Status::C, v & 0x01 != 0);
            cpu.set_zn(result);
            write_back(cpu, bus, operand, result)?;
        }

        // Increment / decrement
        Mnemonic::Inc => {
            let result = value(cpu, bus, operand)?.wrapping_add(1);
            cpu.set_zn(result);
            write_back(cpu, bus, operand, result)?;
        }
        Mnemonic::Dec => {
            let result = value(cpu, bus, operand)?.wrapping_sub(1);
            cpu.set_zn(result);
            write_back(cpu, bus, operand, result)?;
        }
        Mnemonic::Inx => {
            cpu.x = cpu.x.wrapping_add(1);
            cpu.set_zn(cpu.x);
        }
        Mnemonic::Iny => {
            cpu.y = cpu.y.wrapping_add(1);
            cpu.set_zn(cpu.y);
        }
        Mnemonic::Dex => {
            cpu.x = cpu.x.wrapping_sub(1);
            cpu.set_zn(cpu.x);
        }
        Mnemonic::Dey => {
            cpu.y = cpu.y.wrapping_sub(1);
            cpu.set_zn(cpu.y);
        }

        // Conditional branches
        Mnemonic::Bpl => branch(cpu, operand, Status::N, false),
        Mnemonic::Bmi => branch(cpu, operand, Status::N, true),
        Mnemonic::Bvc => branch(cpu, operand, Status::V, false),
        Mnemonic::Bvs => branch(cpu, operand, Status::V, true),
        Mnemonic::Bcc => branch(cpu, operand, Status::C, false),
        Mnemonic::Bcs => branch(cpu, operand, Status::C, true),
        Mnemonic::Bne => branch(cpu, operand, Status::Z, false),
        Mnemonic::Beq => branch(cpu, operand, Status::Z, true),

        // Jumps and subroutines
        Mnemonic::Jmp => {
            if let Operand::Address(target) = operand {
                cpu.pc = target;
            }
        }
        Mnemonic::Jsr => {
            if let Operand::Address(target) = operand {
                let ret = cpu.pc.wrapping_sub(1);
                cpu.push(bus, (ret >> 8) as u8)?;
                cpu.push(bus, (ret & 0xFF) as u8)?;
                cpu.pc = target;
            }
        }
        Mnemonic::Rts => {
            let lo = cpu.pull(bus)?;
            let hi = cpu.pull(bus)?;
            cpu.pc = u16::from_le_bytes([lo, hi]).wrapping_add(1);
        }
        Mnemonic::Rti => {
            let flags = cpu.pull(bus)?;
            cpu.p = Status::from_bits_retain(flags) | Status::U;
            let lo = cpu.pull(bus)?;
            let hi = cpu.pull(bus)?;
            cpu.pc = u16::from_le_bytes([lo, hi]);
        }

        // Stack
        Mnemonic::Pha => cpu.push(bus, cpu.a)?,
        Mnemonic::Pla => {
            cpu.a = cpu.pull(bus)?;
            cpu.set_zn(cpu.a);
        }
        Mnemonic::Php => {
            // Break and unused bits read as 1 in the pushed byte
            let flags = cpu.status_byte() | Status::B.bits();
            cpu.push(bus, flags)?;
        }
        Mnemonic::Plp => {
            let flags = cpu.pull(bus)?;
            cpu.p = Status::from_bits_retain(flags) | Status::U;
        }

        // Flag set / clear
        Mnemonic::Clc => cpu.p.remove(Status::C),
        Mnemonic::Sec => cpu.p.insert(Status::C),
        Mnemonic::Cli => cpu.p.remove(Status::I),
        Mnemonic::Sei => cpu.p.insert(Status::I),
        Mnemonic::Clv => cpu.p.remove(Status::V),
        Mnemonic::Cld => cpu.p.remove(Status::D),
        Mnemonic::Sed => cpu.p.insert(Status::D),

        Mnemonic::Nop => {}

        // No interrupt vector is modeled: BRK saves state and halts the loop
        Mnemonic::Brk => {
            let pc = cpu.pc;
            cpu.push(bus, (pc >> 8) as u8)?;
            cpu.push(bus, (pc & 0xFF) as u8)?;
            let flags = cpu.status_byte() | Status::B.bits();
            cpu.push(bus, flags)?;
            cpu.p.insert(Status::I);
            cpu.state = State::Halted;
            tracing::debug!(pc, "BRK, halting");
        }
    }
    Ok(())
}
