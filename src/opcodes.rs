use serde::{Deserialize, Serialize};

/// The 56 documented 6502 instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mnemonic {
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs, Clc,
    Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx, Iny, Jmp,
    Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp, Rol, Ror, Rti,
    Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay, Tsx, Txa, Txs, Tya,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddrMode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    Relative,
    IndirectX,
    IndirectY,
}

/// What the paired operation consumes from the resolver. `Value` entries
/// dereference memory modes to a literal; `Target` entries keep the
/// effective address so the operation can write back or jump to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Access {
    None,
    Value,
    Target,
}

impl Mnemonic {
    pub fn as_str(self) -> &'static str {
        match self {
            Mnemonic::Adc => "ADC",
            Mnemonic::And => "AND",
            Mnemonic::Asl => "ASL",
            Mnemonic::Bcc => "BCC",
            Mnemonic::Bcs => "BCS",
            Mnemonic::Beq => "BEQ",
            Mnemonic::Bit => "BIT",
            Mnemonic::Bmi => "BMI",
            Mnemonic::Bne => "BNE",
            Mnemonic::Bpl => "BPL",
            Mnemonic::Brk => "BRK",
            Mnemonic::Bvc => "BVC",
            Mnemonic::Bvs => "BVS",
            Mnemonic::Clc => "CLC",
            Mnemonic::Cld => "CLD",
            Mnemonic::Cli => "CLI",
            Mnemonic::Clv => "CLV",
            Mnemonic::Cmp => "CMP",
            Mnemonic::Cpx => "CPX",
            Mnemonic::Cpy => "CPY",
            Mnemonic::Dec => "DEC",
            Mnemonic::Dex => "DEX",
            Mnemonic::Dey => "DEY",
            Mnemonic::Eor => "EOR",
            Mnemonic::Inc => "INC",
            Mnemonic::Inx => "INX",
            Mnemonic::Iny => "INY",
            Mnemonic::Jmp => "JMP",
            Mnemonic::Jsr => "JSR",
            Mnemonic::Lda => "LDA",
            Mnemonic::Ldx => "LDX",
            Mnemonic::Ldy => "LDY",
            Mnemonic::Lsr => "LSR",
            Mnemonic::Nop => "NOP",
            Mnemonic::Ora => "ORA",
            Mnemonic::Pha => "PHA",
            Mnemonic::Php => "PHP",
            Mnemonic::Pla => "PLA",
            Mnemonic::Plp => "PLP",
            Mnemonic::Rol => "ROL",
            Mnemonic::Ror => "ROR",
            Mnemonic::Rti => "RTI",
            Mnemonic::Rts => "RTS",
            Mnemonic::Sbc => "SBC",
            Mnemonic::Sec => "SEC",
            Mnemonic::Sed => "SED",
            Mnemonic::Sei => "SEI",
            Mnemonic::Sta => "STA",
            Mnemonic::Stx => "STX",
            Mnemonic::Sty => "STY",
            Mnemonic::Tax => "TAX",
            Mnemonic::Tay => "TAY",
            Mnemonic::Tsx => "TSX",
            Mnemonic::Txa => "TXA",
            Mnemonic::Txs => "TXS",
            Mnemonic::Tya => "TYA",
        }
    }

    /// The resolver/operation pairing: fixed here, next to the table, so
    /// operations never have to guess what kind of operand they were given.
    pub fn access(self) -> Access {
        match self {
            Mnemonic::Adc
            | Mnemonic::And
            | Mnemonic::Bit
            | Mnemonic::Cmp
            | Mnemonic::Cpx
            | Mnemonic::Cpy
            | Mnemonic::Eor
            | Mnemonic::Lda
            | Mnemonic::Ldx
            | Mnemonic::Ldy
            | Mnemonic::Ora
            | Mnemonic::Sbc => Access::Value,
            Mnemonic::Asl
            | Mnemonic::Lsr
            | Mnemonic::Rol
            | Mnemonic::Ror
            | Mnemonic::Dec
            | Mnemonic::Inc
            | Mnemonic::Sta
            | Mnemonic::Stx
            | Mnemonic::Sty
            | Mnemonic::Jmp
            | Mnemonic::Jsr
            | Mnemonic::Bcc
            | Mnemonic::Bcs
            | Mnemonic::Beq
            | Mnemonic::Bmi
            | Mnemonic::Bne
            | Mnemonic::Bpl
            | Mnemonic::Bvc
            | Mnemonic::Bvs => Access::Target,
            Mnemonic::Brk
            | Mnemonic::Clc
            | Mnemonic::Cld
            | Mnemonic::Cli
            | Mnemonic::Clv
            | Mnemonic::Dex
            | Mnemonic::Dey
            | Mnemonic::Inx
            | Mnemonic::Iny
            | Mnemonic::Nop
            | Mnemonic::Pha
            | Mnemonic::Php
            | Mnemonic::Pla
            | Mnemonic::Plp
            | Mnemonic::Rti
            | Mnemonic::Rts
            | Mnemonic::Sec
            | Mnemonic::Sed
            | Mnemonic::Sei
            | Mnemonic::Tax
            | Mnemonic::Tay
            | Mnemonic::Tsx
            | Mnemonic::Txa
            | Mnemonic::Txs
            | Mnemonic::Tya => Access::None,
        }
    }
}

impl AddrMode {
    /// Instruction length in bytes, opcode included. Exact and
    /// operand-independent.
    pub fn len(self) -> u8 {
        match self {
            AddrMode::Implied | AddrMode::Accumulator => 1,
            AddrMode::Immediate
            | AddrMode::ZeroPage
            | AddrMode::ZeroPageX
            | AddrMode::ZeroPageY
            | AddrMode::Relative
            | AddrMode::IndirectX
            | AddrMode::IndirectY => 2,
            AddrMode::Absolute
            | AddrMode::AbsoluteX
            | AddrMode::AbsoluteY
            | AddrMode::Indirect => 3,
        }
    }
}

/// One slot of the 256-entry dispatch table. Undocumented opcodes carry an
/// explicit `Invalid` variant instead of a null handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Entry {
    Op {
        mnemonic: Mnemonic,
        mode: AddrMode,
        cycles: u8,
    },
    Invalid,
}

const fn op(mnemonic: Mnemonic, mode: AddrMode, cycles: u8) -> Entry {
    Entry::Op {
        mnemonic,
        mode,
        cycles,
    }
}

const XX: Entry = Entry::Invalid;

use AddrMode::*;
use Mnemonic::*;

// Documented opcode map, 16 per row. Base cycle counts only; page-cross
// penalties are not modeled.
// Full map: https://www.masswerk.at/6502/6502_instruction_set.html
pub static TABLE: [Entry; 256] = [
    // 0x00
    op(Brk, Implied, 7), op(Ora, IndirectX, 6), XX, XX,
    XX, op(Ora, ZeroPage, 3), op(Asl, ZeroPage, 5), XX,
    op(Php, Implied, 3), op(Ora, Immediate, 2), op(Asl, Accumulator, 2), XX,
    XX, op(Ora, Absolute, 4), op(Asl, Absolute, 6), XX,
    // 0x10
    op(Bpl, Relative, 2), op(Ora, IndirectY, 5), XX, XX,
    XX, op(Ora, ZeroPageX, 4), op(Asl, ZeroPageX, 6), XX,
    op(Clc, Implied, 2), op(Ora, AbsoluteY, 4), XX, XX,
    XX, op(Ora, AbsoluteX, 4), op(Asl, AbsoluteX, 7), XX,
    // 0x20
    op(Jsr, Absolute, 6), op(And, IndirectX, 6), XX, XX,
    op(Bit, ZeroPage, 3), op(And, ZeroPage, 3), op(Rol, ZeroPage, 5), XX,
    op(Plp, Implied, 4), op(And, Immediate, 2), op(Rol, Accumulator, 2), XX,
    op(Bit, Absolute, 4), op(And, Absolute, 4), op(Rol, Absolute, 6), XX,
    // 0x30
    op(Bmi, Relative, 2), op(And, IndirectY, 5), XX, XX,
    XX, op(And, ZeroPageX, 4), op(Rol, ZeroPageX, 6), XX,
    op(Sec, Implied, 2), op(And, AbsoluteY, 4), XX, XX,
    XX, op(And, AbsoluteX, 4), op(Rol, AbsoluteX, 7), XX,
    // 0x40
    op(Rti, Implied, 6), op(Eor, IndirectX, 6), XX, XX,
    XX, op(Eor, ZeroPage, 3), op(Lsr, ZeroPage, 5), XX,
    op(Pha, Implied, 3), op(Eor, Immediate, 2), op(Lsr, Accumulator, 2), XX,
    op(Jmp, Absolute, 3), op(Eor, Absolute, 4), op(Lsr, Absolute, 6), XX,
    // 0x50
    op(Bvc, Relative, 2), op(Eor, IndirectY, 5), XX, XX,
    XX, op(Eor, ZeroPageX, 4), op(Lsr, ZeroPageX, 6), XX,
    op(Cli, Implied, 2), op(Eor, AbsoluteY, 4), XX, XX,
    XX, op(Eor, AbsoluteX, 4), op(Lsr, AbsoluteX, 7), XX,
    // 0x60
    op(Rts, Implied, 6), op(Adc, IndirectX, 6), XX, XX,
    XX, op(Adc, ZeroPage, 3), op(Ror, ZeroPage, 5), XX,
    op(Pla, Implied, 4), op(Adc, Immediate, 2), op(Ror, Accumulator, 2), XX,
    op(Jmp, Indirect, 5), op(Adc, Absolute, 4), op(Ror, Absolute, 6), XX,
    // 0x70
    op(Bvs, Relative, 2), op(Adc, IndirectY, 5), XX, XX,
    XX, op(Adc, ZeroPageX, 4), op(Ror, ZeroPageX, 6), XX,
    op(Sei, Implied, 2), op(Adc, AbsoluteY, 4), XX, XX,
    XX, op(Adc, AbsoluteX, 4), op(Ror, AbsoluteX, 7), XX,
    // 0x80
    XX, op(Sta, IndirectX, 6), XX, XX,
    op(Sty, ZeroPage, 3), op(Sta, ZeroPage, 3), op(Stx, ZeroPage, 3), XX,
    op(Dey, Implied, 2), XX, op(Txa, Implied, 2), XX,
    op(Sty, Absolute, 4), op(Sta, Absolute, 4), op(Stx, Absolute, 4), XX,
    // 0x90
    op(Bcc, Relative, 2), op(Sta, IndirectY, 6), XX, XX,
    op(Sty, ZeroPageX, 4), op(Sta, ZeroPageX, 4), op(Stx, ZeroPageY, 4), XX,
    op(Tya, Implied, 2), op(Sta, AbsoluteY, 5), op(Txs, Implied, 2), XX,
    XX, op(Sta, AbsoluteX, 5), XX, XX,
    // 0xA0
    op(Ldy, Immediate, 2), op(Lda, IndirectX, 6), op(Ldx, Immediate, 2), XX,
    op(Ldy, ZeroPage, 3), op(Lda, ZeroPage, 3), op(Ldx, ZeroPage, 3), XX,
    op(Tay, Implied, 2), op(Lda, Immediate, 2), op(Tax, Implied, 2), XX,
    op(Ldy, Absolute, 4), op(Lda, Absolute, 4), op(Ldx, Absolute, 4), XX,
    // 0xB0
    op(Bcs, Relative, 2), op(Lda, IndirectY, 5), XX, XX,
    op(Ldy, ZeroPageX, 4), op(Lda, ZeroPageX, 4), op(Ldx, ZeroPageY, 4), XX,
    op(Clv, Implied, 2), op(Lda, AbsoluteY, 4), op(Tsx, Implied, 2), XX,
    op(Ldy, AbsoluteX, 4), op(Lda, AbsoluteX, 4), op(Ldx, AbsoluteY, 4), XX,
    // 0xC0
    op(Cpy, Immediate, 2), op(Cmp, IndirectX, 6), XX, XX,
    op(Cpy, ZeroPage, 3), op(Cmp, ZeroPage, 3), op(Dec, ZeroPage, 5), XX,
    op(Iny, Implied, 2), op(Cmp, Immediate, 2), op(Dex, Implied, 2), XX,
    op(Cpy, Absolute, 4), op(Cmp, Absolute, 4), op(Dec, Absolute, 6), XX,
    // 0xD0
    op(Bne, Relative, 2), op(Cmp, IndirectY, 5), XX, XX,
    XX, op(Cmp, ZeroPageX, 4), op(Dec, ZeroPageX, 6), XX,
    op(Cld, Implied, 2), op(Cmp, AbsoluteY, 4), XX, XX,
    XX, op(Cmp, AbsoluteX, 4), op(Dec, AbsoluteX, 7), XX,
    // 0xE0
    op(Cpx, Immediate, 2), op(Sbc, IndirectX, 6), XX, XX,
    op(Cpx, ZeroPage, 3), op(Sbc, ZeroPage, 3), op(Inc, ZeroPage, 5), XX,
    op(Inx, Implied, 2), op(Sbc, Immediate, 2), op(Nop, Implied, 2), XX,
    op(Cpx, Absolute, 4), op(Sbc, Absolute, 4), op(Inc, Absolute, 6), XX,
    // 0xF0
    op(Beq, Relative, 2), op(Sbc, IndirectY, 5), XX, XX,
    XX, op(Sbc, ZeroPageX, 4), op(Inc, ZeroPageX, 6), XX,
    op(Sed, Implied, 2), op(Sbc, AbsoluteY, 4), XX, XX,
    XX, op(Sbc, AbsoluteX, 4), op(Inc, AbsoluteX, 7), XX,
];
