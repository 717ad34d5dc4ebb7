use crate::addressing::Decoded;
use crate::opcodes::AddrMode;

/// Receives one (mnemonic, rendered operand) pair per resolved
/// instruction. Passed explicitly into the step loop; there is no global
/// output stream.
pub trait TraceSink {
    fn record(&mut self, mnemonic: &str, operand: &str);
}

/// Sink for runs that don't care about the instruction stream.
pub struct NullSink;

impl TraceSink for NullSink {
    fn record(&mut self, _mnemonic: &str, _operand: &str) {}
}

/// Collects rendered lines; handy for tests and batch disassembly.
#[derive(Debug, Default)]
pub struct VecSink {
    pub lines: Vec<String>,
}

impl TraceSink for VecSink {
    fn record(&mut self, mnemonic: &str, operand: &str) {
        if operand.is_empty() {
            self.lines.push(mnemonic.to_string());
        } else {
            self.lines.push(format!("{mnemonic} {operand}"));
        }
    }
}

/// Render an operand in standard 6502 assembler syntax. `pc` is the
/// address of the opcode byte; only relative mode needs it, to show the
/// resolved branch target.
pub fn fmt_operand(mode: AddrMode, raw: [u8; 2], pc: u16) -> String {
    let word = u16::from_le_bytes(raw);
    match mode {
        AddrMode::Implied => String::new(),
        AddrMode::Accumulator => "A".to_string(),
        AddrMode::Immediate => format!("#${:02X}", raw[0]),
        AddrMode::ZeroPage => format!("${:02X}", raw[0]),
        AddrMode::ZeroPageX => format!("${:02X},X", raw[0]),
        AddrMode::ZeroPageY => format!("${:02X},Y", raw[0]),
        AddrMode::Absolute => format!("${word:04X}"),
        AddrMode::AbsoluteX => format!("${word:04X},X"),
        AddrMode::AbsoluteY => format!("${word:04X},Y"),
        AddrMode::Indirect => format!("(${word:04X})"),
        AddrMode::IndirectX => format!("(${:02X},X)", raw[0]),
        AddrMode::IndirectY => format!("(${:02X}),Y", raw[0]),
        AddrMode::Relative => {
            let target = pc.wrapping_add(2).wrapping_add(raw[0] as i8 as u16);
            format!("${target:04X}")
        }
    }
}

pub fn fmt_decoded(d: &Decoded) -> String {
    let operand = fmt_operand(d.mode, d.raw, d.pc);
    if operand.is_empty() {
        d.mnemonic.as_str().to_string()
    } else {
        format!("{} {}", d.mnemonic.as_str(), operand)
    }
}
