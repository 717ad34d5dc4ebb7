use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::Write as _;
use std::path::Path;

use mos6502_rs::disasm::fmt_operand;
use mos6502_rs::opcodes::{Entry, TABLE};

mod model;
use model::{load_raw_bin, read_u8, Image};

#[derive(Parser, Debug)]
#[command(author, version, about = "6502 disassembler CLI", long_about = None)]
struct Cli {
    /// Load address for the binary in target address space
    #[arg(long, default_value_t = 0u16)]
    base: u16,
    /// Skip N bytes at start of file before loading
    #[arg(long, default_value_t = 0usize)]
    skip: usize,
    /// Input binary path
    #[arg(value_name = "BINFILE")]
    input: String,
    /// Limit bytes loaded (default: to EOF after --skip)
    #[arg(long)]
    len: Option<usize>,
    /// Subcommand
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List loaded segments (simple single-segment for raw .bin)
    Sections,
    /// Disassemble a range [start, end) in bytes
    Range {
        /// Start address (hex or dec)
        start: String,
        /// End address (hex or dec, exclusive)
        end: String,
        /// Show instruction bytes
        #[arg(long)]
        show_bytes: bool,
        /// Output format: text or json
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Write output to file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, serde::Serialize)]
struct LineOut {
    addr: u16,
    bytes: Vec<u8>,
    text: String,
}

fn parse_u16(s: &str) -> Result<u16> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Ok(u16::from_str_radix(hex, 16)?)
    } else if let Some(hex) = s.strip_prefix('$') {
        Ok(u16::from_str_radix(hex, 16)?)
    } else {
        Ok(s.parse::<u16>()?)
    }
}

/// Decode one instruction at `pc`. Invalid opcodes and truncated operands
/// fall back to a single `.byte` line so the sweep always advances.
fn decode_line(img: &Image, pc: u16) -> Option<LineOut> {
    let opcode = read_u8(img, pc)?;
    let byte_line = |bytes: Vec<u8>| LineOut {
        addr: pc,
        text: format!(".byte ${opcode:02X}"),
        bytes,
    };
    match TABLE[opcode as usize] {
        Entry::Invalid => Some(byte_line(vec![opcode])),
        Entry::Op { mnemonic, mode, .. } => {
            let len = mode.len();
            let mut bytes = vec![opcode];
            let mut raw = [0u8; 2];
            for i in 1..len {
                match read_u8(img, pc.wrapping_add(u16::from(i))) {
                    Some(b) => {
                        raw[usize::from(i) - 1] = b;
                        bytes.push(b);
                    }
                    // Operand runs past the segment
                    None => return Some(byte_line(vec![opcode])),
                }
            }
            let operand = fmt_operand(mode, raw, pc);
            let text = if operand.is_empty() {
                mnemonic.as_str().to_string()
            } else {
                format!("{} {}", mnemonic.as_str(), operand)
            };
            Some(LineOut { addr: pc, bytes, text })
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let img = load_raw_bin(Path::new(&cli.input), cli.base, cli.skip, cli.len)?;

    match cli.cmd {
        Command::Sections => {
            println!(
                "{:<10} {:<8} {:<8} {:<6} {:<6}",
                "name", "start", "end", "perms", "kind"
            );
            for s in &img.segments {
                let start = u32::from(s.base);
                let end = start + s.bytes.len() as u32;
                println!(
                    "{:<10} {start:#06x}   {end:#06x}   {:<6} {:<6}",
                    s.name, s.perms, s.kind
                );
            }
        }
        Command::Range {
            start,
            end,
            show_bytes,
            format,
            out,
        } => {
            let start = parse_u16(&start)?;
            let end = parse_u16(&end)?;
            anyhow::ensure!(end >= start, "end must be >= start");

            let mut lines = Vec::new();
            let mut pc = start;
            while pc < end {
                let Some(line) = decode_line(&img, pc) else {
                    println!("{pc:#06x}: <oob>");
                    break;
                };
                pc = pc.wrapping_add(line.bytes.len() as u16);
                lines.push(line);
                if pc == 0 {
                    break;
                }
            }

            let buf = match format {
                OutputFormat::Json => serde_json::to_string_pretty(&lines)? + "\n",
                OutputFormat::Text => {
                    let mut buf = String::new();
                    for line in &lines {
                        let _ = write!(buf, "{:#06x}: ", line.addr);
                        if show_bytes {
                            for b in &line.bytes {
                                let _ = write!(buf, "{b:02x} ");
                            }
                            for _ in line.bytes.len()..3 {
                                let _ = write!(buf, "   ");
                            }
                        }
                        let _ = writeln!(buf, "{}", line.text);
                    }
                    buf
                }
            };
            if let Some(path) = out {
                std::fs::write(path, buf)?;
            } else {
                print!("{buf}");
            }
        }
    }
    Ok(())
}
