use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mos6502_rs::{Cpu, FlatMemory, NullSink, TraceSink};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Run a raw 6502 binary on the mos6502-rs simulator"
)]
struct Opts {
    /// Step budget guarding against non-terminating programs
    #[arg(long, default_value_t = 10_000_000)]
    max_steps: u64,
    /// Print one assembler-style line per executed instruction
    #[arg(long)]
    trace: bool,
    /// Dump the final CPU state as JSON instead of the text report
    #[arg(long)]
    dump_json: bool,
    #[arg(value_name = "BINFILE")]
    input: String,
}

struct StdoutSink;

impl TraceSink for StdoutSink {
    fn record(&mut self, mnemonic: &str, operand: &str) {
        if operand.is_empty() {
            println!("{mnemonic}");
        } else {
            println!("{mnemonic} {operand}");
        }
    }
}

fn dump_cpu(cpu: &Cpu, mem: &FlatMemory) {
    println!("\nStack bytes:");
    for (i, byte) in mem.mem[0x0100..=0x01FF].iter().enumerate() {
        if i % 8 == 0 {
            println!();
        }
        print!("{byte:02X} ");
    }
    println!("\n\nRegisters:");
    println!(" A:{:4} X:{:4} Y:{:4}", cpu.a, cpu.x, cpu.y);
    println!("PC:{:4} S:{:4}", cpu.pc, cpu.s);
    let p = cpu.status_byte();
    println!("Flags:  NVUBDIZC");
    print!("        ");
    for bit in (0..8).rev() {
        print!("{}", (p >> bit) & 1);
    }
    println!();
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opts = Opts::parse();
    let mut mem = FlatMemory::new();

    let bytes = std::fs::read(&opts.input)?;
    mem.load(&bytes)?;

    let mut cpu = Cpu::new();
    cpu.reset(0, bytes.len() as u32);

    let outcome = if opts.trace {
        cpu.run(&mut mem, &mut StdoutSink, Some(opts.max_steps))
    } else {
        cpu.run(&mut mem, &mut NullSink, Some(opts.max_steps))
    };
    if let Err(trap) = outcome {
        eprintln!("TRAP: {trap}");
    }

    if opts.dump_json {
        println!("{}", serde_json::to_string_pretty(&cpu)?);
    } else {
        dump_cpu(&cpu, &mem);
    }

    Ok(())
}
