use mos6502_rs::cpu::Status;
use mos6502_rs::{Bus, Cpu, FlatMemory, NullSink};

fn run(program: &[u8]) -> Cpu {
    let mut mem = FlatMemory::new();
    mem.load(program).unwrap();
    let mut cpu = Cpu::new();
    cpu.reset(0, program.len() as u32);
    cpu.run(&mut mem, &mut NullSink, None).unwrap();
    cpu
}

#[test]
fn asl_accumulator_shifts_bit7_into_carry() {
    // LDA #$81; ASL A
    let cpu = run(&[0xA9, 0x81, 0x0A, 0x00]);
    assert_eq!(cpu.a, 0x02);
    assert!(cpu.p.contains(Status::C));
    assert!(!cpu.p.contains(Status::N));
}

#[test]
fn lsr_accumulator_shifts_bit0_into_carry() {
    // LDA #$01; LSR A
    let cpu = run(&[0xA9, 0x01, 0x4A, 0x00]);
    assert_eq!(cpu.a, 0x00);
    assert!(cpu.p.contains(Status::C));
    assert!(cpu.p.contains(Status::Z));
}

#[test]
fn rol_pulls_carry_into_bit0() {
    // SEC; LDA #$40; ROL A -> 0x81
    let cpu = run(&[0x38, 0xA9, 0x40, 0x2A, 0x00]);
    assert_eq!(cpu.a, 0x81);
    assert!(!cpu.p.contains(Status::C));
    assert!(cpu.p.contains(Status::N));
}

#[test]
fn ror_pulls_carry_into_bit7() {
    // SEC; LDA #$02; ROR A -> 0x81
    let cpu = run(&[0x38, 0xA9, 0x02, 0x6A, 0x00]);
    assert_eq!(cpu.a, 0x81);
    assert!(!cpu.p.contains(Status::C));
    assert!(cpu.p.contains(Status::N));
}

#[test]
fn ror_shifts_bit0_out() {
    // LDA #$01; ROR A -> 0x00, carry out
    let cpu = run(&[0xA9, 0x01, 0x6A, 0x00]);
    assert_eq!(cpu.a, 0x00);
    assert!(cpu.p.contains(Status::C));
    assert!(cpu.p.contains(Status::Z));
}

#[test]
fn asl_memory_writes_back() {
    // ASL $10 with 0x40 in place -> 0x80
    let mut mem = FlatMemory::new();
    mem.load(&[0x06, 0x10, 0x00]).unwrap();
    mem.write_u8(0x10, 0x40).unwrap();
    let mut cpu = Cpu::new();
    cpu.reset(0, 3);
    cpu.run(&mut mem, &mut NullSink, None).unwrap();

    assert_eq!(mem.read_u8(0x10).unwrap(), 0x80);
    assert!(cpu.p.contains(Status::N));
    assert!(!cpu.p.contains(Status::C));
    assert_eq!(cpu.a, 0); // accumulator untouched
}

#[test]
fn rol_memory_chains_carry() {
    // SEC; ROL $20 with 0x80 in place -> 0x01, carry back out
    let mut mem = FlatMemory::new();
    mem.load(&[0x38, 0x26, 0x20, 0x00]).unwrap();
    mem.write_u8(0x20, 0x80).unwrap();
    let mut cpu = Cpu::new();
    cpu.reset(0, 4);
    cpu.run(&mut mem, &mut NullSink, None).unwrap();

    assert_eq!(mem.read_u8(0x20).unwrap(), 0x01);
    assert!(cpu.p.contains(Status::C));
}
