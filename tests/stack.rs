use mos6502_rs::cpu::Status;
use mos6502_rs::{Bus, Cpu, FlatMemory, NullSink};

fn setup(program: &[u8]) -> (Cpu, FlatMemory) {
    let mut mem = FlatMemory::new();
    mem.load(program).unwrap();
    let mut cpu = Cpu::new();
    cpu.reset(0, program.len() as u32);
    (cpu, mem)
}

#[test]
fn pha_pla_round_trips_accumulator() {
    // LDA #$5A; PHA; LDA #$00; PLA
    let (mut cpu, mut mem) = setup(&[0xA9, 0x5A, 0x48, 0xA9, 0x00, 0x68, 0x00]);
    cpu.run(&mut mem, &mut NullSink, None).unwrap();
    assert_eq!(cpu.a, 0x5A);
    assert!(!cpu.p.contains(Status::Z));
}

#[test]
fn pla_sets_zero_and_negative_flags() {
    // LDA #$80; PHA; LDA #$01; PLA -> N from the pulled value
    let (mut cpu, mut mem) = setup(&[0xA9, 0x80, 0x48, 0xA9, 0x01, 0x68, 0x00]);
    cpu.run(&mut mem, &mut NullSink, None).unwrap();
    assert_eq!(cpu.a, 0x80);
    assert!(cpu.p.contains(Status::N));
}

#[test]
fn php_forces_break_and_unused_bits() {
    // All flags clear; PHP still pushes B and U set
    let (mut cpu, mut mem) = setup(&[0x08, 0x00]);
    cpu.step(&mut mem, &mut NullSink).unwrap();
    let pushed = mem.read_u8(0x0100).unwrap(); // S started at 0x00
    assert_eq!(pushed & 0x30, 0x30);
    assert_eq!(pushed, 0x30);
    // The live status register is not changed by the push
    assert!(!cpu.p.contains(Status::B));
}

#[test]
fn php_plp_round_trips_flag_bits() {
    // SEC; SED; PHP; CLC; CLD; PLP -> C and D restored
    let (mut cpu, mut mem) = setup(&[0x38, 0xF8, 0x08, 0x18, 0xD8, 0x28, 0x00]);
    cpu.run(&mut mem, &mut NullSink, None).unwrap();
    assert!(cpu.p.contains(Status::C));
    assert!(cpu.p.contains(Status::D));
}

#[test]
fn stack_pointer_wraps_within_page_one() {
    // S starts at 0x00; two pushes land at 0x0100 then 0x01FF
    let (mut cpu, mut mem) = setup(&[0xA9, 0x11, 0x48, 0xA9, 0x22, 0x48, 0x00]);
    cpu.run(&mut mem, &mut NullSink, None).unwrap();
    assert_eq!(mem.read_u8(0x0100).unwrap(), 0x11);
    assert_eq!(mem.read_u8(0x01FF).unwrap(), 0x22);
    // Nothing leaks into the neighboring pages
    assert_eq!(mem.read_u8(0x00FF).unwrap(), 0x00);
    assert_eq!(mem.read_u8(0x0200).unwrap(), 0x00);
}

#[test]
fn txs_does_not_touch_flags() {
    // LDX #$00 sets Z; TXS must leave it alone and move S
    let (mut cpu, mut mem) = setup(&[0xA2, 0x00, 0x9A, 0x00]);
    cpu.step(&mut mem, &mut NullSink).unwrap();
    assert!(cpu.p.contains(Status::Z));
    cpu.step(&mut mem, &mut NullSink).unwrap();
    assert_eq!(cpu.s, 0x00);
    assert!(cpu.p.contains(Status::Z));

    // LDX #$80; TXS: N unchanged from the load, S written
    let (mut cpu, mut mem) = setup(&[0xA2, 0x80, 0x9A, 0x00]);
    cpu.run(&mut mem, &mut NullSink, None).unwrap();
    assert_eq!(cpu.s, 0x80);
}

#[test]
fn tsx_copies_stack_pointer_and_sets_flags() {
    // LDX #$FA; TXS; LDX #$00; TSX
    let (mut cpu, mut mem) = setup(&[0xA2, 0xFA, 0x9A, 0xA2, 0x00, 0xBA, 0x00]);
    cpu.run(&mut mem, &mut NullSink, None).unwrap();
    assert_eq!(cpu.x, 0xFA);
    assert!(cpu.p.contains(Status::N));
}

#[test]
fn brk_pushes_pc_and_flags_with_break_set() {
    // SEC; BRK
    let (mut cpu, mut mem) = setup(&[0x38, 0x00, 0x00]);
    cpu.run(&mut mem, &mut NullSink, None).unwrap();
    assert!(cpu.is_halted());
    assert!(cpu.p.contains(Status::I));
    // S started 0x00: PC high at 0x0100, PC low at 0x01FF, flags at 0x01FE
    assert_eq!(mem.read_u8(0x0100).unwrap(), 0x00);
    assert_eq!(mem.read_u8(0x01FF).unwrap(), 0x02);
    let flags = mem.read_u8(0x01FE).unwrap();
    assert_eq!(flags & 0x30, 0x30); // B and U forced
    assert_eq!(flags & 0x01, 0x01); // carry from SEC
}
