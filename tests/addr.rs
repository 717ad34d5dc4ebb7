use mos6502_rs::{Bus, Cpu, FlatMemory, NullSink};

fn setup(program: &[u8]) -> (Cpu, FlatMemory) {
    let mut mem = FlatMemory::new();
    mem.load(program).unwrap();
    let mut cpu = Cpu::new();
    cpu.reset(0, program.len() as u32);
    (cpu, mem)
}

#[test]
fn byte_consumption_is_exact_per_mode() {
    // One instruction per program; PC advance depends only on the mode
    let cases: &[(&[u8], u16)] = &[
        (&[0xEA], 1),             // NOP implied
        (&[0x0A], 1),             // ASL accumulator
        (&[0xA9, 0x00], 2),       // LDA immediate
        (&[0xA5, 0x10], 2),       // LDA zero page
        (&[0xB5, 0x10], 2),       // LDA zero page,X
        (&[0xB6, 0x10], 2),       // LDX zero page,Y
        (&[0xA1, 0x10], 2),       // LDA (zp,X)
        (&[0xB1, 0x10], 2),       // LDA (zp),Y
        (&[0xAD, 0x34, 0x12], 3), // LDA absolute
        (&[0xBD, 0x34, 0x12], 3), // LDA absolute,X
        (&[0xB9, 0x34, 0x12], 3), // LDA absolute,Y
    ];
    for (program, want_pc) in cases {
        let (mut cpu, mut mem) = setup(program);
        cpu.step(&mut mem, &mut NullSink).unwrap();
        assert_eq!(cpu.pc, *want_pc, "program {program:02X?}");
    }
}

#[test]
fn zero_page_x_wraps_within_page() {
    // LDX #$FF; LDA $80,X -> (0x80 + 0xFF) mod 256 = 0x7F
    let (mut cpu, mut mem) = setup(&[0xA2, 0xFF, 0xB5, 0x80]);
    mem.write_u8(0x7F, 0x5A).unwrap();

    cpu.step(&mut mem, &mut NullSink).unwrap();
    cpu.step(&mut mem, &mut NullSink).unwrap();
    assert_eq!(cpu.a, 0x5A);
}

#[test]
fn indirect_x_pointer_wraps_at_page_end() {
    // Code sits away from the zero page so the pointer bytes are free.
    // LDA ($FF,X) with X=0: low byte from 0x00FF, high byte from 0x0000.
    let mut image = vec![0u8; 0x210];
    image[0x00] = 0x12; // pointer high, read from 0x0000 and not 0x0100
    image[0xFF] = 0x34; // pointer low
    image[0x200] = 0xA1;
    image[0x201] = 0xFF;
    let mut mem = FlatMemory::new();
    mem.load(&image).unwrap();
    mem.write_u8(0x1234, 0x99).unwrap();
    mem.write_u8(0x0100, 0x77).unwrap(); // the wrong high byte's pointee stays unused

    let mut cpu = Cpu::new();
    cpu.reset(0x200, 0x210);
    cpu.step(&mut mem, &mut NullSink).unwrap();
    assert_eq!(cpu.a, 0x99);
}

#[test]
fn indirect_x_adds_x_before_the_lookup() {
    // LDA ($20,X) with X=4 -> pointer at 0x24
    let mut image = vec![0u8; 0x210];
    image[0x24] = 0x00;
    image[0x25] = 0x03; // -> 0x0300
    image[0x200] = 0xA2; // LDX #$04
    image[0x201] = 0x04;
    image[0x202] = 0xA1; // LDA ($20,X)
    image[0x203] = 0x20;
    let mut mem = FlatMemory::new();
    mem.load(&image).unwrap();
    mem.write_u8(0x0300, 0x42).unwrap();

    let mut cpu = Cpu::new();
    cpu.reset(0x200, 0x210);
    cpu.step(&mut mem, &mut NullSink).unwrap();
    cpu.step(&mut mem, &mut NullSink).unwrap();
    assert_eq!(cpu.a, 0x42);
}

#[test]
fn indirect_y_adds_y_after_the_lookup() {
    // LDY #$05; LDA ($20),Y with base 0x0200 -> 0x0205
    let mut image = vec![0u8; 0x300];
    image[0x20] = 0x00;
    image[0x21] = 0x02;
    image[0x280] = 0xA0; // LDY #$05
    image[0x281] = 0x05;
    image[0x282] = 0xB1; // LDA ($20),Y
    image[0x283] = 0x20;
    image[0x205] = 0x66;
    let mut mem = FlatMemory::new();
    mem.load(&image).unwrap();

    let mut cpu = Cpu::new();
    cpu.reset(0x280, 0x300);
    cpu.step(&mut mem, &mut NullSink).unwrap();
    cpu.step(&mut mem, &mut NullSink).unwrap();
    assert_eq!(cpu.a, 0x66);
}

#[test]
fn absolute_indexed_uses_sixteen_bit_addition() {
    // LDX #$10; LDA $02F8,X -> 0x0308, crossing a page boundary
    let (mut cpu, mut mem) = setup(&[0xA2, 0x10, 0xBD, 0xF8, 0x02]);
    mem.write_u8(0x0308, 0x24).unwrap();

    cpu.step(&mut mem, &mut NullSink).unwrap();
    cpu.step(&mut mem, &mut NullSink).unwrap();
    assert_eq!(cpu.a, 0x24);
}

#[test]
fn jmp_indirect_reads_target_word() {
    // JMP ($0010) with 0x0010 -> 0x0005
    let (mut cpu, mut mem) = setup(&[0x6C, 0x10, 0x00, 0x00, 0x00, 0xEA]);
    mem.write_u8(0x10, 0x05).unwrap();
    mem.write_u8(0x11, 0x00).unwrap();

    cpu.step(&mut mem, &mut NullSink).unwrap();
    assert_eq!(cpu.pc, 0x0005);
}
