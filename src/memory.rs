use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::cpu::Trap;

/// Full 16-bit address space, 64 KiB.
pub const MEMORY_SIZE: usize = 0x1_0000;

/// The stack occupies page 1.
pub const STACK_BASE: u16 = 0x0100;

pub trait Bus {
    fn read_u8(&mut self, addr: u16) -> Result<u8>;
    /// Little-endian word; address arithmetic wraps at 0xFFFF.
    fn read_u16(&mut self, addr: u16) -> Result<u16>;
    fn write_u8(&mut self, addr: u16, val: u8) -> Result<()>;
}

#[derive(Clone, Serialize, Deserialize)]
pub struct FlatMemory {
    pub mem: Vec<u8>,
}

impl FlatMemory {
    pub fn new() -> Self {
        Self {
            mem: vec![0; MEMORY_SIZE],
        }
    }

    /// Copy a program image to address 0. The image must fit the address
    /// space; this is the only bounds check a 16-bit address type needs.
    pub fn load(&mut self, image: &[u8]) -> Result<(), Trap> {
        if image.len() > MEMORY_SIZE {
            return Err(Trap::OutOfBounds { len: image.len() });
        }
        self.mem[..image.len()].copy_from_slice(image);
        Ok(())
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for FlatMemory {
    fn read_u8(&mut self, addr: u16) -> Result<u8> {
        Ok(self.mem[addr as usize])
    }
    fn read_u16(&mut self, addr: u16) -> Result<u16> {
        let lo = self.mem[addr as usize];
        let hi = self.mem[addr.wrapping_add(1) as usize];
        Ok(u16::from_le_bytes([lo, hi]))
    }
    fn write_u8(&mut self, addr: u16, val: u8) -> Result<()> {
        self.mem[addr as usize] = val;
        Ok(())
    }
}
