use anyhow::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Segment {
    pub name: String,
    pub base: u16,
    pub bytes: Vec<u8>,
    pub perms: &'static str, // e.g., "r-x"
    pub kind: &'static str,  // e.g., "raw"
}

#[derive(Debug, Clone)]
pub struct Image {
    pub segments: Vec<Segment>,
}

pub fn load_raw_bin(path: &Path, base: u16, skip: usize, len: Option<usize>) -> Result<Image> {
    let file = std::fs::read(path)?;
    anyhow::ensure!(skip <= file.len(), "--skip exceeds file size");
    let mut payload = &file[skip..];
    if let Some(lim) = len {
        anyhow::ensure!(lim <= payload.len(), "--len exceeds remaining file size after skip");
        payload = &payload[..lim];
    }
    anyhow::ensure!(
        usize::from(base) + payload.len() <= 0x1_0000,
        "image does not fit the 64 KiB address space at base {base:#06x}"
    );
    let seg = Segment {
        name: "segment0".into(),
        base,
        bytes: payload.to_vec(),
        perms: "r-x",
        kind: "raw",
    };
    Ok(Image {
        segments: vec![seg],
    })
}

pub fn read_u8(img: &Image, addr: u16) -> Option<u8> {
    for s in &img.segments {
        let start = u32::from(s.base);
        let end = start + s.bytes.len() as u32;
        let addr = u32::from(addr);
        if addr >= start && addr < end {
            let off = (addr - start) as usize;
            return Some(s.bytes[off]);
        }
    }
    None
}

pub fn read_u16(img: &Image, addr: u16) -> Option<u16> {
    let b0 = read_u8(img, addr)?;
    let b1 = read_u8(img, addr.wrapping_add(1))?;
    Some(u16::from_le_bytes([b0, b1]))
}

pub fn is_mapped(img: &Image, addr: u16) -> bool {
    img.segments.iter().any(|s| {
        let start = u32::from(s.base);
        let end = start + s.bytes.len() as u32;
        let addr = u32::from(addr);
        addr >= start && addr < end
    })
}
