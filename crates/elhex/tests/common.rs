//! Synthetic ARM32 ELF images for tests.

#![allow(dead_code)]

pub const EHDR_SIZE: u32 = 52;
pub const PHDR_SIZE: u32 = 32;

pub struct Segment {
    pub p_type: u32,
    pub paddr: u32,
    pub data: Vec<u8>,
    pub memsz: u32,
}

impl Segment {
    pub fn load(paddr: u32, data: Vec<u8>) -> Self {
        let memsz = data.len() as u32;
        Self {
            p_type: 1,
            paddr,
            data,
            memsz,
        }
    }

    pub fn bss(paddr: u32, memsz: u32) -> Self {
        Self {
            p_type: 1,
            paddr,
            data: Vec::new(),
            memsz,
        }
    }
}

/// Builds a minimal little-endian ARM executable: header, program header
/// table, then segment bytes in order.
pub struct ElfBuilder {
    pub entry: u32,
    pub segments: Vec<Segment>,
}

impl ElfBuilder {
    pub fn new(entry: u32) -> Self {
        Self {
            entry,
            segments: Vec::new(),
        }
    }

    pub fn segment(mut self, segment: Segment) -> Self {
        self.segments.push(segment);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let phnum = self.segments.len() as u16;
        let mut out = Vec::new();

        out.extend_from_slice(&[0x7F, b'E', b'L', b'F', 1, 1, 1, 0]);
        out.extend_from_slice(&[0u8; 8]);
        out.extend_from_slice(&2u16.to_le_bytes()); // ET_EXEC
        out.extend_from_slice(&0x28u16.to_le_bytes()); // EM_ARM
        out.extend_from_slice(&1u32.to_le_bytes());
        out.extend_from_slice(&self.entry.to_le_bytes());
        out.extend_from_slice(&EHDR_SIZE.to_le_bytes()); // phoff
        out.extend_from_slice(&0u32.to_le_bytes()); // shoff
        out.extend_from_slice(&0x0500_0200u32.to_le_bytes()); // flags
        out.extend_from_slice(&(EHDR_SIZE as u16).to_le_bytes());
        out.extend_from_slice(&(PHDR_SIZE as u16).to_le_bytes());
        out.extend_from_slice(&phnum.to_le_bytes());
        out.extend_from_slice(&40u16.to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes());
        assert_eq!(out.len(), EHDR_SIZE as usize);

        let mut data_offset = EHDR_SIZE + PHDR_SIZE * u32::from(phnum);
        for segment in &self.segments {
            let filesz = segment.data.len() as u32;
            let offset = if filesz == 0 { 0 } else { data_offset };
            for word in [
                segment.p_type,
                offset,
                segment.paddr,
                segment.paddr,
                filesz,
                segment.memsz,
                0x5, // PF_R | PF_X
                4,
            ] {
                out.extend_from_slice(&word.to_le_bytes());
            }
            data_offset += filesz;
        }

        for segment in &self.segments {
            out.extend_from_slice(&segment.data);
        }
        out
    }
}
