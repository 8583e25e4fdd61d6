//! ELF32 header structures.

use crate::constants::*;

/// Read little-endian u16 from bytes.
#[inline]
fn read_le16(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

/// Read little-endian u32 from bytes.
#[inline]
fn read_le32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

/// The 16 identification bytes at the start of every ELF file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElfIdent {
    pub bytes: [u8; EI_NIDENT],
}

impl ElfIdent {
    pub const fn magic0(&self) -> u8 {
        self.bytes[EI_MAG0]
    }

    /// Bytes 1..4, expected to spell "ELF".
    pub fn magic_str(&self) -> &[u8] {
        &self.bytes[EI_MAG1..EI_MAG1 + ELFMAG_STR.len()]
    }

    pub const fn class(&self) -> u8 {
        self.bytes[EI_CLASS]
    }

    pub const fn data(&self) -> u8 {
        self.bytes[EI_DATA]
    }

    pub const fn version(&self) -> u8 {
        self.bytes[EI_VERSION]
    }
}

/// ELF32 file header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElfHeader {
    pub ident: ElfIdent,
    pub e_type: u16,
    pub machine: u16,
    pub version: u32,
    pub entry: u32,
    pub phoff: u32,
    pub shoff: u32,
    pub flags: u32,
    pub ehsize: u16,
    pub phentsize: u16,
    pub phnum: u16,
    pub shentsize: u16,
    pub shnum: u16,
    pub shstrndx: u16,
}

impl ElfHeader {
    /// Decode a header from exactly [`ELF32_EHDR_SIZE`] little-endian bytes.
    #[must_use]
    pub fn from_bytes(data: &[u8; ELF32_EHDR_SIZE]) -> Self {
        let mut ident = [0u8; EI_NIDENT];
        ident.copy_from_slice(&data[..EI_NIDENT]);

        Self {
            ident: ElfIdent { bytes: ident },
            e_type: read_le16(data, 16),
            machine: read_le16(data, 18),
            version: read_le32(data, 20),
            entry: read_le32(data, 24),
            phoff: read_le32(data, 28),
            shoff: read_le32(data, 32),
            flags: read_le32(data, 36),
            ehsize: read_le16(data, 40),
            phentsize: read_le16(data, 42),
            phnum: read_le16(data, 44),
            shentsize: read_le16(data, 46),
            shnum: read_le16(data, 48),
            shstrndx: read_le16(data, 50),
        }
    }

    /// File offset of program header entry `index`.
    #[must_use]
    pub fn program_header_offset(&self, index: u16) -> u64 {
        u64::from(self.phoff) + u64::from(index) * u64::from(self.phentsize)
    }
}

/// ELF32 program header entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgramHeader {
    pub p_type: u32,
    pub offset: u32,
    pub vaddr: u32,
    pub paddr: u32,
    pub filesz: u32,
    pub memsz: u32,
    pub flags: u32,
    pub align: u32,
}

impl ProgramHeader {
    /// Decode an entry from exactly [`ELF32_PHDR_SIZE`] little-endian bytes.
    #[must_use]
    pub fn from_bytes(data: &[u8; ELF32_PHDR_SIZE]) -> Self {
        Self {
            p_type: read_le32(data, 0),
            offset: read_le32(data, 4),
            vaddr: read_le32(data, 8),
            paddr: read_le32(data, 12),
            filesz: read_le32(data, 16),
            memsz: read_le32(data, 20),
            flags: read_le32(data, 24),
            align: read_le32(data, 28),
        }
    }

    /// Whether the segment has bytes stored in the file.
    #[must_use]
    pub const fn has_file_data(&self) -> bool {
        self.filesz != 0
    }
}
