//! ELF specification constants.

// Identification indices
pub const EI_NIDENT: usize = 16;
pub const EI_MAG0: usize = 0;
pub const EI_MAG1: usize = 1;
pub const EI_CLASS: usize = 4;
pub const EI_DATA: usize = 5;
pub const EI_VERSION: usize = 6;

// ELF header constants
pub const ELFMAG0: u8 = 0x7F;
pub const ELFMAG_STR: &[u8; 3] = b"ELF";
pub const ELF_CLASS_32: u8 = 1;
pub const ELF_DATA_LSB: u8 = 1;
pub const EV_CURRENT: u32 = 1;
pub const ET_EXEC: u16 = 2;
pub const EM_ARM: u16 = 0x28;

// On-disk sizes of the ELF32 structures
pub const ELF32_EHDR_SIZE: usize = 52;
pub const ELF32_PHDR_SIZE: usize = 32;

// Program header types
pub const PT_NULL: u32 = 0;
pub const PT_LOAD: u32 = 1;
pub const PT_DYNAMIC: u32 = 2;
pub const PT_INTERP: u32 = 3;
pub const PT_NOTE: u32 = 4;
pub const PT_SHLIB: u32 = 5;
pub const PT_PHDR: u32 = 6;
pub const PT_TLS: u32 = 7;
pub const PT_ARM_EXIDX: u32 = 0x7000_0001;

// Program header flags
pub const PF_X: u32 = 0x1; // Execute
pub const PF_W: u32 = 0x2; // Write
pub const PF_R: u32 = 0x4; // Read

/// Short name of a program header type, for diagnostics.
#[must_use]
pub const fn segment_type_name(p_type: u32) -> &'static str {
    match p_type {
        PT_NULL => "NULL",
        PT_LOAD => "LOAD",
        PT_DYNAMIC => "DYNAMIC",
        PT_INTERP => "INTERP",
        PT_NOTE => "NOTE",
        PT_SHLIB => "SHLIB",
        PT_PHDR => "PHDR",
        PT_TLS => "TLS",
        PT_ARM_EXIDX => "ARM_EXIDX",
        _ => "OTHER",
    }
}
