//! elhex - ARM ELF32 to Intel HEX converter
//!
//! Reads the program segments of a little-endian ARM executable and writes
//! them as Intel HEX records, followed by the entry point and an EOF record.
//!
//! # Example
//!
//! ```ignore
//! use elhex::{ConvertOptions, convert};
//!
//! let summary = convert("firmware.elf".as_ref(), "firmware.hex".as_ref(), &ConvertOptions::new())?;
//! println!("{} records", summary.records);
//! ```

// Re-export from sub-crates
pub use elhex_elf::{
    ElfError, ElfHeader, ElfIdent, ProgramHeader, is_valid_arm32_executable, read_file_header,
    read_program_header,
};
pub use elhex_hex::{HexError, HexRecord, HexWriter, LineEnding, RecordType, encode_segment};

mod convert;
mod error;

pub use convert::*;
pub use error::*;
