//! ELF32 reader for ARM executables.

mod constants;
mod file;
mod header;

pub use constants::*;
pub use file::*;
pub use header::*;

use thiserror::Error;

/// ELF reading errors.
#[derive(Error, Debug)]
pub enum ElfError {
    #[error("ELF {what} truncated: needed {needed} bytes at offset 0x{offset:x}")]
    Truncated {
        what: &'static str,
        offset: u64,
        needed: usize,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ElfError>;
