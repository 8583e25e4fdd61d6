use std::path::PathBuf;

use thiserror::Error;

/// Exit code for success.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for a wrong number of command-line arguments.
pub const EXIT_INVALID_ARGS: i32 = -1;
/// Exit code when the input ELF file cannot be opened.
pub const EXIT_CANNOT_OPEN_INPUT: i32 = -2;
/// Exit code when the input is not a little-endian ARM32 executable.
pub const EXIT_INVALID_FORMAT: i32 = -3;
/// Exit code when the output HEX file cannot be created.
pub const EXIT_CANNOT_OPEN_OUTPUT: i32 = -4;
/// Exit code for read/write failures after both files were opened.
pub const EXIT_IO_ERROR: i32 = -5;

/// Conversion errors.
#[derive(Error, Debug)]
pub enum Error {
    #[error("couldn't open the ELF file {}: {source}", .path.display())]
    CannotOpenInput {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid ELF file, supported type is a little-endian executable ARM32 ELF file only")]
    InvalidFormat,
    #[error("couldn't open the HEX file {}: {source}", .path.display())]
    CannotOpenOutput {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("ELF error: {0}")]
    Elf(#[from] elhex_elf::ElfError),
    #[error("HEX error: {0}")]
    Hex(#[from] elhex_hex::HexError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Process exit status for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::CannotOpenInput { .. } => EXIT_CANNOT_OPEN_INPUT,
            Self::InvalidFormat => EXIT_INVALID_FORMAT,
            Self::CannotOpenOutput { .. } => EXIT_CANNOT_OPEN_OUTPUT,
            Self::Elf(_) | Self::Hex(_) | Self::Io(_) => EXIT_IO_ERROR,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
