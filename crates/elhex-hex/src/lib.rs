//! Intel HEX record model and encoder.
//!
//! Records are built one at a time, serialized through a [`HexWriter`] and
//! dropped; nothing is buffered beyond the underlying sink.

mod encoder;
mod record;

pub use encoder::*;
pub use record::*;

use thiserror::Error;

/// HEX encoding errors.
#[derive(Error, Debug)]
pub enum HexError {
    #[error("record payload of {0} bytes exceeds 16")]
    PayloadTooLong(usize),
    #[error("segment data truncated: needed {needed} bytes at offset 0x{offset:x}")]
    Truncated { offset: u64, needed: usize },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HexError>;
