//! Reading and validating ELF32 headers from a seekable source.

use std::io::{ErrorKind, Read, Seek, SeekFrom};

use crate::constants::*;
use crate::header::*;
use crate::{ElfError, Result};

/// Fill `buf` from the current position, reporting a short read as truncation.
fn read_exact_at<S: Read>(source: &mut S, buf: &mut [u8], what: &'static str, offset: u64) -> Result<()> {
    source.read_exact(buf).map_err(|e| {
        if e.kind() == ErrorKind::UnexpectedEof {
            ElfError::Truncated {
                what,
                offset,
                needed: buf.len(),
            }
        } else {
            ElfError::Io(e)
        }
    })
}

/// Read the ELF32 file header from offset 0 of `source`.
///
/// # Errors
///
/// Returns [`ElfError::Truncated`] if the source holds fewer than
/// [`ELF32_EHDR_SIZE`] bytes, or [`ElfError::Io`] on any other read failure.
pub fn read_file_header<S: Read + Seek>(source: &mut S) -> Result<ElfHeader> {
    source.seek(SeekFrom::Start(0))?;

    let mut raw = [0u8; ELF32_EHDR_SIZE];
    read_exact_at(source, &mut raw, "file header", 0)?;
    Ok(ElfHeader::from_bytes(&raw))
}

/// Read program header entry `index` as located by `header`.
///
/// # Errors
///
/// Returns [`ElfError::Truncated`] if the entry extends past the end of the
/// source, or [`ElfError::Io`] on any other seek/read failure.
pub fn read_program_header<S: Read + Seek>(
    source: &mut S,
    header: &ElfHeader,
    index: u16,
) -> Result<ProgramHeader> {
    let offset = header.program_header_offset(index);
    source.seek(SeekFrom::Start(offset))?;

    let mut raw = [0u8; ELF32_PHDR_SIZE];
    read_exact_at(source, &mut raw, "program header", offset)?;
    Ok(ProgramHeader::from_bytes(&raw))
}

/// Check that `header` describes a little-endian 32-bit ARM executable with a
/// usable program header table.
#[must_use]
pub fn is_valid_arm32_executable(header: &ElfHeader) -> bool {
    let ident = &header.ident;

    ident.magic0() == ELFMAG0
        && ident.magic_str() == ELFMAG_STR
        && ident.class() == ELF_CLASS_32
        && ident.data() == ELF_DATA_LSB
        && u32::from(ident.version()) == EV_CURRENT
        && header.e_type == ET_EXEC
        && header.machine == EM_ARM
        && header.version == EV_CURRENT
        && header.phoff != 0
        && header.ehsize != 0
        && header.phentsize != 0
        && header.phnum != 0
}
