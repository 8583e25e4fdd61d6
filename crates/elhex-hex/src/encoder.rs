//! Serializing records and program segments to Intel HEX text.

use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};

use elhex_elf::ProgramHeader;
use tracing::{debug, warn};

use crate::record::{HexRecord, MAX_RECORD_LENGTH};
use crate::{HexError, Result};

/// Record terminator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineEnding {
    #[default]
    Lf,
    Crlf,
}

impl LineEnding {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::Crlf => "\r\n",
        }
    }
}

/// Append-only record sink.
pub struct HexWriter<W: Write> {
    inner: W,
    line_ending: LineEnding,
    records: usize,
}

impl<W: Write> HexWriter<W> {
    pub const fn new(inner: W, line_ending: LineEnding) -> Self {
        Self {
            inner,
            line_ending,
            records: 0,
        }
    }

    /// Write one record followed by the line terminator.
    ///
    /// # Errors
    ///
    /// Propagates write failures from the underlying sink.
    pub fn write_record(&mut self, record: &HexRecord) -> Result<()> {
        write!(self.inner, "{record}{}", self.line_ending.as_str())?;
        self.records += 1;
        Ok(())
    }

    /// Number of records written so far.
    #[must_use]
    pub const fn records(&self) -> usize {
        self.records
    }

    /// Flush the underlying sink.
    ///
    /// # Errors
    ///
    /// Propagates flush failures from the underlying sink.
    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Emit the records for one program segment.
///
/// Segments without file data produce nothing. Otherwise an extended linear
/// address record is followed by data records of up to 16 bytes, read
/// sequentially from `segment.offset`. The 16-bit record offset wraps without
/// a new extended address record.
///
/// Returns the number of records written.
///
/// # Errors
///
/// Returns [`HexError::Truncated`] if the source ends before `filesz` bytes
/// were read, or [`HexError::Io`] on seek/read/write failure.
pub fn encode_segment<S, W>(
    segment: &ProgramHeader,
    source: &mut S,
    writer: &mut HexWriter<W>,
) -> Result<usize>
where
    S: Read + Seek,
    W: Write,
{
    if !segment.has_file_data() {
        return Ok(0);
    }

    let low = segment.paddr & 0xFFFF;
    if u64::from(low) + u64::from(segment.filesz) > 0x1_0000 {
        warn!(
            paddr = format_args!("0x{:08x}", segment.paddr),
            filesz = segment.filesz,
            "segment crosses a 64 KiB boundary; record offsets will wrap"
        );
    }

    let before = writer.records();
    writer.write_record(&HexRecord::extended_linear_address(segment.paddr))?;

    let mut file_offset = u64::from(segment.offset);
    source.seek(SeekFrom::Start(file_offset))?;

    // Truncation is lossless: `low` is masked to 16 bits above.
    let mut cursor = low as u16;
    let mut remaining = segment.filesz as usize;
    let mut chunk = [0u8; MAX_RECORD_LENGTH];

    while remaining > 0 {
        let len = remaining.min(MAX_RECORD_LENGTH);
        let buf = &mut chunk[..len];
        source.read_exact(buf).map_err(|e| {
            if e.kind() == ErrorKind::UnexpectedEof {
                HexError::Truncated {
                    offset: file_offset,
                    needed: len,
                }
            } else {
                HexError::Io(e)
            }
        })?;

        writer.write_record(&HexRecord::data(cursor, buf)?)?;

        cursor = cursor.wrapping_add(MAX_RECORD_LENGTH as u16);
        file_offset += len as u64;
        remaining -= len;
    }

    let written = writer.records() - before;
    debug!(
        paddr = format_args!("0x{:08x}", segment.paddr),
        filesz = segment.filesz,
        records = written,
        "encoded segment"
    );
    Ok(written)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use elhex_elf::PT_LOAD;

    use super::*;

    fn segment(offset: u32, paddr: u32, filesz: u32) -> ProgramHeader {
        ProgramHeader {
            p_type: PT_LOAD,
            offset,
            vaddr: paddr,
            paddr,
            filesz,
            memsz: filesz,
            flags: 0,
            align: 4,
        }
    }

    fn encode(segment: &ProgramHeader, file: Vec<u8>) -> (usize, Vec<String>) {
        let mut source = Cursor::new(file);
        let mut writer = HexWriter::new(Vec::new(), LineEnding::Lf);
        let count = encode_segment(segment, &mut source, &mut writer).unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();
        (count, text.lines().map(str::to_owned).collect())
    }

    #[test]
    fn test_empty_segment_emits_nothing() {
        let (count, lines) = encode(&segment(0, 0x2000_0000, 0), Vec::new());
        assert_eq!(count, 0);
        assert!(lines.is_empty());
    }

    #[test]
    fn test_33_byte_segment() {
        let file: Vec<u8> = (0..64).collect();
        let (count, lines) = encode(&segment(8, 0x0800_0000, 33), file);

        assert_eq!(count, 4);
        assert_eq!(lines[0], ":020000040800F2");
        assert!(lines[1].starts_with(":10000000"));
        assert!(lines[2].starts_with(":10001000"));
        assert!(lines[3].starts_with(":01002000"));
        // First data byte comes from file offset 8.
        assert_eq!(&lines[1][9..11], "08");
        assert_eq!(&lines[3][9..11], "28");
    }

    #[test]
    fn test_exact_multiple_has_no_tail() {
        let (count, lines) = encode(&segment(0, 0x0800_0100, 32), vec![0xAA; 32]);
        assert_eq!(count, 3);
        assert!(lines[1].starts_with(":10010000"));
        assert!(lines[2].starts_with(":10011000"));
    }

    #[test]
    fn test_offset_wraps_without_new_extended_record() {
        let (count, lines) = encode(&segment(0, 0x0800_FFF0, 32), vec![0x55; 32]);
        assert_eq!(count, 3);
        assert!(lines[0].starts_with(":02000004"));
        assert!(lines[1].starts_with(":10FFF000"));
        assert!(lines[2].starts_with(":10000000"));
    }

    #[test]
    fn test_truncated_segment_is_an_error() {
        let mut source = Cursor::new(vec![0u8; 20]);
        let mut writer = HexWriter::new(Vec::new(), LineEnding::Lf);
        let err = encode_segment(&segment(4, 0x0800_0000, 32), &mut source, &mut writer)
            .unwrap_err();
        assert!(matches!(
            err,
            HexError::Truncated {
                offset: 20,
                needed: 16
            }
        ));
    }

    #[test]
    fn test_crlf_line_ending() {
        let mut writer = HexWriter::new(Vec::new(), LineEnding::Crlf);
        writer.write_record(&HexRecord::end_of_file()).unwrap();
        assert_eq!(writer.records(), 1);
        assert_eq!(writer.into_inner(), b":00000001FF\r\n");
    }
}
