//! ELF to HEX conversion pipeline.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, Write};
use std::path::Path;

use elhex_elf::{
    ElfError, ElfHeader, is_valid_arm32_executable, read_file_header, read_program_header,
    segment_type_name,
};
use elhex_hex::{HexRecord, HexWriter, LineEnding, encode_segment};
use tracing::{debug, info, info_span};

use crate::{Error, Result};

/// Options for a conversion.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConvertOptions {
    /// Terminator written after every record.
    pub line_ending: LineEnding,
}

impl ConvertOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }
}

/// What a conversion wrote.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConvertSummary {
    /// Segments that produced records.
    pub segments: usize,
    /// Segments with no file data.
    pub skipped: usize,
    /// Total records written, including start address and EOF.
    pub records: usize,
    /// Segment bytes carried in data records.
    pub data_bytes: u64,
    /// Entry point written in the start linear address record.
    pub entry_point: u32,
}

/// Convert the ELF file at `input` into an Intel HEX file at `output`.
///
/// The output file is only created once the input header has been validated.
///
/// # Errors
///
/// - [`Error::CannotOpenInput`] if `input` cannot be opened.
/// - [`Error::InvalidFormat`] if the header is short or fails validation.
/// - [`Error::CannotOpenOutput`] if `output` cannot be created.
/// - [`Error::Elf`], [`Error::Hex`] or [`Error::Io`] on later read/write failures.
pub fn convert(input: &Path, output: &Path, options: &ConvertOptions) -> Result<ConvertSummary> {
    let _span = info_span!("convert", input = %input.display()).entered();

    let file = File::open(input).map_err(|source| Error::CannotOpenInput {
        path: input.to_path_buf(),
        source,
    })?;
    let mut source = BufReader::new(file);

    let header = match read_file_header(&mut source) {
        Ok(header) => header,
        Err(ElfError::Truncated { .. }) => return Err(Error::InvalidFormat),
        Err(e) => return Err(e.into()),
    };
    if !is_valid_arm32_executable(&header) {
        return Err(Error::InvalidFormat);
    }
    debug!(
        entry = format_args!("0x{:08x}", header.entry),
        phnum = header.phnum,
        "header validated"
    );

    let sink = File::create(output).map_err(|source| Error::CannotOpenOutput {
        path: output.to_path_buf(),
        source,
    })?;

    let summary = write_image(&header, &mut source, BufWriter::new(sink), options)?;
    info!(
        output = %output.display(),
        segments = summary.segments,
        records = summary.records,
        bytes = summary.data_bytes,
        "done"
    );
    Ok(summary)
}

/// Write every program segment of an already validated `header`, then the
/// start address and EOF records.
///
/// Program headers are visited in ascending index order.
///
/// # Errors
///
/// Returns an error if a program header or segment cannot be read in full, or
/// if writing to `sink` fails.
pub fn write_image<S, W>(
    header: &ElfHeader,
    source: &mut S,
    sink: W,
    options: &ConvertOptions,
) -> Result<ConvertSummary>
where
    S: Read + Seek,
    W: Write,
{
    let mut writer = HexWriter::new(sink, options.line_ending);
    let mut summary = ConvertSummary {
        entry_point: header.entry,
        ..ConvertSummary::default()
    };

    for index in 0..header.phnum {
        let segment = read_program_header(source, header, index)?;
        debug!(
            index,
            kind = segment_type_name(segment.p_type),
            paddr = format_args!("0x{:08x}", segment.paddr),
            filesz = segment.filesz,
            "segment"
        );

        if encode_segment(&segment, source, &mut writer)? == 0 {
            summary.skipped += 1;
        } else {
            summary.segments += 1;
            summary.data_bytes += u64::from(segment.filesz);
        }
    }

    writer.write_record(&HexRecord::start_linear_address(header.entry))?;
    writer.write_record(&HexRecord::end_of_file())?;
    writer.flush()?;

    summary.records = writer.records();
    Ok(summary)
}
