//! CLI definitions and argument types.

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use elhex::{EXIT_INVALID_ARGS, EXIT_SUCCESS, LineEnding};

use crate::terminal;

/// Usage paragraph printed after argument errors.
pub const USAGE: &str = "\
Usage: elhex <input ELF file> <output HEX file>
   input ELF file: executable ARM32 ELF file
   output HEX file: intel HEX file";

#[derive(Parser)]
#[command(name = "elhex")]
#[command(about = "Convert an ARM32 ELF executable to an Intel HEX image")]
#[command(version)]
pub struct Cli {
    /// Input ELF file (little-endian ARM32 executable)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output Intel HEX file (created or truncated)
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Line terminator written after each record
    #[arg(long, value_enum, default_value = "lf")]
    pub line_ending: LineEndingArg,

    /// Enable verbose output (per-segment debug logging)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress output (only show errors)
    #[arg(short, long, conflicts_with = "verbose")]
    pub silent: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LineEndingArg {
    /// Unix line endings (\n)
    Lf,
    /// DOS line endings (\r\n)
    Crlf,
}

impl From<LineEndingArg> for LineEnding {
    fn from(arg: LineEndingArg) -> Self {
        match arg {
            LineEndingArg::Lf => Self::Lf,
            LineEndingArg::Crlf => Self::Crlf,
        }
    }
}

/// Report a parse failure and pick the exit code.
///
/// `--help` and `--version` exit successfully; everything else is an argument
/// error.
pub fn handle_parse_error(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            EXIT_SUCCESS
        }
        _ => {
            terminal::error("ERROR: invalid arguments");
            let _ = err.print();
            eprintln!("{USAGE}");
            EXIT_INVALID_ARGS
        }
    }
}
