//! Command implementation.

use elhex::{ConvertOptions, EXIT_SUCCESS, convert};
use tracing::debug;

use crate::cli::Cli;
use crate::terminal;

/// Run the conversion described by `cli` and return the process exit code.
pub fn run_command(cli: &Cli) -> i32 {
    let options = ConvertOptions::new().with_line_ending(cli.line_ending.into());

    match convert(&cli.input, &cli.output, &options) {
        Ok(summary) => {
            debug!(?summary, "conversion summary");
            if !cli.silent {
                terminal::success(&format!(
                    "wrote {} records from {} segments ({} bytes)",
                    summary.records, summary.segments, summary.data_bytes
                ));
                terminal::path_output(&cli.output);
            }
            EXIT_SUCCESS
        }
        Err(e) => {
            terminal::error(&format!("ERROR: {e}"));
            e.exit_code()
        }
    }
}
