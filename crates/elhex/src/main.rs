//! elhex CLI - ARM ELF32 to Intel HEX converter

mod cli;
mod commands;
mod terminal;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use cli::Cli;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => std::process::exit(cli::handle_parse_error(&err)),
    };

    let default_level = if cli.verbose {
        "elhex=debug"
    } else if cli.silent {
        "elhex=error"
    } else {
        "elhex=warn"
    };
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = default_level.parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = commands::run_command(&cli);
    std::process::exit(exit_code);
}
