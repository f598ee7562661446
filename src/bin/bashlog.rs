//! bashlog CLI - start a logged interactive shell session.

use bashlog::config::load_config;
use bashlog::core::SessionOverrides;
use bashlog::{cli, logging};
use clap::Parser;
use std::io;
use std::process::ExitCode;
use tracing::Level;

#[derive(Parser)]
#[command(name = "bashlog")]
#[command(version = bashlog::version(), about = "Start an interactive shell with session logging", long_about = None)]
struct Cli {
    /// Timezone for logging (e.g. UTC, America/New_York).
    #[arg(long)]
    tz: Option<String>,

    /// Date for logging (YYYY-MM-DD).
    #[arg(long)]
    date: Option<String>,

    /// Time for logging (HH:MM:SS).
    #[arg(long)]
    time: Option<String>,

    /// Log debug output to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(Level::INFO, cli.verbose);

    let overrides = SessionOverrides {
        timezone: cli.tz,
        date: cli.date,
        time: cli.time,
    };

    let result = load_config()
        .and_then(|config| cli::session::run(&config, overrides, &mut io::stdout().lock()));

    match result {
        Ok(status) => exit_code(status.code()),
        Err(e) => {
            eprintln!("bashlog: error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Map the shell's exit code onto ours.
fn exit_code(code: Option<i32>) -> ExitCode {
    match code.map(u8::try_from) {
        Some(Ok(code)) => ExitCode::from(code),
        _ => ExitCode::FAILURE,
    }
}
