//! bashlog-mgr CLI - Bash command logging workspace manager.

use bashlog::config::load_config;
use bashlog::storage::FileBackend;
use bashlog::{cli, logging};
use clap::{Parser, Subcommand};
use std::io;
use std::process::ExitCode;
use tracing::Level;

#[derive(Parser)]
#[command(name = "bashlog-mgr")]
#[command(version = bashlog::version(), about = "Bash command logging workspace manager", long_about = None)]
#[command(arg_required_else_help = true)]
#[command(after_help = "Workspaces are stored in ~/.bashlog-workspaces/ unless BASHLOG_WORKSPACES is set.")]
struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all workspaces, newest first.
    List,

    /// Create a new workspace.
    Create {
        /// Workspace name (letters, digits, hyphens, underscores).
        name: String,
    },

    /// Delete a workspace after confirmation.
    Delete {
        /// Workspace name.
        name: String,

        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },

    /// Show details and recent commands for a workspace.
    View {
        /// Workspace name.
        name: String,

        /// Print the details as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show statistics across all workspaces.
    Stats,

    /// Show command history for a workspace.
    History {
        /// Workspace name.
        name: String,

        /// Number of lines to show. Defaults to 20.
        lines: Option<usize>,
    },
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout and succeed; usage errors exit 1
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    logging::init(Level::WARN, cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("bashlog-mgr: error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> bashlog::Result<()> {
    let config = load_config()?;
    let store = FileBackend::new(config.storage.workspaces_path.clone());
    let mut out = io::stdout().lock();

    match command {
        Commands::List => cli::list::run(&store, &mut out),
        Commands::Create { name } => cli::create::run(&store, &name, &mut out),
        Commands::Delete { name, yes } => {
            cli::delete::run(&store, &name, yes, &mut io::stdin().lock(), &mut out)
        }
        Commands::View { name, json } => cli::view::run(&store, &name, json, &mut out),
        Commands::Stats => cli::stats::run(&store, &mut out),
        Commands::History { name, lines } => cli::history::run(
            &store,
            &name,
            lines.unwrap_or(config.history.default_lines),
            &mut out,
        ),
    }
}
