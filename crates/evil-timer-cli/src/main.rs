use std::io;
use std::sync::Mutex;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use evil_timer_core::storage::data_dir;
use tracing_subscriber::EnvFilter;

mod commands;
mod ui;

#[derive(Parser)]
#[command(name = "evil-timer", version, about = "Evil Trainer Timer - a stopwatch with opinions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive stopwatch
    Run(commands::run::RunArgs),
    /// Render a duration the way the stopwatch face shows it
    Format(commands::format::FormatArgs),
    /// Run the stopwatch headlessly and print what happened
    Simulate(commands::simulate::SimulateArgs),
    /// List available modes
    Modes {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

/// Logs go to stderr, except while the TUI owns the terminal.
fn init_tracing(interactive: bool) {
    let filter =
        EnvFilter::try_from_env("EVIL_TIMER_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    if !interactive {
        builder.with_writer(io::stderr).init();
        return;
    }

    let log_file = data_dir()
        .ok()
        .and_then(|dir| std::fs::File::create(dir.join("evil-timer.log")).ok());
    match log_file {
        Some(file) => builder.with_ansi(false).with_writer(Mutex::new(file)).init(),
        None => builder.with_writer(io::sink).init(),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(matches!(cli.command, Commands::Run(_)));

    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Format(args) => commands::format::run(args),
        Commands::Simulate(args) => commands::simulate::run(args),
        Commands::Modes { json } => commands::modes::run(json),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "evil-timer", &mut io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
