//! ATM CLI - a single-branch teller machine in your terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;
mod receipt;

use commands::{accounts, init, run as atm, GlobalArgs};

/// ATM - deposits, withdrawals and balances against a plain-text ledger
#[derive(Parser)]
#[command(name = "atm", version, about, long_about = None)]
struct Cli {
    /// Directory holding settings.json (defaults to ~/.atm)
    #[arg(long, global = true, env = "ATM_DIR")]
    atm_dir: Option<PathBuf>,

    /// Ledger file to use instead of the configured one
    #[arg(long, global = true)]
    accounts: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive ATM (default)
    Run,

    /// List the accounts in the ledger
    Accounts {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a sample ledger
    Init {
        /// Overwrite an existing ledger without asking
        #[arg(long)]
        force: bool,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let args = GlobalArgs {
        atm_dir: cli.atm_dir,
        accounts: cli.accounts,
    };

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => atm::run(&args),
        Commands::Accounts { json } => accounts::run(&args, json),
        Commands::Init { force } => init::run(&args, force),
    }
}
