//! # ccard CLI entry point
//!
//! Parses command-line arguments and dispatches to the card subcommands.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ccard_cli::cards::{
    run_create, run_delete, run_edit, run_list, run_search, run_show, CreateArgs, DeleteArgs,
    EditArgs, ListArgs, Output, SearchArgs, ShowArgs,
};
use ccard_cli::connect::ConnectArgs;
use ccard_cli::EXIT_FAILURE;

/// Credit card management from the terminal.
///
/// Talks to the card API at `--base-url`, forwarding `--token` as a bearer
/// credential.
#[derive(Parser, Debug)]
#[command(name = "ccard", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Print raw JSON responses.
    #[arg(long, global = true)]
    json: bool,

    /// Show full card numbers instead of masking them.
    #[arg(long, global = true)]
    full_numbers: bool,

    #[command(flatten)]
    connect: ConnectArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List cards, one page at a time.
    List(ListArgs),
    /// Find one card by account id and/or card number.
    Search(SearchArgs),
    /// Show one card.
    Show(ShowArgs),
    /// Change name, status or expiry of a card.
    Edit(EditArgs),
    /// Create a card.
    Create(CreateArgs),
    /// Delete a card.
    Delete(DeleteArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let client = match cli.connect.client() {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(EXIT_FAILURE);
        }
    };
    tracing::debug!(base_url = %client.base_url(), "card API client ready");

    let output = Output {
        json: cli.json,
        full_numbers: cli.full_numbers,
        today: None,
    };
    let mut stdout = std::io::stdout().lock();
    let result = match &cli.command {
        Commands::List(args) => run_list(args, &client, output, &mut stdout).await,
        Commands::Search(args) => run_search(args, &client, output, &mut stdout).await,
        Commands::Show(args) => run_show(args, &client, output, &mut stdout).await,
        Commands::Edit(args) => run_edit(args, &client, output, &mut stdout).await,
        Commands::Create(args) => run_create(args, &client, output, &mut stdout).await,
        Commands::Delete(args) => run_delete(args, &client, output, &mut stdout).await,
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            tracing::debug!("{e:?}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
