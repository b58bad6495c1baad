mod cli;
mod dataset;
mod download;
mod output;
mod stats;
mod table;

use std::process::ExitCode;

use clap::Parser;
use cli::{command, Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let summary = match &cli.command {
        Commands::Fetch {} => command::fetch().await,
        Commands::Process {} => command::process(),
    };

    match summary {
        Ok(summary) => {
            summary.report();
            if summary.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
