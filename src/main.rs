use std::process::ExitCode;

use alerthub_rs::cli::{self, Cli};
use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let settings = cli::load_and_merge_config(cli)?;

    let log_handle = cli::init_logger_from_settings(&settings)?;

    tracing::debug!(version = alerthub_rs::pkg_version(), "Starting alerthub-rs");

    cli::execute_command(cli, settings, Some(log_handle)).await?;
    Ok(())
}
