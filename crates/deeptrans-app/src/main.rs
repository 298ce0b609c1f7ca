use std::process::ExitCode;

use clap::Parser;
use deeptrans_config::Config;

mod cli;
mod commands;
mod logging;
mod profile;

use self::cli::Cli;
use self::profile::{build_state, load_profile, save_profile, snapshot};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    logging::init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::new();
    let path = config.profile_path();

    let profile = load_profile(&path)?;
    let state = build_state(config, profile)?;

    if commands::dispatch(&state, cli.command).await? {
        save_profile(&path, &snapshot(&state).await)?;
    }

    Ok(())
}
