mod cli;
mod commands;
mod config;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use mailman_logging::mm_error;
use mailman_session::ListSession;

use crate::cli::Cli;
use crate::config::{load_profile, Overrides, Profile};
use crate::logging::{level_for, LogDestination};

fn main() {
    let cli = Cli::parse();
    logging::initialize(
        LogDestination::from_args(cli.log_file.clone()),
        level_for(cli.verbose),
    );

    if let Err(err) = run(cli) {
        mm_error!("{err:#}");
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let profile = match &cli.profile {
        Some(path) => load_profile(path)?,
        None => Profile::default(),
    };
    let settings = profile.resolve(Overrides {
        base_url: cli.base_url,
        list: cli.list,
        password: cli.password,
    })?;

    let session = ListSession::connect(
        &settings.base_url,
        &settings.list,
        &settings.password,
        &settings.transport,
        settings.layout,
    )
    .with_context(|| format!("could not log in to list {}", settings.list))?;

    let value = commands::run(cli.command, &session)?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
