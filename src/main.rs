use clap::Parser;
use env_logger::Env;
use crate::config::constants::DEFAULT_LOG_FILTER;
use crate::structs::cli::Cli;
use crate::workers::command_runner::CommandRunner;

mod config;
mod constants;
mod enums;
mod errors;
mod helpers;
mod services;
mod structs;
mod traits;
mod ui;
mod workers;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    let mut runner = CommandRunner::new(&cli)?;
    runner.run_command(cli.command).await
}
