//! untar - command-line utility for extracting ustar archives.

mod cli;
mod commands;
mod error;
mod output;
mod progress;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.default_log_filter()))
        .write_style(env_logger::WriteStyle::Never)
        .format_timestamp(None)
        .init();

    if let Some(shell) = cli.completions {
        commands::completion::execute(shell);
        return Ok(());
    }

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);
    commands::extract::execute(&cli, &*formatter)
}
