mod cli;
mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use preserve_config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Logs go to stderr; stdout carries the transformed text
    let fallback = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback)),
        )
        .init();

    match cli.command {
        cli::Commands::Run(args) => {
            let config = Config::load(cli.config.as_deref())?;
            commands::run::handle(args, &config).await
        }
        cli::Commands::Extract(args) => {
            let config = Config::load(cli.config.as_deref())?;
            commands::extract::handle(args, &config).await
        }
        cli::Commands::Init { force } => commands::init::handle(force),
        cli::Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut cli::Cli::command(), "preserve", &mut std::io::stdout());
            Ok(())
        }
    }
}
