mod analysis;
mod app;
mod cli;
mod config;
mod errors;
mod llm_client;
mod prompt;
mod report;
#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use atty::Stream;
use clap::Parser;
use colored::Colorize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::{ErrorLog, RoleAnalyzer};
use crate::cli::Cli;
use crate::config::Config;
use crate::prompt::{LinePrompter, Prompter, TerminalPrompter};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // .env must be loaded before clap reads env-backed flags
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{}", format!("{e:#}").red().bold());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env(cli.backend, cli.model.clone(), cli.error_log.clone())?;

    // Logs go to stderr so stdout carries only the analysis itself
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting role-analyzer v{}", env!("CARGO_PKG_VERSION"));

    let backend = llm_client::from_config(&config).context("Failed to build HTTP client")?;
    info!("LLM backend initialized ({}, model: {})", config.backend, backend.model());

    let error_log = ErrorLog::new(&config.error_log);
    info!("Failed analyses are logged to {}", error_log.path().display());

    let analyzer = RoleAnalyzer::new(backend, error_log);

    // dialoguer needs a terminal; piped stdin is read line by line
    let mut prompter: Box<dyn Prompter> = if atty::is(Stream::Stdin) {
        Box::new(TerminalPrompter::default())
    } else {
        Box::new(LinePrompter::new(std::io::stdin().lock()))
    };

    app::run(&analyzer, prompter.as_mut(), cli.mode(), cli.output.as_deref()).await?;

    Ok(())
}
