mod cli;
mod application;
mod domain;
mod data;
mod infra;

use anyhow::Result;
use cli::Cli;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Used only when RUST_LOG is unset or empty
const DEFAULT_LOG_DIRECTIVE: &str = "stratified_split_check=info";

fn main() -> Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(rust_log.as_deref())?)
        .init();

    let cli = Cli::parse();
    cli.run()
}

/// RUST_LOG directives win outright; the crate default is only a fallback.
fn log_filter(rust_log: Option<&str>) -> Result<EnvFilter> {
    let directives = rust_log
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(DEFAULT_LOG_DIRECTIVE);
    Ok(EnvFilter::try_new(directives)?)
}
