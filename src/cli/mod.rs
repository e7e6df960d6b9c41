// ============================================================
// Layer 1 - CLI / Presentation Layer
// ============================================================
// Parses arguments with clap, hands a VerifyConfig to Layer 2
// and prints the rendered report to stdout. Logs go to stderr.

pub mod commands;

use anyhow::{bail, Result};
use clap::Parser;
use commands::{Commands, FormatArg, VerifyArgs};

use crate::application::verify_use_case::{VerifyConfig, VerifyUseCase};
use crate::infra::report::{ReportFormat, ReportWriter};

#[derive(Parser, Debug)]
#[command(
    name = "stratified-split-check",
    version,
    about = "Verify a per-class 60/20/20 train/validation/test split on synthetic phishing data."
)]
pub struct Cli {
    /// Defaults to `verify` with reference settings
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Some(Commands::Verify(args)) => run_verify(&args),
            None => execute(VerifyConfig::default(), ReportFormat::Text, false),
        }
    }
}

fn run_verify(args: &VerifyArgs) -> Result<()> {
    let format: FormatArg = args.format;
    execute(args.into(), format.into(), args.strict)
}

fn execute(config: VerifyConfig, format: ReportFormat, strict: bool) -> Result<()> {
    tracing::info!(
        "Verifying {}+{} samples, ratios {}/{}, seed {}",
        config.n_legit,
        config.n_phish,
        config.train_ratio,
        config.val_ratio,
        config.seed
    );

    let outcome = VerifyUseCase::new(config).execute()?;

    print!("{}", ReportWriter::new(format).render(&outcome)?);

    if strict && !outcome.passed() {
        bail!("split verification failed");
    }
    Ok(())
}
