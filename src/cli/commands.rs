// ============================================================
// Layer 1 - CLI Commands and Arguments
// ============================================================
// One subcommand, `verify`. Every flag defaults to the
// reference run, so `verify` with no flags (or no subcommand
// at all) reproduces it exactly.

use clap::{Args, Subcommand, ValueEnum};

use crate::application::verify_use_case::VerifyConfig;
use crate::infra::report::ReportFormat;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate synthetic data, split it per class and verify the result
    Verify(VerifyArgs),
}

/// All arguments for the `verify` command.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Number of legitimate (label 0) samples
    #[arg(long, default_value_t = 5000)]
    pub n_legit: usize,

    /// Number of phishing (label 1) samples
    #[arg(long, default_value_t = 5000)]
    pub n_phish: usize,

    /// Fraction of each class assigned to training
    #[arg(long, default_value_t = 0.6)]
    pub train_ratio: f64,

    /// Fraction of each class assigned to validation; test gets the rest
    #[arg(long, default_value_t = 0.2)]
    pub val_ratio: f64,

    /// Seed for the per-class shuffles and the merge shuffle
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Seed for synthetic feature generation
    #[arg(long, default_value_t = 42)]
    pub data_seed: u64,

    /// Allowed gap between a split's share of the dataset and its target ratio
    #[arg(long, default_value_t = 0.005)]
    pub ratio_tolerance: f64,

    /// Allowed gap between a split's phishing share and the original share
    #[arg(long, default_value_t = 0.01)]
    pub balance_tolerance: f64,

    /// Report format
    #[arg(long, value_enum, default_value_t = FormatArg::Text)]
    pub format: FormatArg,

    /// Exit with an error when any check fails
    #[arg(long)]
    pub strict: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for ReportFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Text => ReportFormat::Text,
            FormatArg::Json => ReportFormat::Json,
        }
    }
}

/// The application layer never sees clap types.
impl From<&VerifyArgs> for VerifyConfig {
    fn from(a: &VerifyArgs) -> Self {
        VerifyConfig {
            n_legit:           a.n_legit,
            n_phish:           a.n_phish,
            train_ratio:       a.train_ratio,
            val_ratio:         a.val_ratio,
            seed:              a.seed,
            data_seed:         a.data_seed,
            ratio_tolerance:   a.ratio_tolerance,
            balance_tolerance: a.balance_tolerance,
        }
    }
}
