// ============================================================
// Layer 2 - VerifyUseCase
// ============================================================
// Runs the split check end to end:
//
//   Step 1: Validate split ratios        (Layer 3 - domain)
//   Step 2: Generate synthetic dataset   (Layer 4 - data)
//   Step 3: Stratified split + merge     (Layer 4 - data)
//   Step 4: Verify the result            (Layer 4 - data)

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use crate::data::{
    dataset::Dataset,
    generator::SyntheticGenerator,
    splitter::stratified_split,
    verifier::{VerificationReport, Verifier},
};
use crate::domain::split::SplitRatios;
use crate::domain::traits::SampleSource;

// ─── Run Configuration ───────────────────────────────────────────────────────
// Defaults reproduce the reference run: 5000 + 5000 rows,
// 60/20/20 split, seed 42 for both data and shuffling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyConfig {
    pub n_legit:           usize,
    pub n_phish:           usize,
    pub train_ratio:       f64,
    pub val_ratio:         f64,
    /// Seed for the per-class shuffles and the merge shuffle
    pub seed:              u64,
    /// Seed for synthetic feature generation
    pub data_seed:         u64,
    pub ratio_tolerance:   f64,
    pub balance_tolerance: f64,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            n_legit:           5000,
            n_phish:           5000,
            train_ratio:       0.6,
            val_ratio:         0.2,
            seed:              42,
            data_seed:         42,
            ratio_tolerance:   0.005,
            balance_tolerance: 0.01,
        }
    }
}

/// A finished run: the configuration it used and what was found.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOutcome {
    pub config: VerifyConfig,
    pub ratios: SplitRatios,
    pub report: VerificationReport,
}

impl VerifyOutcome {
    pub fn passed(&self) -> bool {
        self.report.passed()
    }
}

pub struct VerifyUseCase {
    config: VerifyConfig,
}

impl VerifyUseCase {
    pub fn new(config: VerifyConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<VerifyOutcome> {
        let cfg = &self.config;

        // ── Step 1: Ratios and tolerances ────────────────────────────────────
        let ratios = SplitRatios::new(cfg.train_ratio, cfg.val_ratio)?;
        for (name, tolerance) in [
            ("ratio_tolerance", cfg.ratio_tolerance),
            ("balance_tolerance", cfg.balance_tolerance),
        ] {
            ensure!(
                tolerance.is_finite() && tolerance >= 0.0,
                "{name} must be a finite, non-negative number, got {tolerance}"
            );
        }

        // ── Step 2: Synthetic dataset ────────────────────────────────────────
        let generator = SyntheticGenerator::new(cfg.n_legit, cfg.n_phish, cfg.data_seed);
        let dataset   = Dataset::new(generator.load_all()?);
        ensure!(!dataset.is_empty(), "cannot split an empty dataset");
        tracing::info!(
            "Generated {} samples ({} legitimate, {} phishing)",
            dataset.len(),
            cfg.n_legit,
            cfg.n_phish
        );

        // ── Step 3: Split each class, then merge ─────────────────────────────
        // The original dataset is kept intact for verification
        let split = stratified_split(dataset.samples().to_vec(), &ratios, cfg.seed);
        tracing::info!(
            "Split: {} train, {} validation, {} test",
            split.train.len(),
            split.validation.len(),
            split.test.len()
        );

        // ── Step 4: Verify ───────────────────────────────────────────────────
        let verifier = Verifier::new(cfg.ratio_tolerance, cfg.balance_tolerance);
        let report   = verifier.verify(&dataset, &split, &ratios);
        if report.passed() {
            tracing::info!("All split checks passed");
        } else {
            tracing::warn!("One or more split checks failed");
        }

        Ok(VerifyOutcome { config: cfg.clone(), ratios, report })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::split::SplitKind;

    #[test]
    fn test_default_run_matches_reference_sizes() {
        let outcome = VerifyUseCase::new(VerifyConfig::default()).execute().unwrap();
        assert!(outcome.passed());

        let report = &outcome.report;
        assert_eq!(report.original.total, 10_000);
        assert_eq!(report.split(SplitKind::Train).unwrap().distribution.total, 6000);
        assert_eq!(report.split(SplitKind::Validation).unwrap().distribution.total, 2000);
        assert_eq!(report.split(SplitKind::Test).unwrap().distribution.total, 2000);
    }

    #[test]
    fn test_runs_are_deterministic() {
        let a = VerifyUseCase::new(VerifyConfig::default()).execute().unwrap();
        let b = VerifyUseCase::new(VerifyConfig::default()).execute().unwrap();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_rejects_bad_ratios() {
        let cfg = VerifyConfig { train_ratio: 0.9, val_ratio: 0.2, ..VerifyConfig::default() };
        assert!(VerifyUseCase::new(cfg).execute().is_err());
    }

    #[test]
    fn test_rejects_bad_tolerances() {
        for (ratio_tolerance, balance_tolerance) in [
            (f64::NAN, 0.01),
            (-0.1, 0.01),
            (0.005, f64::INFINITY),
            (0.005, -1.0),
        ] {
            let cfg = VerifyConfig { ratio_tolerance, balance_tolerance, ..VerifyConfig::default() };
            let err = VerifyUseCase::new(cfg).execute().unwrap_err();
            assert!(err.to_string().contains("non-negative"), "{err}");
        }
    }

    #[test]
    fn test_zero_tolerance_is_allowed() {
        let cfg = VerifyConfig { ratio_tolerance: 0.0, balance_tolerance: 0.0, ..VerifyConfig::default() };
        assert!(VerifyUseCase::new(cfg).execute().is_ok());
    }

    #[test]
    fn test_rejects_empty_dataset() {
        let cfg = VerifyConfig { n_legit: 0, n_phish: 0, ..VerifyConfig::default() };
        let err = VerifyUseCase::new(cfg).execute().unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_custom_ratios() {
        let cfg = VerifyConfig {
            n_legit:     1000,
            n_phish:     1000,
            train_ratio: 0.8,
            val_ratio:   0.1,
            ..VerifyConfig::default()
        };
        let outcome = VerifyUseCase::new(cfg).execute().unwrap();
        assert!(outcome.passed());
        assert_eq!(outcome.report.split(SplitKind::Train).unwrap().distribution.total, 1600);
        assert_eq!(outcome.report.split(SplitKind::Validation).unwrap().distribution.total, 200);
        assert_eq!(outcome.report.split(SplitKind::Test).unwrap().distribution.total, 200);
    }
}
