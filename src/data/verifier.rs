// ============================================================
// Layer 4 - Split Verifier
// ============================================================
// Recomputes what the split should look like from the original
// dataset and compares it with what the splitter produced.
//
// Three checks:
//   1. Integrity  - sizes sum to the original; every row id
//                   appears in exactly one split
//   2. Ratios     - each split's share of the whole is within
//                   `ratio_tolerance` of its target fraction
//   3. Balance    - each split's phishing share is within
//                   `balance_tolerance` of the original share
//
// The verifier only computes; rendering lives in infra::report.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::data::dataset::{fraction, ClassDistribution, Dataset};
use crate::data::splitter::{ClassSplitSizes, StratifiedSplit};
use crate::domain::sample::{Label, Sample};
use crate::domain::split::{SplitKind, SplitRatios};

/// Observed vs expected figures for one merged split.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitSummary {
    pub kind:              SplitKind,
    pub distribution:      ClassDistribution,
    pub expected_rows:     usize,
    pub target_fraction:   f64,
    pub actual_fraction:   f64,
    pub phishing_share:    f64,
    pub legitimate_share:  f64,
}

/// Check 1: no loss, no duplication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrityCheck {
    pub original_rows:  usize,
    pub split_rows:     usize,
    /// `original_rows - split_rows`; negative when rows were duplicated
    pub lost_rows:      i64,
    pub duplicated_ids: usize,
    pub missing_ids:    usize,
    pub passed:         bool,
}

/// Check 2: split sizes follow the target ratios.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatioCheck {
    pub tolerance:     f64,
    pub max_deviation: f64,
    pub passed:        bool,
}

/// Check 3: every split keeps the original class balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceCheck {
    pub tolerance:       f64,
    pub original_share:  f64,
    pub max_deviation:   f64,
    pub passed:          bool,
}

/// Everything the verifier found, ready to be rendered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    pub original:  ClassDistribution,
    pub per_class: Vec<ClassSplitSizes>,
    pub splits:    Vec<SplitSummary>,
    pub integrity: IntegrityCheck,
    pub ratios:    RatioCheck,
    pub balance:   BalanceCheck,
}

impl VerificationReport {
    /// True when all three checks passed
    pub fn passed(&self) -> bool {
        self.integrity.passed && self.ratios.passed && self.balance.passed
    }

    pub fn split(&self, kind: SplitKind) -> Option<&SplitSummary> {
        self.splits.iter().find(|s| s.kind == kind)
    }
}

/// Compares a stratified split against the dataset it came from.
#[derive(Debug, Clone, Copy)]
pub struct Verifier {
    ratio_tolerance:   f64,
    balance_tolerance: f64,
}

impl Verifier {
    pub fn new(ratio_tolerance: f64, balance_tolerance: f64) -> Self {
        Self { ratio_tolerance, balance_tolerance }
    }

    pub fn verify(
        &self,
        original: &Dataset,
        split:    &StratifiedSplit<Sample>,
        ratios:   &SplitRatios,
    ) -> VerificationReport {
        let dist  = original.distribution();
        let total = dist.total;

        let (exp_train, exp_val, exp_test) = ratios.expected_sizes(total);
        let expected = |kind: SplitKind| match kind {
            SplitKind::Train      => exp_train,
            SplitKind::Validation => exp_val,
            SplitKind::Test       => exp_test,
        };

        let splits: Vec<SplitSummary> = SplitKind::ALL
            .iter()
            .map(|&kind| {
                let rows = split.get(kind);
                let d    = ClassDistribution::of(rows);
                SplitSummary {
                    kind,
                    distribution:     d,
                    expected_rows:    expected(kind),
                    target_fraction:  ratios.fraction(kind),
                    actual_fraction:  fraction(rows.len(), total),
                    phishing_share:   d.share(Label::Phishing),
                    legitimate_share: d.share(Label::Legitimate),
                }
            })
            .collect();

        let integrity   = self.check_integrity(original, split);
        let ratio_check = self.check_ratios(&splits);
        let balance     = self.check_balance(&dist, &splits);

        tracing::debug!(
            "Verification: integrity={}, ratios={}, balance={}",
            integrity.passed,
            ratio_check.passed,
            balance.passed,
        );

        VerificationReport {
            original: dist,
            per_class: split.per_class.clone(),
            splits,
            integrity,
            ratios: ratio_check,
            balance,
        }
    }

    fn check_integrity(&self, original: &Dataset, split: &StratifiedSplit<Sample>) -> IntegrityCheck {
        let mut seen: HashMap<usize, usize> = HashMap::with_capacity(original.len());
        for kind in SplitKind::ALL {
            for s in split.get(kind) {
                *seen.entry(s.id).or_insert(0) += 1;
            }
        }

        let duplicated_ids = seen.values().filter(|&&c| c > 1).count();
        let missing_ids    = original.ids().filter(|id| !seen.contains_key(id)).count();

        let original_rows = original.len();
        let split_rows    = split.total_len();
        let lost_rows     = original_rows as i64 - split_rows as i64;

        IntegrityCheck {
            original_rows,
            split_rows,
            lost_rows,
            duplicated_ids,
            missing_ids,
            passed: lost_rows == 0 && duplicated_ids == 0 && missing_ids == 0,
        }
    }

    fn check_ratios(&self, splits: &[SplitSummary]) -> RatioCheck {
        let max_deviation = splits
            .iter()
            .map(|s| (s.actual_fraction - s.target_fraction).abs())
            .fold(0.0, f64::max);

        RatioCheck {
            tolerance: self.ratio_tolerance,
            max_deviation,
            passed: max_deviation <= self.ratio_tolerance,
        }
    }

    fn check_balance(&self, original: &ClassDistribution, splits: &[SplitSummary]) -> BalanceCheck {
        let original_share = original.share(Label::Phishing);

        // Empty splits carry no class information
        let max_deviation = splits
            .iter()
            .filter(|s| s.distribution.total > 0)
            .map(|s| (s.phishing_share - original_share).abs())
            .fold(0.0, f64::max);

        BalanceCheck {
            tolerance: self.balance_tolerance,
            original_share,
            max_deviation,
            passed: max_deviation <= self.balance_tolerance,
        }
    }
}

impl Default for Verifier {
    fn default() -> Self {
        Self::new(0.005, 0.01)
    }
}
