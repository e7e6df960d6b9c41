// ============================================================
// Layer 3 - Split Kinds and Ratios
// ============================================================
// A dataset is cut into three partitions: train, validation
// and test. Only the train and validation fractions are stored;
// test always receives the remainder, so the three ratios sum
// to 1.0 by construction.
//
// Cut points for a class of n rows (integer truncation):
//   train_end = floor(n * train)
//   val_end   = floor(n * (train + validation))
//
//   rows [0..train_end)        → train
//   rows [train_end..val_end)  → validation
//   rows [val_end..n)          → test

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Slack allowed when checking that train + validation ≤ 1.0
const RATIO_EPSILON: f64 = 1e-9;

/// The three partitions produced by the splitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitKind {
    Train,
    Validation,
    Test,
}

impl SplitKind {
    pub const ALL: [SplitKind; 3] = [SplitKind::Train, SplitKind::Validation, SplitKind::Test];

    /// Short column label used in the text report
    pub fn name(self) -> &'static str {
        match self {
            SplitKind::Train      => "Train",
            SplitKind::Validation => "Val",
            SplitKind::Test       => "Test",
        }
    }
}

impl fmt::Display for SplitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Train/validation fractions; test is the remainder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSplitRatios")]
pub struct SplitRatios {
    train:      f64,
    validation: f64,
}

/// Unchecked wire form; deserialisation goes through `SplitRatios::new`.
#[derive(Deserialize)]
struct RawSplitRatios {
    train:      f64,
    validation: f64,
}

impl TryFrom<RawSplitRatios> for SplitRatios {
    type Error = anyhow::Error;

    fn try_from(raw: RawSplitRatios) -> Result<Self> {
        Self::new(raw.train, raw.validation)
    }
}

impl SplitRatios {
    /// Validate and build a ratio pair.
    ///
    /// # Errors
    /// Fails if either ratio is negative or non-finite, or if
    /// `train + validation` exceeds 1.0.
    pub fn new(train: f64, validation: f64) -> Result<Self> {
        ensure!(
            train.is_finite() && validation.is_finite(),
            "split ratios must be finite (train={train}, validation={validation})"
        );
        ensure!(
            train >= 0.0 && validation >= 0.0,
            "split ratios must not be negative (train={train}, validation={validation})"
        );
        ensure!(
            train + validation <= 1.0 + RATIO_EPSILON,
            "train + validation ratios must not exceed 1.0, got {}",
            train + validation
        );
        Ok(Self { train, validation })
    }

    pub fn train(&self) -> f64 {
        self.train
    }

    pub fn validation(&self) -> f64 {
        self.validation
    }

    /// Remaining fraction assigned to the test split
    pub fn test(&self) -> f64 {
        (1.0 - self.train - self.validation).max(0.0)
    }

    /// Target fraction for one split kind
    pub fn fraction(&self, kind: SplitKind) -> f64 {
        match kind {
            SplitKind::Train      => self.train(),
            SplitKind::Validation => self.validation(),
            SplitKind::Test       => self.test(),
        }
    }

    /// The two cut indices `(train_end, val_end)` for a class of `n` rows.
    /// Both are clamped to `n` and `train_end <= val_end` always holds.
    pub fn cut_points(&self, n: usize) -> (usize, usize) {
        let train_end = ((n as f64) * self.train) as usize;
        let val_end   = ((n as f64) * (self.train + self.validation)) as usize;

        let train_end = train_end.min(n);
        let val_end   = val_end.clamp(train_end, n);
        (train_end, val_end)
    }

    /// Expected whole-dataset sizes `(train, validation, test)`:
    /// each ratio applied to `total` independently, test takes the rest.
    pub fn expected_sizes(&self, total: usize) -> (usize, usize, usize) {
        let train = (((total as f64) * self.train) as usize).min(total);
        let val   = (((total as f64) * self.validation) as usize).min(total - train);
        (train, val, total - train - val)
    }
}

impl Default for SplitRatios {
    /// 60% train, 20% validation, 20% test
    fn default() -> Self {
        Self { train: 0.6, validation: 0.2 }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ratios() {
        let r = SplitRatios::default();
        assert_eq!(r.train(), 0.6);
        assert_eq!(r.validation(), 0.2);
        assert!((r.test() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_cut_points_for_balanced_class() {
        let r = SplitRatios::default();
        assert_eq!(r.cut_points(5000), (3000, 4000));
    }

    #[test]
    fn test_cut_points_truncate() {
        // 7 * 0.6 = 4.2 → 4, 7 * 0.8 = 5.6 → 5
        let r = SplitRatios::default();
        assert_eq!(r.cut_points(7), (4, 5));
    }

    #[test]
    fn test_cut_points_empty_class() {
        assert_eq!(SplitRatios::default().cut_points(0), (0, 0));
    }

    #[test]
    fn test_expected_sizes_default() {
        let r = SplitRatios::default();
        assert_eq!(r.expected_sizes(10_000), (6000, 2000, 2000));
    }

    #[test]
    fn test_whole_train_ratio() {
        let r = SplitRatios::new(1.0, 0.0).unwrap();
        assert_eq!(r.cut_points(10), (10, 10));
        assert_eq!(r.test(), 0.0);
    }

    #[test]
    fn test_rejects_negative_ratio() {
        assert!(SplitRatios::new(-0.1, 0.2).is_err());
        assert!(SplitRatios::new(0.6, -0.2).is_err());
    }

    #[test]
    fn test_rejects_ratios_above_one() {
        let err = SplitRatios::new(0.8, 0.3).unwrap_err();
        assert!(err.to_string().contains("must not exceed 1.0"));
    }

    #[test]
    fn test_rejects_nan() {
        assert!(SplitRatios::new(f64::NAN, 0.2).is_err());
    }

    #[test]
    fn test_deserialize_validates_ratios() {
        let ok: SplitRatios = serde_json::from_str(r#"{"train":0.7,"validation":0.1}"#).unwrap();
        assert_eq!(ok, SplitRatios::new(0.7, 0.1).unwrap());

        let bad = serde_json::from_str::<SplitRatios>(r#"{"train":0.9,"validation":0.9}"#);
        assert!(bad.unwrap_err().to_string().contains("must not exceed 1.0"));

        assert!(serde_json::from_str::<SplitRatios>(r#"{"train":-0.1,"validation":0.2}"#).is_err());
    }

    #[test]
    fn test_fraction_by_kind() {
        let r = SplitRatios::new(0.7, 0.1).unwrap();
        assert_eq!(r.fraction(SplitKind::Train), 0.7);
        assert_eq!(r.fraction(SplitKind::Validation), 0.1);
        assert!((r.fraction(SplitKind::Test) - 0.2).abs() < 1e-12);
    }
}
