// ============================================================
// Layer 3 - Sample Domain Type
// ============================================================
// One row of the phishing dataset: a stable row id, two numeric
// features and a binary label.
//
// The row id is the position of the row in the generated
// dataset. Shuffling never changes it, so it identifies a row
// across the train/validation/test splits.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary class label. The discriminants match the `status`
/// column of the phishing dataset: 0 = legitimate, 1 = phishing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Legitimate = 0,
    Phishing   = 1,
}

impl Label {
    /// Numeric class value (0 or 1)
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Legitimate => write!(f, "legitimate({})", self.as_u8()),
            Label::Phishing   => write!(f, "phishing({})", self.as_u8()),
        }
    }
}

/// A labelled row with two numeric features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Position of this row in the original dataset
    pub id: usize,

    pub feature1: f64,
    pub feature2: f64,

    pub label: Label,
}

impl Sample {
    pub fn new(id: usize, feature1: f64, feature2: f64, label: Label) -> Self {
        Self { id, feature1, feature2, label }
    }
}
