use serde::{Deserialize, Serialize};

use crate::domain::sample::{Label, Sample};
use crate::domain::traits::Labelled;

/// Per-class row counts of a collection of labelled rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDistribution {
    pub total:      usize,
    pub legitimate: usize,
    pub phishing:   usize,
}

impl ClassDistribution {
    /// Count the rows of each class in `rows`.
    pub fn of<T: Labelled>(rows: &[T]) -> Self {
        let phishing = rows.iter().filter(|r| r.label() == Label::Phishing).count();
        Self {
            total:      rows.len(),
            legitimate: rows.len() - phishing,
            phishing,
        }
    }

    pub fn count(&self, label: Label) -> usize {
        match label {
            Label::Legitimate => self.legitimate,
            Label::Phishing   => self.phishing,
        }
    }

    /// Share of `label` in [0.0, 1.0]; 0.0 when there are no rows.
    pub fn share(&self, label: Label) -> f64 {
        fraction(self.count(label), self.total)
    }
}

/// `part / whole`, or 0.0 when `whole` is zero.
#[allow(clippy::cast_precision_loss)]
pub fn fraction(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// An ordered, immutable collection of samples.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    samples: Vec<Sample>,
}

impl Dataset {
    pub fn new(samples: Vec<Sample>) -> Self { Self { samples } }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn distribution(&self) -> ClassDistribution {
        ClassDistribution::of(&self.samples)
    }

    /// Row ids in dataset order
    pub fn ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.samples.iter().map(|s| s.id)
    }
}
