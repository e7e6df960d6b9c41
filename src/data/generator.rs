// ============================================================
// Layer 4 - Synthetic Data Generator
// ============================================================
// Produces a labelled dataset with two standard-normal features.
//
// Layout of the generated rows:
//   ids [0 .. n_legit)                  → label 0 (legitimate)
//   ids [n_legit .. n_legit + n_phish)  → label 1 (phishing)
//
// All feature1 values are drawn first, then all feature2
// values, from a single StdRng seeded once. The same seed and
// sizes always produce the same dataset.

use anyhow::{Context, Result};
use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

use crate::domain::sample::{Label, Sample};
use crate::domain::traits::SampleSource;

/// Seeded generator for a two-class synthetic dataset.
#[derive(Debug, Clone)]
pub struct SyntheticGenerator {
    n_legit: usize,
    n_phish: usize,
    seed:    u64,
}

impl SyntheticGenerator {
    pub fn new(n_legit: usize, n_phish: usize, seed: u64) -> Self {
        Self { n_legit, n_phish, seed }
    }

    /// Total row count.
    ///
    /// # Errors
    /// Fails when the two class sizes overflow `usize`.
    pub fn total(&self) -> Result<usize> {
        self.n_legit.checked_add(self.n_phish).with_context(|| {
            format!("dataset size overflows: {} + {} rows", self.n_legit, self.n_phish)
        })
    }
}

impl SampleSource for SyntheticGenerator {
    fn load_all(&self) -> Result<Vec<Sample>> {
        let total   = self.total()?;
        let mut rng = StdRng::seed_from_u64(self.seed);

        let feature1: Vec<f64> = draw_normal(&mut rng, total);
        let feature2: Vec<f64> = draw_normal(&mut rng, total);

        let samples: Vec<Sample> = feature1
            .into_iter()
            .zip(feature2)
            .enumerate()
            .map(|(id, (f1, f2))| {
                let label = if id < self.n_legit { Label::Legitimate } else { Label::Phishing };
                Sample::new(id, f1, f2, label)
            })
            .collect();

        tracing::debug!(
            "Generated {} samples ({} legitimate, {} phishing) with seed {}",
            samples.len(),
            self.n_legit,
            self.n_phish,
            self.seed,
        );

        Ok(samples)
    }
}

/// `count` independent draws from N(0, 1)
fn draw_normal(rng: &mut StdRng, count: usize) -> Vec<f64> {
    (0..count)
        .map(|_| Distribution::<f64>::sample(&StandardNormal, &mut *rng))
        .collect()
}
