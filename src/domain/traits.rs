// ============================================================
// Layer 3 - Core Traits (Abstractions)
// ============================================================
// The application layer works against these traits rather than
// concrete types:
//   - SyntheticGenerator implements SampleSource
//   - Sample implements Labelled, so any labelled row type can
//     be stratified by the splitter

use anyhow::Result;
use crate::domain::sample::{Label, Sample};

// ─── SampleSource ─────────────────────────────────────────────────────────────
/// Any component that can produce the full labelled dataset.
pub trait SampleSource {
    /// Produce every sample, in a deterministic order.
    fn load_all(&self) -> Result<Vec<Sample>>;
}

// ─── Labelled ─────────────────────────────────────────────────────────────────
/// Anything carrying a class label.
pub trait Labelled {
    fn label(&self) -> Label;
}

impl Labelled for Sample {
    fn label(&self) -> Label {
        self.label
    }
}
