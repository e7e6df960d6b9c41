// ============================================================
// Layer 4 - Data Pipeline
// ============================================================
// The pipeline flows in this order:
//
//   SyntheticGenerator → labelled rows (legitimate, then phishing)
//       │
//       ▼
//   Dataset            → immutable original, kept for verification
//       │
//       ▼
//   splitter           → per-class shuffle + slice, then merge
//       │
//       ▼
//   Verifier           → counts, ratios and balance vs. expectations

/// Seeded synthetic dataset generation
pub mod generator;

/// Dataset container and class counting
pub mod dataset;

/// Per-class train/validation/test split and merge
pub mod splitter;

/// Integrity, ratio and balance checks over a finished split
pub mod verifier;
