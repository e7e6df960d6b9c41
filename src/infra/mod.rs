// ============================================================
// Layer 6 - Infrastructure Layer
// ============================================================
//   report.rs - Renders a finished verification run to any
//               writer, as a human-readable text report or as
//               pretty-printed JSON.

/// Text and JSON rendering of verification outcomes
pub mod report;
