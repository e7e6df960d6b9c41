// ============================================================
// Layer 3 - Domain Layer
// ============================================================
// Plain Rust structs, enums and traits that name the concepts
// of the split check: labelled samples, the three split kinds,
// and the ratios that decide where each class is cut.
//
// Rules for this layer:
//   - NO random number generation here
//   - NO printing or file I/O
//   - Only plain data and validation

// A labelled row (two features + legitimate/phishing label)
pub mod sample;

// Split kinds and the ratios used to cut each class
pub mod split;

// Core abstractions implemented by other layers
pub mod traits;
