// ============================================================
// Layer 2 - Application / Use Cases
// ============================================================
// Orchestrates the other layers for one run of the split check.
//
// Rules for this layer:
//   - No shuffling or counting logic here (that's Layer 4)
//   - No printing here (that's Layer 1)
//   - Only workflow coordination

// Generate → split → verify
pub mod verify_use_case;
