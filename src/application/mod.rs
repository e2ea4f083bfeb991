// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer strings the other layers together into the two things
// a user can ask for: a full pipeline run, or just a cleaned copy of
// the data.
//
// Rules for this layer:
//   - No feature or model math here
//   - No argument parsing (that's Layer 1)
//   - File access only through Layer 4 and Layer 6
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Load → clean → features → train → report
pub mod pipeline_use_case;

// Load → clean → save
pub mod clean_use_case;
