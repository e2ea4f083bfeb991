// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain data types and traits that every other layer speaks:
//
//   table.rs   — PostTable, the in-memory record table
//   error.rs   — PipelineError, the failure taxonomy
//   report.rs  — ModelScores / EvaluationReport
//   traits.rs  — RecordSource and Regressor
//
// Rules for this layer:
//   - NO file I/O
//   - NO model fitting code
//   - Only structs, enums and traits
//
// The only numeric dependency allowed here is ndarray views in the
// Regressor signature, so the ml layer and the application layer can
// agree on a matrix type.

/// The record table loaded from CSV
pub mod table;

/// Error taxonomy shared by all pipeline stages
pub mod error;

/// Per-model evaluation results
pub mod report;

/// Core abstractions (traits) that other layers implement
pub mod traits;

/// Column names the pipeline expects in the input file.
pub mod columns {
    pub const TEXT: &str           = "text";
    pub const PROFILE_NAME: &str   = "profileName";
    pub const LIKES_COUNT: &str    = "likesCount";
    pub const COMMENTS_COUNT: &str = "commentsCount";
    pub const DATE: &str           = "date";

    /// Columns that must be present for cleaning and feature building.
    pub const REQUIRED: [&str; 5] = [TEXT, PROFILE_NAME, LIKES_COUNT, COMMENTS_COUNT, DATE];
}
