// ============================================================
// Layer 4b — Feature Engineering
// ============================================================
// Turns a cleaned PostTable into a numeric matrix:
//
//   date         → calendar.rs → year, month, day, weekday
//   profileName  → encoder.rs  → profile_encoded
//   text         → tfidf.rs    → sparse term weights
//                     │
//                     ▼
//                 matrix.rs   → FeatureSet (matrix + target + fitted artifacts)

/// Date parsing and calendar fields
pub mod calendar;

/// Categorical → integer id mapping
pub mod encoder;

/// TF-IDF text vectorizer
pub mod tfidf;

/// Matrix assembly and the FeatureSet bundle
pub mod matrix;
