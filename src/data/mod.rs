// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the CSV file on disk and the cleaned table,
// plus the row split used for training:
//
//   posts.csv
//       │
//       ▼
//   CsvLoader    → reads the file into a PostTable
//       │
//       ▼
//   Cleaner      → fills missing text / profile / counts
//       │
//       ▼
//   (features layer builds the matrix)
//       │
//       ▼
//   splitter     → seeded train/test row indices
//
// writer.rs goes the other way and saves a table back to CSV.

/// Reads a CSV file into a PostTable
pub mod loader;

/// Fills missing values with fixed defaults
pub mod cleaner;

/// Seeded train/test split of row indices
pub mod splitter;

/// Writes a PostTable to CSV
pub mod writer;
