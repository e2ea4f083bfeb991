// ============================================================
// Layer 4 — CSV Loader
// ============================================================
// Reads a delimited file with a header row into a PostTable using
// the csv crate.
//
// Behaviour:
//   - Column names and row order are kept exactly as stored
//   - Conventional NA tokens ("", "NA", "null", "NaN", ...) become
//     missing cells (None)
//   - A missing file, an empty file, ragged rows or bytes that are
//     not UTF-8 all fail with PipelineError::DataAccess naming the path
//
// On success a one-line confirmation with the table shape is printed.

use std::path::{Path, PathBuf};

use crate::domain::error::{PipelineError, PipelineResult};
use crate::domain::table::PostTable;
use crate::domain::traits::RecordSource;

/// Cell values that are read as "missing".
const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan",
    "1.#IND", "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a",
    "nan", "null",
];

/// Loads a single CSV file.
/// Implements the RecordSource trait from Layer 3.
pub struct CsvLoader {
    path: PathBuf,
}

impl CsvLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for CsvLoader {
    fn load(&self) -> PipelineResult<PostTable> {
        let path = self.path.as_path();

        if !path.is_file() {
            return Err(PipelineError::data_access(path, "file does not exist"));
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(|e| PipelineError::data_access(path, e))?;

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| PipelineError::data_access(path, e))?
            .iter()
            .map(str::to_string)
            .collect();

        if headers.is_empty() {
            return Err(PipelineError::data_access(path, "no columns to parse"));
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| PipelineError::data_access(path, e))?;
            rows.push(record.iter().map(parse_cell).collect());
        }

        let table = PostTable::new(headers, rows);
        let (n_rows, n_cols) = table.shape();
        println!("Loaded dataset from {} — shape: ({n_rows}, {n_cols})", path.display());
        tracing::debug!("Columns: {:?}", table.headers());

        Ok(table)
    }
}

/// Shorthand for `CsvLoader::new(path).load()`.
pub fn load_data(path: impl Into<PathBuf>) -> PipelineResult<PostTable> {
    CsvLoader::new(path).load()
}

fn parse_cell(raw: &str) -> Option<String> {
    if NA_TOKENS.contains(&raw) {
        None
    } else {
        Some(raw.to_string())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_csv(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_loads_shape_and_order() {
        let dir  = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "posts.csv", "b,a\n1,x\n2,y\n3,z\n");
        let table = load_data(&path).unwrap();
        assert_eq!(table.shape(), (3, 2));
        assert_eq!(table.headers(), &["b".to_string(), "a".to_string()]);
        assert_eq!(table.text_column("a").unwrap(), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_na_tokens_become_missing() {
        let dir  = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "posts.csv", "text,likesCount\n,NA\nhi,null\nNaN,4\n");
        let table = load_data(&path).unwrap();
        assert_eq!(table.null_count("text").unwrap(), 2);
        assert_eq!(table.null_count("likesCount").unwrap(), 2);
    }

    #[test]
    fn test_quoted_fields_keep_commas() {
        let dir  = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "posts.csv", "text,n\n\"hello, world\",1\n");
        let table = load_data(&path).unwrap();
        assert_eq!(table.text_column("text").unwrap(), vec!["hello, world"]);
    }

    #[test]
    fn test_missing_file_is_data_access_error() {
        let err = load_data("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, PipelineError::DataAccess { .. }));
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        let dir  = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "bad.csv", "a,b\n1,2\n3\n");
        let err  = load_data(&path).unwrap_err();
        assert!(matches!(err, PipelineError::DataAccess { .. }));
    }

    #[test]
    fn test_empty_file_is_rejected() {
        let dir  = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "empty.csv", "");
        assert!(load_data(&path).is_err());
    }
}
