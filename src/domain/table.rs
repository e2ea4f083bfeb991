// ============================================================
// Layer 3 — Post Table
// ============================================================
// The in-memory record table: one row per post, columns exactly as
// they appeared in the source file (names and order preserved).
//
// Cells are stored as Option<String>:
//   - None        → a missing value (empty cell, "NA", "null", ...)
//   - Some(text)  → the raw text of the cell
//
// Typed views (numbers, text with defaults) are produced on demand
// by the accessor methods, so the table itself never loses
// information that a later stage might need.

use serde::{Deserialize, Serialize};

use crate::domain::error::{PipelineError, PipelineResult};

/// A rectangular table of optional string cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostTable {
    headers: Vec<String>,
    rows:    Vec<Vec<Option<String>>>,
}

impl PostTable {
    /// Build a table from headers and rows.
    /// Every row must have exactly `headers.len()` cells.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == headers.len()));
        Self { headers, rows }
    }

    /// Convenience constructor used by tests and small fixtures.
    pub fn from_literal(headers: &[&str], rows: &[Vec<Option<&str>>]) -> Self {
        let headers = headers.iter().map(|h| h.to_string()).collect();
        let rows = rows
            .iter()
            .map(|r| r.iter().map(|c| c.map(str::to_string)).collect())
            .collect();
        Self::new(headers, rows)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.headers.len()
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows(), self.n_cols())
    }

    /// Position of a named column, or a SchemaError naming it.
    pub fn column_index(&self, name: &str) -> PipelineResult<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| PipelineError::schema(name))
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// Raw cells of one column, in row order.
    pub fn column(&self, name: &str) -> PipelineResult<Vec<Option<&str>>> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(|r| r[idx].as_deref()).collect())
    }

    /// Text view of a column; missing cells read as "".
    pub fn text_column(&self, name: &str) -> PipelineResult<Vec<&str>> {
        Ok(self
            .column(name)?
            .into_iter()
            .map(|c| c.unwrap_or(""))
            .collect())
    }

    /// Numeric view of a column.
    /// Missing or unparsable cells become NaN so a later stage can
    /// decide whether that is acceptable.
    pub fn numeric_column(&self, name: &str) -> PipelineResult<Vec<f64>> {
        Ok(self
            .column(name)?
            .into_iter()
            .map(|c| c.and_then(|v| v.trim().parse::<f64>().ok()).unwrap_or(f64::NAN))
            .collect())
    }

    /// Number of missing cells in a column.
    pub fn null_count(&self, name: &str) -> PipelineResult<usize> {
        Ok(self.column(name)?.iter().filter(|c| c.is_none()).count())
    }

    /// Replace every missing cell of `name` with `value`.
    /// Returns how many cells were filled.
    pub fn fill_missing(&mut self, name: &str, value: &str) -> PipelineResult<usize> {
        let idx    = self.column_index(name)?;
        let mut n  = 0;
        for row in &mut self.rows {
            if row[idx].is_none() {
                row[idx] = Some(value.to_string());
                n += 1;
            }
        }
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PostTable {
        PostTable::from_literal(
            &["text", "likesCount"],
            &[
                vec![Some("hello"), Some("3")],
                vec![None, Some("oops")],
                vec![Some("bye"), None],
            ],
        )
    }

    #[test]
    fn test_shape() {
        assert_eq!(sample().shape(), (3, 2));
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let err = sample().column("date").unwrap_err();
        assert!(matches!(err, PipelineError::Schema { ref column } if column == "date"));
    }

    #[test]
    fn test_numeric_column_uses_nan_for_bad_cells() {
        let values = sample().numeric_column("likesCount").unwrap();
        assert_eq!(values[0], 3.0);
        assert!(values[1].is_nan());
        assert!(values[2].is_nan());
    }

    #[test]
    fn test_fill_missing_counts_filled_cells() {
        let mut t = sample();
        assert_eq!(t.fill_missing("text", "").unwrap(), 1);
        assert_eq!(t.null_count("text").unwrap(), 0);
        assert_eq!(t.text_column("text").unwrap(), vec!["hello", "", "bye"]);
    }
}
