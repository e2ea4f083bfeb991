// ============================================================
// Layer 4 — Missing Value Cleaner
// ============================================================
// Fills missing cells in the four columns the pipeline depends on:
//
//   text          → ""          (no words, still a valid document)
//   profileName   → "Unknown"   (its own category for the encoder)
//   likesCount    → 0
//   commentsCount → 0
//
// Every other column is copied through untouched. The input table
// is not mutated; a cleaned copy is returned.

use crate::domain::columns;
use crate::domain::error::PipelineResult;
use crate::domain::table::PostTable;

pub const TEXT_DEFAULT: &str    = "";
pub const PROFILE_DEFAULT: &str = "Unknown";
pub const COUNT_DEFAULT: &str   = "0";

/// Column → fill value, applied in this order.
const FILL_RULES: [(&str, &str); 4] = [
    (columns::TEXT,           TEXT_DEFAULT),
    (columns::PROFILE_NAME,   PROFILE_DEFAULT),
    (columns::LIKES_COUNT,    COUNT_DEFAULT),
    (columns::COMMENTS_COUNT, COUNT_DEFAULT),
];

pub struct Cleaner;

impl Cleaner {
    pub fn new() -> Self {
        Self
    }

    /// Return a copy of `table` with the fill rules applied.
    /// Fails with a SchemaError, before touching anything, if one of
    /// the four columns is absent.
    pub fn clean(&self, table: &PostTable) -> PipelineResult<PostTable> {
        for (column, _) in FILL_RULES {
            table.column_index(column)?;
        }

        let mut cleaned = table.clone();
        for (column, value) in FILL_RULES {
            let filled = cleaned.fill_missing(column, value)?;
            if filled > 0 {
                tracing::debug!("Filled {} missing '{}' values with {:?}", filled, column, value);
            }
        }
        Ok(cleaned)
    }
}

impl Default for Cleaner {
    fn default() -> Self {
        Self::new()
    }
}

/// Shorthand for `Cleaner::new().clean(table)`.
pub fn clean_data(table: &PostTable) -> PipelineResult<PostTable> {
    Cleaner::new().clean(table)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::PipelineError;

    fn raw() -> PostTable {
        PostTable::from_literal(
            &["text", "profileName", "likesCount", "commentsCount", "date", "extra"],
            &[
                vec![None, Some("alice"), Some("5"), None, Some("2024-01-01"), None],
                vec![Some("hi"), None, None, Some("2"), None, Some("keep")],
            ],
        )
    }

    #[test]
    fn test_fills_defaults() {
        let cleaned = clean_data(&raw()).unwrap();
        assert_eq!(cleaned.column("text").unwrap(), vec![Some(""), Some("hi")]);
        assert_eq!(cleaned.column("profileName").unwrap(), vec![Some("alice"), Some("Unknown")]);
        assert_eq!(cleaned.numeric_column("likesCount").unwrap(), vec![5.0, 0.0]);
        assert_eq!(cleaned.numeric_column("commentsCount").unwrap(), vec![0.0, 2.0]);
    }

    #[test]
    fn test_no_missing_values_remain() {
        let cleaned = clean_data(&raw()).unwrap();
        for column in ["text", "profileName", "likesCount", "commentsCount"] {
            assert_eq!(cleaned.null_count(column).unwrap(), 0, "{column}");
        }
    }

    #[test]
    fn test_other_columns_untouched() {
        let input   = raw();
        let cleaned = clean_data(&input).unwrap();
        assert_eq!(cleaned.column("date").unwrap(), input.column("date").unwrap());
        assert_eq!(cleaned.column("extra").unwrap(), input.column("extra").unwrap());
        // the input itself still has its gaps
        assert_eq!(input.null_count("text").unwrap(), 1);
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let table = PostTable::from_literal(&["text"], &[vec![Some("x")]]);
        let err   = clean_data(&table).unwrap_err();
        assert!(matches!(err, PipelineError::Schema { ref column } if column == "profileName"));
    }
}
