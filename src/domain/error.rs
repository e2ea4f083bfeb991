// ============================================================
// Layer 3 — Pipeline Errors
// ============================================================
// Every stage returns PipelineError on failure. Nothing is caught or
// retried internally: an error aborts the run and carries enough
// context (path, column or model name) to diagnose it.
//
// The application and CLI layers wrap these in anyhow::Error, so
// callers there can still recover the typed value with
// `err.downcast_ref::<PipelineError>()`.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used by the library stages.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input path is missing, unreadable or not tabular data.
    #[error("cannot read data from '{path}': {reason}")]
    DataAccess { path: PathBuf, reason: String },

    /// A required column is absent from the table.
    #[error("missing expected column '{column}'")]
    Schema { column: String },

    /// Encoding was asked for a category the encoder never saw.
    #[error("value '{value}' in column '{column}' was not seen when the encoder was fitted")]
    UnseenCategory { column: String, value: String },

    /// No vocabulary term survived tokenisation and stop-word removal.
    #[error("empty vocabulary: the text column contains no terms after stop-word removal")]
    EmptyVocabulary,

    /// An estimator could not be fitted (or used before fitting).
    #[error("{model} failed: {reason}")]
    Training { model: String, reason: String },

    /// The train/test split would leave one partition empty.
    #[error("cannot split {rows} rows with test fraction {test_fraction}")]
    InvalidSplit { rows: usize, test_fraction: f64 },

    /// Writing a results table, chart or artifact failed.
    #[error("cannot write '{path}': {reason}")]
    Output { path: PathBuf, reason: String },
}

impl PipelineError {
    pub fn schema(column: impl Into<String>) -> Self {
        Self::Schema { column: column.into() }
    }

    pub fn training(model: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Training { model: model.into(), reason: reason.into() }
    }

    pub fn data_access(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::DataAccess { path: path.into(), reason: reason.to_string() }
    }

    pub fn output(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Output { path: path.into(), reason: reason.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_message_names_column() {
        let err = PipelineError::schema("likesCont");
        assert_eq!(err.to_string(), "missing expected column 'likesCont'");
    }

    #[test]
    fn test_training_message_names_model() {
        let err = PipelineError::training("Random Forest", "labels contain NaN");
        assert!(err.to_string().starts_with("Random Forest failed"));
    }
}
