// ============================================================
// Layer 4b — Feature Matrix Assembly
// ============================================================
// Combines the text block and the metadata block into one dense
// matrix, row-aligned with the source table:
//
//   [ tf-idf term weights (≤ max_features cols) | commentsCount,
//     year, month, day, weekday, profile_encoded ]
//
// and extracts the target column as the label vector.
//
// The fitted vectorizer and encoder travel with the matrix inside
// FeatureSet (as a FittedTransform), so new data is always encoded
// with the same vocabulary and profile ids instead of a refit.
//
// Undefined calendar fields and unparsable numbers are stored as NaN;
// the estimators reject them at fit time.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::domain::columns;
use crate::domain::error::PipelineResult;
use crate::domain::table::PostTable;
use crate::features::calendar::CalendarFeatures;
use crate::features::encoder::{profile_names, LabelEncoder};
use crate::features::tfidf::{TermMatrix, TfidfVectorizer, DEFAULT_MAX_FEATURES};

/// Names of the dense metadata columns, in matrix order.
pub const METADATA_COLUMNS: [&str; 6] =
    ["commentsCount", "year", "month", "day", "weekday", "profile_encoded"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureConfig {
    /// Column predicted by the models
    pub target_column: String,
    /// Vocabulary cap for the text block
    pub max_features:  usize,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            target_column: columns::LIKES_COUNT.to_string(),
            max_features:  DEFAULT_MAX_FEATURES,
        }
    }
}

/// Fitted artifacts needed to turn a table into features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedTransform {
    pub target_column: String,
    pub vectorizer:    TfidfVectorizer,
    pub encoder:       LabelEncoder,
}

impl FittedTransform {
    /// Feature matrix for `table` using the fitted vocabulary and
    /// profile ids. A profile the encoder never saw is an
    /// UnseenCategory error.
    pub fn transform(&self, table: &PostTable) -> PipelineResult<Array2<f64>> {
        self.assemble(table).map(|(matrix, _)| matrix)
    }

    /// Label vector for `table`; missing or non-numeric cells are NaN.
    pub fn target(&self, table: &PostTable) -> PipelineResult<Array1<f64>> {
        Ok(Array1::from(table.numeric_column(&self.target_column)?))
    }

    /// Vocabulary terms followed by the metadata column names.
    pub fn feature_names(&self) -> Vec<String> {
        self.vectorizer
            .vocabulary()
            .iter()
            .cloned()
            .chain(METADATA_COLUMNS.iter().map(|c| c.to_string()))
            .collect()
    }

    fn assemble(&self, table: &PostTable) -> PipelineResult<(Array2<f64>, usize)> {
        // schema first, so a missing column is reported before any work
        for column in [columns::COMMENTS_COUNT, columns::DATE, columns::PROFILE_NAME, columns::TEXT] {
            table.column_index(column)?;
        }

        let comments = table.numeric_column(columns::COMMENTS_COUNT)?;
        let calendar = CalendarFeatures::extract(table, columns::DATE)?;
        let profiles = self.encoder.transform(&profile_names(table)?)?;
        let text     = self.vectorizer.transform(&table.text_column(columns::TEXT)?);

        let [year, month, day, weekday] = calendar.to_columns();
        let profiles: Vec<f64> = profiles.into_iter().map(|p| p as f64).collect();
        let metadata = [comments, year, month, day, weekday, profiles];

        Ok((hstack(&text, &metadata), calendar.unparsed()))
    }
}

/// Column-wise concatenation of the sparse text block and the dense
/// metadata columns. Row i of the result comes from row i of both.
fn hstack(text: &TermMatrix, metadata: &[Vec<f64>]) -> Array2<f64> {
    let n_rows = text.n_rows();
    let offset = text.n_cols();
    let mut out = Array2::zeros((n_rows, offset + metadata.len()));

    for i in 0..n_rows {
        for (j, w) in text.row(i) {
            out[[i, j]] = w;
        }
        for (k, column) in metadata.iter().enumerate() {
            out[[i, offset + k]] = column[i];
        }
    }
    out
}

/// Everything the trainer needs, plus what is needed to reproduce it.
#[derive(Debug, Clone)]
pub struct FeatureSet {
    pub matrix:         Array2<f64>,
    pub target:         Array1<f64>,
    pub feature_names:  Vec<String>,
    pub transform:      FittedTransform,
    /// Rows whose date could not be parsed
    pub unparsed_dates: usize,
}

impl FeatureSet {
    pub fn n_rows(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.matrix.ncols()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.transform.vectorizer.vocabulary().len()
    }
}

pub struct FeatureBuilder {
    config: FeatureConfig,
}

impl FeatureBuilder {
    pub fn new(config: FeatureConfig) -> Self {
        Self { config }
    }

    /// Fit the encoder and vectorizer on `table` and build its features.
    ///
    /// Errors: SchemaError for a missing target or metadata column,
    /// EmptyVocabulary when the text column has no usable terms.
    pub fn build(&self, table: &PostTable) -> PipelineResult<FeatureSet> {
        let cfg = &self.config;

        table.column_index(&cfg.target_column)?;
        for column in [columns::COMMENTS_COUNT, columns::DATE, columns::PROFILE_NAME, columns::TEXT] {
            table.column_index(column)?;
        }

        let encoder    = LabelEncoder::fit(columns::PROFILE_NAME, &profile_names(table)?);
        let vectorizer = TfidfVectorizer::fit(&table.text_column(columns::TEXT)?, cfg.max_features)?;

        let transform = FittedTransform {
            target_column: cfg.target_column.clone(),
            vectorizer,
            encoder,
        };

        let (matrix, unparsed_dates) = transform.assemble(table)?;
        let target        = transform.target(table)?;
        let feature_names = transform.feature_names();

        tracing::info!(
            "Built feature matrix: {} rows × {} columns ({} terms + {} metadata)",
            matrix.nrows(),
            matrix.ncols(),
            transform.vectorizer.vocabulary().len(),
            METADATA_COLUMNS.len(),
        );

        Ok(FeatureSet { matrix, target, feature_names, transform, unparsed_dates })
    }
}

/// Shorthand for `FeatureBuilder::new(..).build(table)`.
pub fn build_feature_matrix(
    table:         &PostTable,
    target_column: &str,
    max_features:  usize,
) -> PipelineResult<FeatureSet> {
    FeatureBuilder::new(FeatureConfig {
        target_column: target_column.to_string(),
        max_features,
    })
    .build(table)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::PipelineError;

    const HEADERS: [&str; 5] = ["text", "profileName", "likesCount", "commentsCount", "date"];

    fn table() -> PostTable {
        PostTable::from_literal(
            &HEADERS,
            &[
                vec![Some("sunny beach day"), Some("alice"), Some("10"), Some("1"), Some("2024-03-04")],
                vec![Some("rainy city night"), Some("bob"), Some("3"), Some("0"), Some("bad date")],
                vec![Some("beach again"), Some("alice"), Some("7"), Some("2"), Some("2024-03-10")],
            ],
        )
    }

    #[test]
    fn test_shape_and_names() {
        let fs = build_feature_matrix(&table(), "likesCount", 500).unwrap();
        assert_eq!(fs.n_rows(), 3);
        assert_eq!(fs.n_features(), fs.vocabulary_size() + 6);
        assert_eq!(fs.feature_names.len(), fs.n_features());
        assert_eq!(&fs.feature_names[fs.n_features() - 6..], &METADATA_COLUMNS.map(String::from));
        assert_eq!(fs.target.to_vec(), vec![10.0, 3.0, 7.0]);
    }

    #[test]
    fn test_metadata_block_is_row_aligned() {
        let fs  = build_feature_matrix(&table(), "likesCount", 500).unwrap();
        let off = fs.vocabulary_size();
        let m   = &fs.matrix;

        // row 0: comments 1, 2024-03-04 (Monday), alice = 0
        assert_eq!(m[[0, off]], 1.0);
        assert_eq!(m[[0, off + 1]], 2024.0);
        assert_eq!(m[[0, off + 4]], 0.0);
        assert_eq!(m[[0, off + 5]], 0.0);
        // row 1: unparsable date → all four calendar fields NaN
        assert!((1..=4).all(|k| m[[1, off + k]].is_nan()));
        assert_eq!(m[[1, off + 5]], 1.0);
        // row 2: Sunday
        assert_eq!(m[[2, off + 4]], 6.0);
        assert_eq!(fs.unparsed_dates, 1);
    }

    #[test]
    fn test_vocabulary_cap_binds() {
        let fs = build_feature_matrix(&table(), "likesCount", 2).unwrap();
        assert_eq!(fs.n_features(), 2 + 6);
    }

    #[test]
    fn test_misspelled_target_is_schema_error() {
        let err = build_feature_matrix(&table(), "likeCount", 500).unwrap_err();
        assert!(matches!(err, PipelineError::Schema { ref column } if column == "likeCount"));
    }

    #[test]
    fn test_missing_metadata_column_is_schema_error() {
        let t = PostTable::from_literal(
            &["text", "profileName", "likesCount", "date"],
            &[vec![Some("words here"), Some("a"), Some("1"), Some("2024-01-01")]],
        );
        let err = build_feature_matrix(&t, "likesCount", 500).unwrap_err();
        assert!(matches!(err, PipelineError::Schema { ref column } if column == "commentsCount"));
    }

    #[test]
    fn test_stop_word_only_text_is_empty_vocabulary() {
        let t = PostTable::from_literal(
            &HEADERS,
            &[vec![Some("the and"), Some("a"), Some("1"), Some("0"), Some("2024-01-01")]],
        );
        let err = build_feature_matrix(&t, "likesCount", 500).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyVocabulary));
    }

    #[test]
    fn test_fitted_transform_reproduces_matrix() {
        let t  = table();
        let fs = build_feature_matrix(&t, "likesCount", 500).unwrap();
        let again = fs.transform.transform(&t).unwrap();
        // NaN != NaN, so compare bit patterns
        let bits = |a: &Array2<f64>| a.iter().map(|v| v.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&again), bits(&fs.matrix));
    }

    #[test]
    fn test_fitted_transform_rejects_unseen_profile() {
        let fs = build_feature_matrix(&table(), "likesCount", 500).unwrap();
        let new = PostTable::from_literal(
            &HEADERS,
            &[vec![Some("beach"), Some("mallory"), Some("1"), Some("0"), Some("2024-01-01")]],
        );
        let err = fs.transform.transform(&new).unwrap_err();
        assert!(matches!(err, PipelineError::UnseenCategory { .. }));
    }
}
