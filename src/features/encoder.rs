// ============================================================
// Layer 4b — Label Encoder
// ============================================================
// Maps each distinct string of a categorical column to a small
// integer id in [0, number_of_classes).
//
// The classes are the sorted distinct values seen at fit time and
// the id of a value is its position in that sorted list, so the
// mapping is a bijection and inverse_transform restores the
// original labels exactly.
//
// The fitted encoder is a learned artifact: encoding new data must
// reuse it. It is not updated incrementally; a value it has never
// seen is an UnseenCategory error, and the caller must refit.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::data::cleaner::PROFILE_DEFAULT;
use crate::domain::columns;
use crate::domain::error::{PipelineError, PipelineResult};
use crate::domain::table::PostTable;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    /// Column the encoder was fitted on (used in error messages)
    column:  String,
    /// Sorted distinct values; index = encoded id
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Learn the classes of `values`.
    pub fn fit<S: AsRef<str>>(column: impl Into<String>, values: &[S]) -> Self {
        let classes = values
            .iter()
            .map(|v| v.as_ref())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();
        Self { column: column.into(), classes }
    }

    /// Encode values with the fitted classes.
    pub fn transform<S: AsRef<str>>(&self, values: &[S]) -> PipelineResult<Vec<usize>> {
        values
            .iter()
            .map(|v| {
                let v = v.as_ref();
                self.classes
                    .binary_search_by(|c| c.as_str().cmp(v))
                    .map_err(|_| PipelineError::UnseenCategory {
                        column: self.column.clone(),
                        value:  v.to_string(),
                    })
            })
            .collect()
    }

    pub fn fit_transform<S: AsRef<str>>(column: impl Into<String>, values: &[S]) -> (Self, Vec<usize>) {
        let encoder = Self::fit(column, values);
        // every value was just added to the classes, so lookup cannot miss
        let codes = values
            .iter()
            .filter_map(|v| encoder.classes.binary_search_by(|c| c.as_str().cmp(v.as_ref())).ok())
            .collect();
        (encoder, codes)
    }

    /// Map ids back to their original labels.
    pub fn inverse_transform(&self, codes: &[usize]) -> PipelineResult<Vec<&str>> {
        codes
            .iter()
            .map(|&code| {
                self.classes
                    .get(code)
                    .map(String::as_str)
                    .ok_or_else(|| PipelineError::UnseenCategory {
                        column: self.column.clone(),
                        value:  code.to_string(),
                    })
            })
            .collect()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Profile names of a table, ready for encoding.
/// A missing name reads as the cleaner's default ("Unknown"), so an
/// uncleaned table encodes exactly like a cleaned one.
pub fn profile_names(table: &PostTable) -> PipelineResult<Vec<&str>> {
    Ok(table
        .column(columns::PROFILE_NAME)?
        .into_iter()
        .map(|c| c.unwrap_or(PROFILE_DEFAULT))
        .collect())
}

/// Fit an encoder on `profileName` and encode it.
pub fn encode_profiles(table: &PostTable) -> PipelineResult<(LabelEncoder, Vec<usize>)> {
    let names = profile_names(table)?;
    let (encoder, codes) = LabelEncoder::fit_transform(columns::PROFILE_NAME, &names);
    tracing::debug!("Encoded {} distinct profiles", encoder.len());
    Ok((encoder, codes))
}
