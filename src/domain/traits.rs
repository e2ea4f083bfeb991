// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer programs against these traits, not against
// concrete loaders or models:
//   - CsvLoader implements RecordSource
//   - LinearRegression, RandomForest, GradientBoosting and the
//     Estimator enum that groups them implement Regressor

use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::domain::error::PipelineResult;
use crate::domain::table::PostTable;

// ─── RecordSource ─────────────────────────────────────────────────────────────
/// Any component that can produce the full record table.
pub trait RecordSource {
    /// Load every record, preserving column names and row order.
    fn load(&self) -> PipelineResult<PostTable>;
}

// ─── Regressor ────────────────────────────────────────────────────────────────
/// A model that learns a numeric target from a dense feature matrix.
///
/// Rows of `features` are samples and line up with `target`.
/// `fit` replaces any previous fit; `predict` before `fit` is a
/// TrainingError.
pub trait Regressor {
    /// Display name used in reports ("Linear Regression", ...)
    fn name(&self) -> &'static str;

    fn fit(&mut self, features: ArrayView2<'_, f64>, target: ArrayView1<'_, f64>) -> PipelineResult<()>;

    fn predict(&self, features: ArrayView2<'_, f64>) -> PipelineResult<Array1<f64>>;
}
