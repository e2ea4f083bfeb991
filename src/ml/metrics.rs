// ============================================================
// Layer 5 — Regression Metrics
// ============================================================
//   MAE  = mean |y - ŷ|
//   RMSE = sqrt(mean (y - ŷ)²)
//   R²   = 1 - SS_res / SS_tot
//
// When the true values are constant (SS_tot = 0) R² is 1.0 for a
// perfect prediction and 0.0 otherwise, instead of dividing by zero.

use ndarray::ArrayView1;

use crate::domain::report::ModelScores;

pub fn mean_absolute_error(truth: ArrayView1<'_, f64>, pred: ArrayView1<'_, f64>) -> f64 {
    if truth.is_empty() {
        return f64::NAN;
    }
    truth.iter().zip(pred.iter()).map(|(t, p)| (t - p).abs()).sum::<f64>() / truth.len() as f64
}

pub fn root_mean_squared_error(truth: ArrayView1<'_, f64>, pred: ArrayView1<'_, f64>) -> f64 {
    if truth.is_empty() {
        return f64::NAN;
    }
    let mse = truth.iter().zip(pred.iter()).map(|(t, p)| (t - p).powi(2)).sum::<f64>()
        / truth.len() as f64;
    mse.sqrt()
}

pub fn r2_score(truth: ArrayView1<'_, f64>, pred: ArrayView1<'_, f64>) -> f64 {
    if truth.is_empty() {
        return f64::NAN;
    }
    let mean   = truth.sum() / truth.len() as f64;
    let ss_res = truth.iter().zip(pred.iter()).map(|(t, p)| (t - p).powi(2)).sum::<f64>();
    let ss_tot = truth.iter().map(|t| (t - mean).powi(2)).sum::<f64>();

    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - ss_res / ss_tot
}

/// All three scores at once.
pub fn score(truth: ArrayView1<'_, f64>, pred: ArrayView1<'_, f64>) -> ModelScores {
    ModelScores {
        mae:  mean_absolute_error(truth, pred),
        rmse: root_mean_squared_error(truth, pred),
        r2:   r2_score(truth, pred),
    }
}
