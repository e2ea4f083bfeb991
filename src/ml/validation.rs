// Input checks shared by every estimator: non-empty, shapes agree,
// every value finite. Failures are TrainingErrors naming the model.

use ndarray::{ArrayView1, ArrayView2};

use crate::domain::error::{PipelineError, PipelineResult};

pub(crate) fn check_training_data(
    model:    &str,
    features: ArrayView2<'_, f64>,
    target:   ArrayView1<'_, f64>,
) -> PipelineResult<()> {
    if features.nrows() == 0 {
        return Err(PipelineError::training(model, "no training rows"));
    }
    if features.nrows() != target.len() {
        return Err(PipelineError::training(
            model,
            format!("{} feature rows but {} labels", features.nrows(), target.len()),
        ));
    }
    check_features(model, features)?;
    if let Some(i) = target.iter().position(|v| !v.is_finite()) {
        return Err(PipelineError::training(
            model,
            format!("label at row {i} is NaN or infinite"),
        ));
    }
    Ok(())
}

pub(crate) fn check_features(model: &str, features: ArrayView2<'_, f64>) -> PipelineResult<()> {
    for ((i, j), v) in features.indexed_iter() {
        if !v.is_finite() {
            return Err(PipelineError::training(
                model,
                format!("feature at row {i}, column {j} is NaN or infinite"),
            ));
        }
    }
    Ok(())
}

pub(crate) fn check_width(model: &str, expected: usize, features: ArrayView2<'_, f64>) -> PipelineResult<()> {
    if features.ncols() != expected {
        return Err(PipelineError::training(
            model,
            format!("fitted on {expected} features, got {}", features.ncols()),
        ));
    }
    Ok(())
}
