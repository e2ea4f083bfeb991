// ============================================================
// Layer 5 — Train / Evaluate Loop
// ============================================================
// Given a feature matrix and label vector:
//
//   1. split rows into train/test with the seeded splitter
//   2. for each estimator in order: fit on train, predict test
//   3. score MAE / RMSE / R² and print them as soon as they exist
//
// There is no partial-failure mode: the first model that fails to
// fit aborts the run with its TrainingError.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use crate::data::splitter::split_indices;
use crate::domain::error::{PipelineError, PipelineResult};
use crate::domain::report::EvaluationReport;
use crate::domain::traits::Regressor;
use crate::ml::estimator::Estimator;
use crate::ml::forest::DEFAULT_TREES;
use crate::ml::metrics::score;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    /// Share of rows held out for scoring
    pub test_fraction: f64,
    /// Seeds both the split and the ensembles
    pub seed:          u64,
    /// Trees in the random forest
    pub n_trees:       usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self { test_fraction: 0.2, seed: 42, n_trees: DEFAULT_TREES }
    }
}

/// Split, fit the default model suite and score it.
pub fn train_and_evaluate(
    features: &Array2<f64>,
    target:   &Array1<f64>,
    cfg:      &TrainConfig,
) -> PipelineResult<EvaluationReport> {
    if features.nrows() != target.len() {
        return Err(PipelineError::training(
            "train/test split",
            format!("{} feature rows but {} labels", features.nrows(), target.len()),
        ));
    }

    let split   = split_indices(features.nrows(), cfg.test_fraction, cfg.seed)?;
    let x_train = features.select(Axis(0), &split.train);
    let y_train = target.select(Axis(0), &split.train);
    let x_test  = features.select(Axis(0), &split.test);
    let y_test  = target.select(Axis(0), &split.test);

    tracing::info!(
        "Training on {} rows, testing on {} rows ({} features)",
        x_train.nrows(),
        x_test.nrows(),
        features.ncols(),
    );

    evaluate_models(
        Estimator::default_suite(cfg.seed, cfg.n_trees),
        x_train.view(),
        y_train.view(),
        x_test.view(),
        y_test.view(),
    )
}

/// Fit and score each model in order on an existing split.
pub fn evaluate_models<R: Regressor>(
    models:  impl IntoIterator<Item = R>,
    x_train: ArrayView2<'_, f64>,
    y_train: ArrayView1<'_, f64>,
    x_test:  ArrayView2<'_, f64>,
    y_test:  ArrayView1<'_, f64>,
) -> PipelineResult<EvaluationReport> {
    let mut report = EvaluationReport::new();

    for mut model in models {
        let name = model.name();
        tracing::info!("Fitting {}", name);

        model.fit(x_train, y_train)?;
        let pred   = model.predict(x_test)?;
        let scores = score(y_test, pred.view());

        println!("\n{name} Results:");
        println!("MAE: {:.4}", scores.mae);
        println!("RMSE: {:.4}", scores.rmse);
        println!("R2: {:.4}", scores.r2);

        report.insert(name, scores);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::linear::LinearRegression;

    fn data(n: usize) -> (Array2<f64>, Array1<f64>) {
        let x = Array2::from_shape_fn((n, 3), |(i, j)| ((i * 7 + j * 13) % 11) as f64);
        let y = x.map_axis(Axis(1), |r| 3.0 * r[0] - r[1] + 0.5 * r[2] + 2.0);
        (x, y)
    }

    fn small_cfg() -> TrainConfig {
        TrainConfig { n_trees: 10, ..TrainConfig::default() }
    }

    #[test]
    fn test_report_has_all_models_in_order() {
        let (x, y) = data(40);
        let report = train_and_evaluate(&x, &y, &small_cfg()).unwrap();
        assert_eq!(report.model_names(), vec!["Linear Regression", "Random Forest", "Gradient Boosting"]);
    }

    #[test]
    fn test_linear_target_is_fitted_exactly() {
        let (x, y) = data(40);
        let report = train_and_evaluate(&x, &y, &small_cfg()).unwrap();
        let linear = report.get("Linear Regression").unwrap();
        assert!(linear.r2 > 0.999_999);
        assert!(linear.mae < 1e-6);
    }

    #[test]
    fn test_same_seed_same_scores() {
        let (x, y) = data(30);
        let a = train_and_evaluate(&x, &y, &small_cfg()).unwrap();
        let b = train_and_evaluate(&x, &y, &small_cfg()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_nan_in_features_aborts_with_first_model() {
        let (mut x, y) = data(20);
        x[[0, 0]] = f64::NAN;
        let mut cfg = small_cfg();
        // make sure row 0 lands in the training set regardless of seed
        cfg.test_fraction = 0.05;
        let split = split_indices(20, cfg.test_fraction, cfg.seed).unwrap();
        if split.test.contains(&0) {
            x[[1, 0]] = f64::NAN;
        }
        let err = train_and_evaluate(&x, &y, &cfg).unwrap_err();
        assert!(matches!(err, PipelineError::Training { ref model, .. } if model == "Linear Regression"));
    }

    #[test]
    fn test_evaluate_single_model_on_identical_rows() {
        let (x, y) = data(20);
        let report = evaluate_models(
            [LinearRegression::new()],
            x.view(), y.view(), x.view(), y.view(),
        )
        .unwrap();
        assert!((report.get("Linear Regression").unwrap().r2 - 1.0).abs() < 1e-9);
    }
}
