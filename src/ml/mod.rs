// ============================================================
// Layer 5 — ML / Model Layer
// ============================================================
// All model fitting lives here. Other layers only see the
// Regressor trait, ndarray matrices and EvaluationReport.
//
//   linear.rs     — ordinary least squares (minimum-norm)
//   tree.rs       — CART regression tree, shared by the ensembles
//   forest.rs     — bagged trees (random forest)
//   boosting.rs   — gradient-boosted shallow trees
//   estimator.rs  — the three models as one enum
//   metrics.rs    — MAE / RMSE / R²
//   trainer.rs    — split, fit, score, report
//
// Reference: Breiman (2001) Random Forests
//            Friedman (2001) Greedy Function Approximation

pub mod linear;

pub mod tree;

pub mod forest;

pub mod boosting;

/// Ordered set of model variants implementing Regressor
pub mod estimator;

pub mod metrics;

/// Train/evaluate loop over the model suite
pub mod trainer;

mod validation;
