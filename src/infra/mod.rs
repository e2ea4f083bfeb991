// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Output side of a run. None of this affects the scores; it only
// records them:
//
//   results.rs   — model results table
//                  Writes the EvaluationReport as a CSV with one
//                  row per model (model, MAE, RMSE, R2) and can
//                  read it back.
//
//   chart.rs     — R² bar chart
//                  Renders the R² of every model as an SVG bar
//                  chart with plotters.
//
//   artifacts.rs — run artifacts
//                  Saves the PipelineConfig and the fitted
//                  vectorizer/encoder as JSON so new posts can be
//                  encoded without refitting.
//
// Reference: Rust Book §7 (Modules)

/// Results CSV save/load
pub mod results;

/// R² comparison chart
pub mod chart;

/// Config and fitted-transform persistence
pub mod artifacts;
