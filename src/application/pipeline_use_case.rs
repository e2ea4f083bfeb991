// ============================================================
// Layer 2 — PipelineUseCase
// ============================================================
// Runs every stage of the engagement pipeline in order:
//
//   Step 1: Load the posts CSV            (Layer 4 - data)
//   Step 2: Fill missing values           (Layer 4 - data)
//   Step 3: Save the cleaned table        (Layer 4 - data, optional)
//   Step 4: Build the feature matrix      (Layer 4b - features)
//   Step 5: Split, fit and score models   (Layer 5 - ml)
//   Step 6: Save the results table        (Layer 6 - infra, optional)
//   Step 7: Draw the R² chart             (Layer 6 - infra, optional)
//   Step 8: Save config + fitted features (Layer 6 - infra, optional)
//
// The first failing stage aborts the run; nothing after it is
// written.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::{cleaner::Cleaner, loader::CsvLoader, writer::save_table};
use crate::domain::columns;
use crate::domain::report::EvaluationReport;
use crate::domain::traits::RecordSource;
use crate::features::matrix::{FeatureBuilder, FeatureConfig};
use crate::features::tfidf::DEFAULT_MAX_FEATURES;
use crate::infra::{artifacts::ArtifactStore, chart::plot_results, results::save_results};
use crate::ml::forest::DEFAULT_TREES;
use crate::ml::trainer::{train_and_evaluate, TrainConfig};

// ─── Pipeline Configuration ──────────────────────────────────────────────────
// Everything one run needs. Serialisable so the artifact store can
// keep it next to the fitted transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub input:         String,
    pub target_column: String,
    pub max_features:  usize,
    pub test_fraction: f64,
    pub seed:          u64,
    pub n_trees:       usize,
    /// Where to write the cleaned table, if anywhere
    pub processed_out: Option<String>,
    pub results_out:   Option<String>,
    pub chart_out:     Option<String>,
    pub artifacts_dir: Option<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input:         "data/raw/posts.csv".to_string(),
            target_column: columns::LIKES_COUNT.to_string(),
            max_features:  DEFAULT_MAX_FEATURES,
            test_fraction: 0.2,
            seed:          42,
            n_trees:       DEFAULT_TREES,
            processed_out: None,
            results_out:   Some("reports/tables/model_results.csv".to_string()),
            chart_out:     Some("reports/figures/model_r2.svg".to_string()),
            artifacts_dir: None,
        }
    }
}

impl PipelineConfig {
    pub fn feature_config(&self) -> FeatureConfig {
        FeatureConfig {
            target_column: self.target_column.clone(),
            max_features:  self.max_features,
        }
    }

    pub fn train_config(&self) -> TrainConfig {
        TrainConfig {
            test_fraction: self.test_fraction,
            seed:          self.seed,
            n_trees:       self.n_trees,
        }
    }
}

// ─── PipelineUseCase ─────────────────────────────────────────────────────────
pub struct PipelineUseCase {
    config: PipelineConfig,
}

impl PipelineUseCase {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the pipeline on the configured input CSV.
    pub fn execute(&self) -> Result<EvaluationReport> {
        let loader = CsvLoader::new(&self.config.input);
        self.execute_with(&loader)
    }

    /// Run the pipeline on records from any source.
    pub fn execute_with(&self, source: &dyn RecordSource) -> Result<EvaluationReport> {
        let cfg = &self.config;

        // ── Step 1: Load ─────────────────────────────────────────────────────
        let raw = source.load().context("Loading posts failed")?;

        // ── Step 2: Clean ────────────────────────────────────────────────────
        let cleaned = Cleaner::new().clean(&raw).context("Cleaning posts failed")?;
        tracing::info!("Cleaned {} rows", cleaned.n_rows());

        // ── Step 3: Save processed table ─────────────────────────────────────
        if let Some(path) = &cfg.processed_out {
            save_table(&cleaned, path).context("Saving the processed table failed")?;
        }

        // ── Step 4: Features ─────────────────────────────────────────────────
        let features = FeatureBuilder::new(cfg.feature_config())
            .build(&cleaned)
            .context("Building features failed")?;

        // ── Step 5: Train and evaluate ───────────────────────────────────────
        let report = train_and_evaluate(&features.matrix, &features.target, &cfg.train_config())
            .context("Training failed")?;

        // ── Step 6-8: Outputs ────────────────────────────────────────────────
        if let Some(path) = &cfg.results_out {
            save_results(&report, path).context("Saving model results failed")?;
        }
        if let Some(path) = &cfg.chart_out {
            plot_results(&report, path).context("Drawing the R² chart failed")?;
        }
        if let Some(dir) = &cfg.artifacts_dir {
            let store = ArtifactStore::new(dir);
            store.save_config(cfg).context("Saving the pipeline config failed")?;
            store.save_transform(&features.transform).context("Saving the fitted transform failed")?;
            tracing::info!("Artifacts saved to '{}'", store.dir().display());
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::{PipelineError, PipelineResult};
    use crate::domain::table::PostTable;

    struct InMemory(PostTable);

    impl RecordSource for InMemory {
        fn load(&self) -> PipelineResult<PostTable> {
            Ok(self.0.clone())
        }
    }

    fn posts(n: usize) -> PostTable {
        let words = ["coffee", "sunset", "launch", "puppy", "recipe", "travel"];
        let rows: Vec<Vec<Option<String>>> = (0..n)
            .map(|i| {
                vec![
                    Some(format!("{} {} post", words[i % 6], words[(i + 2) % 6])),
                    Some(format!("user{}", i % 3)),
                    if i == 3 { None } else { Some(((i * 5) % 17).to_string()) },
                    Some((i % 4).to_string()),
                    Some(format!("2024-02-{:02}", i % 28 + 1)),
                ]
            })
            .collect();
        let rows: Vec<Vec<Option<&str>>> =
            rows.iter().map(|r| r.iter().map(|c| c.as_deref()).collect()).collect();
        PostTable::from_literal(&columns::REQUIRED, &rows)
    }

    fn quiet_config(n_trees: usize) -> PipelineConfig {
        PipelineConfig {
            n_trees,
            results_out: None,
            chart_out: None,
            ..PipelineConfig::default()
        }
    }

    #[test]
    fn test_defaults() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.target_column, "likesCount");
        assert_eq!(cfg.max_features, 500);
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.train_config(), TrainConfig::default());
    }

    #[test]
    fn test_runs_all_three_models() {
        let report = PipelineUseCase::new(quiet_config(5))
            .execute_with(&InMemory(posts(20)))
            .unwrap();
        assert_eq!(report.len(), 3);
    }

    #[test]
    fn test_writes_requested_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let out = |name: &str| Some(dir.path().join(name).to_string_lossy().into_owned());

        let cfg = PipelineConfig {
            processed_out: out("processed/posts.csv"),
            results_out:   out("tables/results.csv"),
            chart_out:     out("figures/r2.svg"),
            artifacts_dir: out("artifacts"),
            ..quiet_config(5)
        };
        PipelineUseCase::new(cfg).execute_with(&InMemory(posts(15))).unwrap();

        for file in ["processed/posts.csv", "tables/results.csv", "figures/r2.svg",
                     "artifacts/pipeline_config.json", "artifacts/fitted_transform.json"] {
            assert!(dir.path().join(file).exists(), "{file} missing");
        }
    }

    #[test]
    fn test_bad_target_keeps_typed_error() {
        let cfg = PipelineConfig { target_column: "likeCount".into(), ..quiet_config(5) };
        let err = PipelineUseCase::new(cfg).execute_with(&InMemory(posts(10))).unwrap_err();
        assert!(matches!(err.downcast_ref::<PipelineError>(), Some(PipelineError::Schema { .. })));
    }

    #[test]
    fn test_missing_input_file_is_data_access_error() {
        let cfg = PipelineConfig { input: "no/such/posts.csv".into(), ..quiet_config(5) };
        let err = PipelineUseCase::new(cfg).execute().unwrap_err();
        assert!(matches!(err.downcast_ref::<PipelineError>(), Some(PipelineError::DataAccess { .. })));
    }
}
