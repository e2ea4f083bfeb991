// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the subcommands `run`, `clean` and `plot` and their flags.
//
// clap's derive macros generate the --help text, the errors for
// missing args and the string → number conversions.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use crate::application::pipeline_use_case::PipelineConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load, clean, featurise, train all models and report their scores
    Run(RunArgs),

    /// Only fill missing values and save the cleaned CSV
    Clean(CleanArgs),

    /// Redraw the R² chart from a saved results CSV
    Plot(PlotArgs),
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Posts CSV with text, profileName, likesCount, commentsCount, date
    #[arg(long, default_value = "data/raw/posts.csv")]
    pub input: String,

    /// Numeric column the models predict
    #[arg(long, default_value = "likesCount")]
    pub target_column: String,

    /// Upper bound on TF-IDF vocabulary size
    #[arg(long, default_value_t = 500)]
    pub max_features: usize,

    /// Share of rows held out for testing, strictly between 0 and 1
    #[arg(long, default_value_t = 0.2)]
    pub test_size: f64,

    /// Seeds the split and both tree ensembles
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Trees in the random forest
    #[arg(long, default_value_t = 100)]
    pub n_trees: usize,

    /// Also save the cleaned table here
    #[arg(long)]
    pub processed_out: Option<String>,

    #[arg(long, default_value = "reports/tables/model_results.csv")]
    pub results_out: String,

    #[arg(long, default_value = "reports/figures/model_r2.svg")]
    pub chart_out: String,

    /// Skip drawing the chart
    #[arg(long)]
    pub no_chart: bool,

    /// Save the run config and fitted vectorizer/encoder as JSON here
    #[arg(long)]
    pub artifacts_dir: Option<String>,
}

/// The application layer never sees clap types.
impl From<RunArgs> for PipelineConfig {
    fn from(a: RunArgs) -> Self {
        PipelineConfig {
            input:         a.input,
            target_column: a.target_column,
            max_features:  a.max_features,
            test_fraction: a.test_size,
            seed:          a.seed,
            n_trees:       a.n_trees,
            processed_out: a.processed_out,
            results_out:   Some(a.results_out),
            chart_out:     if a.no_chart { None } else { Some(a.chart_out) },
            artifacts_dir: a.artifacts_dir,
        }
    }
}

#[derive(Args, Debug)]
pub struct CleanArgs {
    #[arg(long, default_value = "data/raw/posts.csv")]
    pub input: String,

    #[arg(long, default_value = "data/processed/posts_clean.csv")]
    pub output: String,
}

#[derive(Args, Debug)]
pub struct PlotArgs {
    /// Results CSV written by `run`
    #[arg(long, default_value = "reports/tables/model_results.csv")]
    pub results: String,

    #[arg(long, default_value = "reports/figures/model_r2.svg")]
    pub output: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    fn run_args(argv: &[&str]) -> RunArgs {
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Commands::Run(args) => args,
            other => panic!("expected run, got {other:?}"),
        }
    }

    #[test]
    fn test_run_defaults_match_pipeline_defaults() {
        let cfg: PipelineConfig = run_args(&["engagement-pipeline", "run"]).into();
        assert_eq!(cfg, PipelineConfig::default());
    }

    #[test]
    fn test_run_flags() {
        let cfg: PipelineConfig = run_args(&[
            "engagement-pipeline", "run",
            "--input", "posts.csv",
            "--target-column", "commentsCount",
            "--test-size", "0.3",
            "--seed", "7",
            "--no-chart",
        ])
        .into();
        assert_eq!(cfg.input, "posts.csv");
        assert_eq!(cfg.target_column, "commentsCount");
        assert_eq!(cfg.test_fraction, 0.3);
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.chart_out, None);
    }
}
