// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction, parsed with `clap`.
// All work is delegated to Layer 2 (application) or, for `plot`,
// straight to the infra layer.
//
//   1. `run`   — full pipeline, prints per-model scores
//   2. `clean` — fill missing values and save the table
//   3. `plot`  — redraw the R² chart from a results CSV
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{CleanArgs, Commands, PlotArgs, RunArgs};

#[derive(Parser, Debug)]
#[command(
    name = "engagement-pipeline",
    version,
    about = "Predict social media post engagement and compare regression models."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Dispatch to the matching use case. Only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Run(args)   => run_pipeline(args),
            Commands::Clean(args) => run_clean(args),
            Commands::Plot(args)  => run_plot(args),
        }
    }
}

fn run_pipeline(args: RunArgs) -> Result<()> {
    use crate::application::pipeline_use_case::PipelineUseCase;

    tracing::info!("Starting pipeline on '{}'", args.input);

    let use_case = PipelineUseCase::new(args.into());
    let report   = use_case.execute()?;

    let best = report
        .iter()
        .filter(|e| e.scores.r2.is_finite())
        .max_by(|a, b| a.scores.r2.total_cmp(&b.scores.r2));
    if let Some(best) = best {
        println!("\nBest model by R²: {} ({:.4})", best.model, best.scores.r2);
    }
    Ok(())
}

fn run_clean(args: CleanArgs) -> Result<()> {
    use crate::application::clean_use_case::CleanUseCase;

    let cleaned = CleanUseCase::new(args.input, args.output).execute()?;
    tracing::info!("Cleaned {} rows", cleaned.n_rows());
    Ok(())
}

fn run_plot(args: PlotArgs) -> Result<()> {
    use crate::infra::{chart::plot_results, results::load_results};

    let report = load_results(&args.results)
        .with_context(|| format!("Cannot read results from '{}'. Have you run 'run' first?", args.results))?;
    plot_results(&report, &args.output)?;
    Ok(())
}
