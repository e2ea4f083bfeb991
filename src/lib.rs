//! Social media engagement pipeline.
//!
//! Loads a CSV of posts, cleans it, turns text, profile and date into
//! a numeric feature matrix (TF-IDF + calendar fields + label-encoded
//! profile), then trains and compares linear regression, random forest
//! and gradient boosting on a seeded train/test split.
//!
//! ```no_run
//! use engagement_pipeline::application::pipeline_use_case::{PipelineConfig, PipelineUseCase};
//!
//! let report = PipelineUseCase::new(PipelineConfig::default()).execute()?;
//! for entry in report.iter() {
//!     println!("{}: R² = {:.3}", entry.model, entry.scores.r2);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod application;
pub mod domain;
pub mod data;
pub mod features;
pub mod ml;
pub mod infra;
