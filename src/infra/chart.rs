// ============================================================
// Layer 6 — R² Comparison Chart
// ============================================================
// Draws one bar per model (in report order) with its R² score and
// writes it as an SVG image via plotters. The y axis always covers
// 0..1 and stretches further if a score falls outside that range.

use std::path::Path;

use plotters::prelude::*;

use crate::data::writer::create_parent_dirs;
use crate::domain::error::{PipelineError, PipelineResult};
use crate::domain::report::EvaluationReport;

const SIZE: (u32, u32) = (800, 500);

pub fn plot_results(report: &EvaluationReport, path: impl AsRef<Path>) -> PipelineResult<()> {
    let path = path.as_ref();
    if report.is_empty() {
        return Err(PipelineError::output(path, "no model results to plot"));
    }
    create_parent_dirs(path)?;

    let fail  = |e: &dyn std::fmt::Display| PipelineError::output(path, e.to_string());
    let names: Vec<String> = report.model_names().into_iter().map(str::to_string).collect();
    let r2: Vec<f64> = report.iter().map(|e| e.scores.r2).filter(|v| v.is_finite()).collect();
    let y_lo = r2.iter().cloned().fold(0.0, f64::min);
    let y_hi = r2.iter().cloned().fold(1.0, f64::max);
    let pad  = (y_hi - y_lo) * 0.05;

    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(|e| fail(&e))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Model Comparison (R²)", ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((0..names.len()).into_segmented(), (y_lo - pad)..(y_hi + pad))
        .map_err(|e| fail(&e))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Model")
        .y_desc("R² Score")
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) => names.get(*i).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .draw()
        .map_err(|e| fail(&e))?;

    chart
        .draw_series(report.iter().enumerate().map(|(i, entry)| {
            let score = if entry.scores.r2.is_finite() { entry.scores.r2 } else { 0.0 };
            let mut bar = Rectangle::new(
                [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), score)],
                BLUE.mix(0.6).filled(),
            );
            bar.set_margin(0, 0, 20, 20);
            bar
        }))
        .map_err(|e| fail(&e))?;

    root.present().map_err(|e| fail(&e))?;

    println!("Plot saved to: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::ModelScores;

    #[test]
    fn test_writes_svg() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("figures/model_r2.svg");

        let mut report = EvaluationReport::new();
        report.insert("Linear Regression", ModelScores { mae: 1.0, rmse: 1.0, r2: 0.4 });
        report.insert("Random Forest", ModelScores { mae: 1.0, rmse: 1.0, r2: -0.2 });

        plot_results(&report, &path).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn test_empty_report_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(plot_results(&EvaluationReport::new(), dir.path().join("x.svg")).is_err());
    }
}
