// ============================================================
// Layer 6 — Results Table
// ============================================================
// Persists an EvaluationReport as CSV, one row per model in the
// order the models were trained:
//
//   model,MAE,RMSE,R2
//   Linear Regression,12.345678,20.1,0.41
//   Random Forest,...
//
// Parent directories are created as needed. load_results reads the
// same layout back, so a chart can be redrawn without retraining.

use std::path::Path;

use crate::data::writer::create_parent_dirs;
use crate::domain::error::{PipelineError, PipelineResult};
use crate::domain::report::{EvaluationReport, ModelScores};

const HEADER: [&str; 4] = ["model", "MAE", "RMSE", "R2"];

pub fn save_results(report: &EvaluationReport, path: impl AsRef<Path>) -> PipelineResult<()> {
    let path = path.as_ref();
    create_parent_dirs(path)?;

    let mut writer = csv::Writer::from_path(path).map_err(|e| PipelineError::output(path, e))?;
    writer.write_record(HEADER).map_err(|e| PipelineError::output(path, e))?;

    for entry in report.iter() {
        let s = entry.scores;
        writer
            .write_record([
                entry.model.clone(),
                s.mae.to_string(),
                s.rmse.to_string(),
                s.r2.to_string(),
            ])
            .map_err(|e| PipelineError::output(path, e))?;
    }
    writer.flush().map_err(|e| PipelineError::output(path, e))?;

    println!("Model results saved to: {}", path.display());
    tracing::debug!("Wrote {} result rows to '{}'", report.len(), path.display());
    Ok(())
}

pub fn load_results(path: impl AsRef<Path>) -> PipelineResult<EvaluationReport> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path).map_err(|e| PipelineError::data_access(path, e))?;

    let headers = reader.headers().map_err(|e| PipelineError::data_access(path, e))?.clone();
    for column in &HEADER[1..] {
        if !headers.iter().any(|h| h == *column) {
            return Err(PipelineError::schema(*column));
        }
    }
    let index = |name: &str| headers.iter().position(|h| h == name).unwrap_or(0);
    let (mae, rmse, r2) = (index("MAE"), index("RMSE"), index("R2"));

    let mut report = EvaluationReport::new();
    for record in reader.records() {
        let record = record.map_err(|e| PipelineError::data_access(path, e))?;
        let number = |i: usize| -> PipelineResult<f64> {
            record
                .get(i)
                .unwrap_or("")
                .parse()
                .map_err(|_| PipelineError::data_access(path, format!("bad number in row {:?}", record)))
        };
        let scores = ModelScores { mae: number(mae)?, rmse: number(rmse)?, r2: number(r2)? };
        report.insert(record.get(0).unwrap_or_default(), scores);
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_then_load() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports/tables/model_results.csv");

        let mut report = EvaluationReport::new();
        report.insert("Linear Regression", ModelScores { mae: 1.5, rmse: 2.25, r2: 0.5 });
        report.insert("Random Forest", ModelScores { mae: 1.0, rmse: 1.75, r2: -0.125 });

        save_results(&report, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("model,MAE,RMSE,R2\n"));
        assert_eq!(load_results(&path).unwrap(), report);
    }

    #[test]
    fn test_missing_metric_column_is_schema_error() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("r.csv");
        std::fs::write(&path, "model,MAE,RMSE\nx,1,2\n").unwrap();
        assert!(matches!(load_results(&path), Err(PipelineError::Schema { .. })));
    }
}
