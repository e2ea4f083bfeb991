// ============================================================
// Layer 3 — Evaluation Report
// ============================================================
// Results of one training run: for each model, in the order the
// models were trained, its MAE, RMSE and R² on the test partition.
// Created fresh per run; optionally written to CSV and charted by
// the infra layer.

use serde::{Deserialize, Serialize};

/// The three scores computed for every model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelScores {
    /// Mean absolute error
    pub mae:  f64,
    /// Root mean squared error
    pub rmse: f64,
    /// Coefficient of determination, 1.0 = perfect fit
    pub r2:   f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelReport {
    pub model:  String,
    pub scores: ModelScores,
}

/// Ordered mapping from model name to its scores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    entries: Vec<ModelReport>,
}

impl EvaluationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a model's scores. A second entry with the same name
    /// replaces the first one in place.
    pub fn insert(&mut self, model: impl Into<String>, scores: ModelScores) {
        let model = model.into();
        match self.entries.iter_mut().find(|e| e.model == model) {
            Some(entry) => entry.scores = scores,
            None        => self.entries.push(ModelReport { model, scores }),
        }
    }

    pub fn get(&self, model: &str) -> Option<&ModelScores> {
        self.entries.iter().find(|e| e.model == model).map(|e| &e.scores)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelReport> {
        self.entries.iter()
    }

    pub fn model_names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.model.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(r2: f64) -> ModelScores {
        ModelScores { mae: 1.0, rmse: 2.0, r2 }
    }

    #[test]
    fn test_keeps_insertion_order() {
        let mut report = EvaluationReport::new();
        report.insert("b", scores(0.1));
        report.insert("a", scores(0.2));
        assert_eq!(report.model_names(), vec!["b", "a"]);
    }

    #[test]
    fn test_insert_same_name_replaces() {
        let mut report = EvaluationReport::new();
        report.insert("a", scores(0.1));
        report.insert("a", scores(0.9));
        assert_eq!(report.len(), 1);
        assert_eq!(report.get("a").unwrap().r2, 0.9);
    }
}
