// ============================================================
// Layer 5 — Gradient Boosting Regressor
// ============================================================
// Stage-wise additive model for squared-error loss:
//
//   F₀(x)   = mean(y)
//   r_m     = y - F_{m-1}(x)              (negative gradient)
//   h_m     = depth-limited tree fitted to r_m
//   F_m(x)  = F_{m-1}(x) + learning_rate · h_m(x)
//
// Defaults: 100 stages, learning rate 0.1, depth 3, full sample.
// With subsample < 1.0 each stage fits on a random subset of rows
// drawn (without replacement) from a StdRng seeded with `seed`.

use ndarray::{Array1, ArrayView1, ArrayView2};
use rand::{rngs::StdRng, seq::index::sample, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::domain::error::{PipelineError, PipelineResult};
use crate::domain::traits::Regressor;
use crate::ml::tree::{RegressionTree, TreeConfig};
use crate::ml::validation::{check_features, check_training_data, check_width};

const NAME: &str = "Gradient Boosting";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoostingConfig {
    pub n_stages:      usize,
    pub learning_rate: f64,
    pub max_depth:     usize,
    /// Fraction of rows used per stage, in (0, 1]
    pub subsample:     f64,
}

impl Default for BoostingConfig {
    fn default() -> Self {
        Self { n_stages: 100, learning_rate: 0.1, max_depth: 3, subsample: 1.0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradientBoosting {
    config:     BoostingConfig,
    seed:       u64,
    init:       f64,
    stages:     Vec<RegressionTree>,
    n_features: usize,
}

impl GradientBoosting {
    pub fn new(config: BoostingConfig, seed: u64) -> Self {
        Self { config, seed, init: 0.0, stages: Vec::new(), n_features: 0 }
    }

    pub fn n_stages(&self) -> usize {
        self.stages.len()
    }
}

impl Default for GradientBoosting {
    fn default() -> Self {
        Self::new(BoostingConfig::default(), 42)
    }
}

impl Regressor for GradientBoosting {
    fn name(&self) -> &'static str {
        NAME
    }

    fn fit(&mut self, features: ArrayView2<'_, f64>, target: ArrayView1<'_, f64>) -> PipelineResult<()> {
        check_training_data(NAME, features, target)?;
        let cfg = self.config;
        if !(cfg.subsample > 0.0 && cfg.subsample <= 1.0) {
            return Err(PipelineError::training(NAME, format!("subsample {} outside (0, 1]", cfg.subsample)));
        }

        let n        = features.nrows();
        let per_step = ((cfg.subsample * n as f64).round() as usize).clamp(1, n);
        let tree_cfg = TreeConfig { max_depth: Some(cfg.max_depth), ..TreeConfig::default() };
        let mut rng  = StdRng::seed_from_u64(self.seed);

        self.init = target.sum() / n as f64;
        self.stages.clear();
        let mut current = Array1::from_elem(n, self.init);

        for _ in 0..cfg.n_stages {
            let residuals = (&target - &current).to_vec();
            let rows: Vec<usize> = if per_step == n {
                (0..n).collect()
            } else {
                sample(&mut rng, n, per_step).into_vec()
            };

            let mut tree = RegressionTree::new(tree_cfg);
            tree.fit(features, &residuals, rows);
            current.scaled_add(cfg.learning_rate, &tree.predict(features));
            self.stages.push(tree);
        }
        self.n_features = features.ncols();

        tracing::debug!("{} fitted {} stages on {} rows", NAME, self.stages.len(), n);
        Ok(())
    }

    fn predict(&self, features: ArrayView2<'_, f64>) -> PipelineResult<Array1<f64>> {
        if self.n_features == 0 {
            return Err(PipelineError::training(NAME, "predict called before fit"));
        }
        check_width(NAME, self.n_features, features)?;
        check_features(NAME, features)?;

        let mut out = Array1::from_elem(features.nrows(), self.init);
        for tree in &self.stages {
            out.scaled_add(self.config.learning_rate, &tree.predict(features));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2, Axis};

    fn data() -> (Array2<f64>, Array1<f64>) {
        let x = Array2::from_shape_fn((30, 1), |(i, _)| i as f64);
        let y = x.map_axis(Axis(1), |r| (r[0] / 3.0).floor());
        (x, y)
    }

    #[test]
    fn test_more_stages_lower_training_error() {
        let (x, y) = data();
        let mut short = GradientBoosting::new(BoostingConfig { n_stages: 5, ..Default::default() }, 0);
        let mut long  = GradientBoosting::new(BoostingConfig { n_stages: 100, ..Default::default() }, 0);
        short.fit(x.view(), y.view()).unwrap();
        long.fit(x.view(), y.view()).unwrap();

        let mse = |m: &GradientBoosting| {
            let p = m.predict(x.view()).unwrap();
            (&p - &y).mapv(|e| e * e).mean().unwrap_or(f64::NAN)
        };
        assert!(mse(&long) < mse(&short));
        assert!(mse(&long) < 0.2);
    }

    #[test]
    fn test_zero_stages_predicts_mean() {
        let mut m = GradientBoosting::new(BoostingConfig { n_stages: 0, ..Default::default() }, 0);
        m.fit(array![[0.0], [1.0]].view(), array![2.0, 4.0].view()).unwrap();
        assert_eq!(m.predict(array![[5.0]].view()).unwrap().to_vec(), vec![3.0]);
    }

    #[test]
    fn test_subsample_is_seeded() {
        let (x, y) = data();
        let cfg = BoostingConfig { n_stages: 10, subsample: 0.5, ..Default::default() };
        let mut a = GradientBoosting::new(cfg, 3);
        let mut b = GradientBoosting::new(cfg, 3);
        a.fit(x.view(), y.view()).unwrap();
        b.fit(x.view(), y.view()).unwrap();
        assert_eq!(a.predict(x.view()).unwrap(), b.predict(x.view()).unwrap());
    }

    #[test]
    fn test_predict_before_fit_fails() {
        assert!(GradientBoosting::default().predict(array![[1.0]].view()).is_err());
    }
}
