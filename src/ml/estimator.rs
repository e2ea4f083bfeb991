// ============================================================
// Layer 5 — Estimator Variants
// ============================================================
// The fixed set of models compared in every run, as one enum so the
// trainer can hold them in an ordered Vec and treat them uniformly
// through the Regressor trait.

use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::domain::error::PipelineResult;
use crate::domain::traits::Regressor;
use crate::ml::boosting::{BoostingConfig, GradientBoosting};
use crate::ml::forest::RandomForest;
use crate::ml::linear::LinearRegression;

#[derive(Debug, Clone)]
pub enum Estimator {
    Linear(LinearRegression),
    Forest(RandomForest),
    Boosted(GradientBoosting),
}

impl Estimator {
    /// Linear regression, random forest and gradient boosting, in
    /// that order, with the ensembles seeded from `seed`.
    pub fn default_suite(seed: u64, n_trees: usize) -> Vec<Estimator> {
        vec![
            Estimator::Linear(LinearRegression::new()),
            Estimator::Forest(RandomForest::new(n_trees, seed)),
            Estimator::Boosted(GradientBoosting::new(BoostingConfig::default(), seed)),
        ]
    }

    fn inner(&self) -> &dyn Regressor {
        match self {
            Estimator::Linear(m)  => m,
            Estimator::Forest(m)  => m,
            Estimator::Boosted(m) => m,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Regressor {
        match self {
            Estimator::Linear(m)  => m,
            Estimator::Forest(m)  => m,
            Estimator::Boosted(m) => m,
        }
    }
}

impl Regressor for Estimator {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn fit(&mut self, features: ArrayView2<'_, f64>, target: ArrayView1<'_, f64>) -> PipelineResult<()> {
        self.inner_mut().fit(features, target)
    }

    fn predict(&self, features: ArrayView2<'_, f64>) -> PipelineResult<Array1<f64>> {
        self.inner().predict(features)
    }
}
