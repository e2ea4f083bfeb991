// ============================================================
// Layer 5 — Random Forest Regressor
// ============================================================
// An average of `n_trees` fully grown regression trees, each fitted
// on a bootstrap sample (n draws with replacement) of the training
// rows. Every split considers all features.
//
// Randomness comes only from the bootstrap draws: a StdRng seeded
// with the forest seed hands each tree its own sub-seed, so the
// same seed and data always give the same forest.

use ndarray::{Array1, ArrayView1, ArrayView2};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::domain::error::{PipelineError, PipelineResult};
use crate::domain::traits::Regressor;
use crate::ml::tree::{RegressionTree, TreeConfig};
use crate::ml::validation::{check_features, check_training_data, check_width};

const NAME: &str = "Random Forest";

pub const DEFAULT_TREES: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    n_trees:    usize,
    seed:       u64,
    tree:       TreeConfig,
    trees:      Vec<RegressionTree>,
    n_features: usize,
}

impl RandomForest {
    pub fn new(n_trees: usize, seed: u64) -> Self {
        Self {
            n_trees: n_trees.max(1),
            seed,
            tree: TreeConfig::default(),
            trees: Vec::new(),
            n_features: 0,
        }
    }

    pub fn with_tree_config(mut self, tree: TreeConfig) -> Self {
        self.tree = tree;
        self
    }

    pub fn n_trees(&self) -> usize {
        self.n_trees
    }
}

impl Default for RandomForest {
    fn default() -> Self {
        Self::new(DEFAULT_TREES, 42)
    }
}

impl Regressor for RandomForest {
    fn name(&self) -> &'static str {
        NAME
    }

    fn fit(&mut self, features: ArrayView2<'_, f64>, target: ArrayView1<'_, f64>) -> PipelineResult<()> {
        check_training_data(NAME, features, target)?;

        let y      = target.to_vec();
        let n      = features.nrows();
        let mut rng = StdRng::seed_from_u64(self.seed);

        self.trees = (0..self.n_trees)
            .map(|_| {
                let mut tree_rng = StdRng::seed_from_u64(rng.gen());
                let bootstrap    = (0..n).map(|_| tree_rng.gen_range(0..n)).collect();
                let mut tree     = RegressionTree::new(self.tree);
                tree.fit(features, &y, bootstrap);
                tree
            })
            .collect();
        self.n_features = features.ncols();

        tracing::debug!("{} fitted {} trees on {} rows", NAME, self.trees.len(), n);
        Ok(())
    }

    fn predict(&self, features: ArrayView2<'_, f64>) -> PipelineResult<Array1<f64>> {
        if self.trees.is_empty() {
            return Err(PipelineError::training(NAME, "predict called before fit"));
        }
        check_width(NAME, self.n_features, features)?;
        check_features(NAME, features)?;

        let mut sum = Array1::<f64>::zeros(features.nrows());
        for tree in &self.trees {
            sum += &tree.predict(features);
        }
        Ok(sum / self.trees.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    fn data() -> (Array2<f64>, Array1<f64>) {
        let x = Array2::from_shape_fn((40, 2), |(i, j)| ((i * (j + 3)) % 17) as f64);
        let y = x.map_axis(ndarray::Axis(1), |r| if r[0] > 8.0 { 10.0 + r[1] } else { r[1] });
        (x, y)
    }

    #[test]
    fn test_same_seed_same_predictions() {
        let (x, y) = data();
        let mut a = RandomForest::new(10, 42);
        let mut b = RandomForest::new(10, 42);
        a.fit(x.view(), y.view()).unwrap();
        b.fit(x.view(), y.view()).unwrap();
        assert_eq!(a.predict(x.view()).unwrap(), b.predict(x.view()).unwrap());
    }

    #[test]
    fn test_fits_training_data_well() {
        let (x, y) = data();
        let mut forest = RandomForest::new(25, 7);
        forest.fit(x.view(), y.view()).unwrap();
        let pred = forest.predict(x.view()).unwrap();
        let r2 = crate::ml::metrics::r2_score(y.view(), pred.view());
        assert!(r2 > 0.8, "r2 = {r2}");
    }

    #[test]
    fn test_nan_label_is_training_error() {
        let mut forest = RandomForest::new(3, 0);
        let err = forest
            .fit(array![[1.0], [2.0]].view(), array![f64::NAN, 1.0].view())
            .unwrap_err();
        assert!(matches!(err, PipelineError::Training { ref model, .. } if model == NAME));
    }

    #[test]
    fn test_width_mismatch_on_predict() {
        let (x, y) = data();
        let mut forest = RandomForest::new(2, 0);
        forest.fit(x.view(), y.view()).unwrap();
        assert!(forest.predict(array![[1.0]].view()).is_err());
    }
}
