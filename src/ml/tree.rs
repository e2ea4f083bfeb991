// ============================================================
// Layer 5 — Regression Tree (CART, squared error)
// ============================================================
// Building block for both ensembles.
//
// Growing a node:
//   - stop (leaf = mean target) when the node has fewer than
//     min_samples_split rows, reached max_depth, or is pure
//   - otherwise try every feature; sort the node's rows by that
//     feature and sweep the cut points between distinct values,
//     keeping the cut that maximises  S_l²/n_l + S_r²/n_r
//     (equivalent to minimising the children's squared error)
//   - thresholds sit halfway between neighbouring values; rows with
//     value ≤ threshold go left
//
// Sample lists may repeat a row (bootstrap draws); each repeat
// counts as its own sample.
//
// Inputs are validated by the calling estimator, not here.

use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// None = grow until leaves are pure or too small
    pub max_depth:         Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf:  usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self { max_depth: None, min_samples_split: 2, min_samples_leaf: 1 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum Node {
    Leaf { value: f64 },
    Split { feature: usize, threshold: f64, left: usize, right: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    config: TreeConfig,
    nodes:  Vec<Node>,
}

struct Pending {
    node:    usize,
    depth:   usize,
    samples: Vec<usize>,
}

struct BestSplit {
    feature:   usize,
    threshold: f64,
    score:     f64,
}

impl RegressionTree {
    pub fn new(config: TreeConfig) -> Self {
        Self { config, nodes: Vec::new() }
    }

    pub fn is_fitted(&self) -> bool {
        !self.nodes.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Grow the tree on the rows listed in `samples`.
    pub fn fit(&mut self, x: ArrayView2<'_, f64>, y: &[f64], samples: Vec<usize>) {
        self.nodes.clear();
        self.nodes.push(Node::Leaf { value: mean(y, &samples) });

        let mut stack = vec![Pending { node: 0, depth: 0, samples }];
        while let Some(Pending { node, depth, samples }) = stack.pop() {
            let Some(split) = self.best_split(x, y, &samples, depth) else {
                continue;
            };

            let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = samples
                .iter()
                .partition(|&&i| x[[i, split.feature]] <= split.threshold);

            let left  = self.nodes.len();
            let right = left + 1;
            self.nodes.push(Node::Leaf { value: mean(y, &left_rows) });
            self.nodes.push(Node::Leaf { value: mean(y, &right_rows) });
            self.nodes[node] = Node::Split {
                feature:   split.feature,
                threshold: split.threshold,
                left,
                right,
            };

            stack.push(Pending { node: left,  depth: depth + 1, samples: left_rows });
            stack.push(Pending { node: right, depth: depth + 1, samples: right_rows });
        }
    }

    fn best_split(&self, x: ArrayView2<'_, f64>, y: &[f64], samples: &[usize], depth: usize) -> Option<BestSplit> {
        let cfg = &self.config;
        let n   = samples.len();

        if n < cfg.min_samples_split.max(2) || cfg.max_depth.is_some_and(|d| depth >= d) {
            return None;
        }

        let total: f64 = samples.iter().map(|&i| y[i]).sum();
        let sq:    f64 = samples.iter().map(|&i| y[i] * y[i]).sum();
        let parent     = total * total / n as f64;
        // pure node: nothing left to explain
        if sq - parent <= 1e-12 * sq.abs().max(1.0) {
            return None;
        }

        let min_leaf = cfg.min_samples_leaf.max(1);
        let mut best: Option<BestSplit> = None;
        let mut pairs: Vec<(f64, f64)>  = Vec::with_capacity(n);

        for feature in 0..x.ncols() {
            pairs.clear();
            pairs.extend(samples.iter().map(|&i| (x[[i, feature]], y[i])));
            pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

            if pairs[0].0 == pairs[n - 1].0 {
                continue;
            }

            let mut left_sum = 0.0;
            for cut in 1..n {
                left_sum += pairs[cut - 1].1;
                let (lo, hi) = (pairs[cut - 1].0, pairs[cut].0);
                if lo == hi || cut < min_leaf || n - cut < min_leaf {
                    continue;
                }
                let right_sum = total - left_sum;
                let score = left_sum * left_sum / cut as f64
                    + right_sum * right_sum / (n - cut) as f64;

                if best.as_ref().map_or(true, |b| score > b.score) {
                    let mid = lo + (hi - lo) / 2.0;
                    let threshold = if mid < hi { mid } else { lo };
                    best = Some(BestSplit { feature, threshold, score });
                }
            }
        }

        best.filter(|b| b.score > parent + 1e-12 * parent.abs().max(1.0))
    }

    pub fn predict_row(&self, row: ArrayView1<'_, f64>) -> f64 {
        let mut idx = 0;
        loop {
            match self.nodes.get(idx) {
                Some(Node::Leaf { value }) => return *value,
                Some(Node::Split { feature, threshold, left, right }) => {
                    idx = if row[*feature] <= *threshold { *left } else { *right };
                }
                None => return f64::NAN,
            }
        }
    }

    pub fn predict(&self, x: ArrayView2<'_, f64>) -> Array1<f64> {
        x.rows().into_iter().map(|row| self.predict_row(row)).collect()
    }
}

fn mean(y: &[f64], samples: &[usize]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().map(|&i| y[i]).sum::<f64>() / samples.len() as f64
}
