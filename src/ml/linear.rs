// ============================================================
// Layer 5 — Linear Regression (ordinary least squares)
// ============================================================
// Closed-form fit with an intercept and no hyperparameters.
//
//   1. Centre X and y on their training means
//   2. Solve the least-squares problem for the centred data with the
//      minimum-norm solution, so rank-deficient designs (more
//      TF-IDF columns than rows, duplicated columns) still fit:
//
//        p ≤ n :  w = pinv(XᵀX) Xᵀ y
//        p > n :  w = Xᵀ pinv(XXᵀ) y
//
//   3. intercept = ȳ - x̄·w
//
// pinv of the symmetric Gram matrix comes from a cyclic Jacobi
// eigen-decomposition; eigenvalues below RELATIVE_EIGEN_TOL × λ_max
// are treated as zero.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use crate::domain::error::{PipelineError, PipelineResult};
use crate::domain::traits::Regressor;
use crate::ml::validation::{check_features, check_training_data, check_width};

const NAME: &str = "Linear Regression";

const RELATIVE_EIGEN_TOL: f64 = 1e-12;
const MAX_SWEEPS: usize = 50;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinearRegression {
    coefficients: Option<Array1<f64>>,
    intercept:    f64,
}

impl LinearRegression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn coefficients(&self) -> Option<&Array1<f64>> {
        self.coefficients.as_ref()
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl Regressor for LinearRegression {
    fn name(&self) -> &'static str {
        NAME
    }

    fn fit(&mut self, features: ArrayView2<'_, f64>, target: ArrayView1<'_, f64>) -> PipelineResult<()> {
        check_training_data(NAME, features, target)?;

        let x_mean = features.mean_axis(Axis(0)).unwrap_or_else(|| Array1::zeros(features.ncols()));
        let y_mean = target.sum() / target.len() as f64;
        let xc = &features - &x_mean;
        let yc = target.mapv(|v| v - y_mean);

        let w = if xc.ncols() <= xc.nrows() {
            let gram = xc.t().dot(&xc);
            pinv_apply(&gram, &xc.t().dot(&yc))
        } else {
            let gram = xc.dot(&xc.t());
            xc.t().dot(&pinv_apply(&gram, &yc))
        };

        if w.iter().any(|v| !v.is_finite()) {
            return Err(PipelineError::training(NAME, "least-squares solution is not finite"));
        }

        self.intercept    = y_mean - x_mean.dot(&w);
        self.coefficients = Some(w);
        tracing::debug!("{} fitted on {} rows", NAME, features.nrows());
        Ok(())
    }

    fn predict(&self, features: ArrayView2<'_, f64>) -> PipelineResult<Array1<f64>> {
        let w = self
            .coefficients
            .as_ref()
            .ok_or_else(|| PipelineError::training(NAME, "predict called before fit"))?;
        check_width(NAME, w.len(), features)?;
        check_features(NAME, features)?;
        Ok(features.dot(w) + self.intercept)
    }
}

/// pinv(gram) · rhs for a symmetric positive semi-definite `gram`.
fn pinv_apply(gram: &Array2<f64>, rhs: &Array1<f64>) -> Array1<f64> {
    let (eigenvalues, eigenvectors) = symmetric_eigen(gram);
    let lambda_max = eigenvalues.iter().cloned().fold(0.0, f64::max);

    let mut out = Array1::zeros(rhs.len());
    if lambda_max <= 0.0 {
        return out;
    }
    let tol = lambda_max * RELATIVE_EIGEN_TOL;

    for (k, &lambda) in eigenvalues.iter().enumerate() {
        if lambda > tol {
            let v    = eigenvectors.column(k);
            let coef = v.dot(rhs) / lambda;
            out.scaled_add(coef, &v);
        }
    }
    out
}

/// Cyclic Jacobi eigen-decomposition of a symmetric matrix.
/// Returns (eigenvalues, eigenvectors as columns).
fn symmetric_eigen(matrix: &Array2<f64>) -> (Vec<f64>, Array2<f64>) {
    let n     = matrix.nrows();
    let mut a = matrix.clone();
    let mut v = Array2::<f64>::eye(n);

    let total: f64 = a.iter().map(|x| x * x).sum();
    let stop = total * 1e-26;

    for _ in 0..MAX_SWEEPS {
        let mut off = 0.0;
        for p in 0..n {
            for q in (p + 1)..n {
                off += a[[p, q]] * a[[p, q]];
            }
        }
        if off <= stop {
            break;
        }

        for p in 0..n {
            for q in (p + 1)..n {
                let apq = a[[p, q]];
                if apq == 0.0 {
                    continue;
                }
                let theta = (a[[q, q]] - a[[p, p]]) / (2.0 * apq);
                let sign  = if theta >= 0.0 { 1.0 } else { -1.0 };
                let t     = sign / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c     = 1.0 / (t * t + 1.0).sqrt();
                let s     = t * c;

                for k in 0..n {
                    let (akp, akq) = (a[[k, p]], a[[k, q]]);
                    a[[k, p]] = c * akp - s * akq;
                    a[[k, q]] = s * akp + c * akq;
                }
                for k in 0..n {
                    let (apk, aqk) = (a[[p, k]], a[[q, k]]);
                    a[[p, k]] = c * apk - s * aqk;
                    a[[q, k]] = s * apk + c * aqk;
                }
                for k in 0..n {
                    let (vkp, vkq) = (v[[k, p]], v[[k, q]]);
                    v[[k, p]] = c * vkp - s * vkq;
                    v[[k, q]] = s * vkp + c * vkq;
                }
            }
        }
    }

    ((0..n).map(|i| a[[i, i]]).collect(), v)
}
