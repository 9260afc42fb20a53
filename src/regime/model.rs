//! Fitted Gaussian HMM parameters.
//!
//! [`HmmModel`] is an immutable value produced by the EM fit: initial
//! distribution `π`, row-stochastic transition matrix `A`, and one
//! full-covariance Gaussian per state, together with fit statistics.
//! Matrices serialize as nested row arrays.
use ndarray::{Array1, Array2};
use serde::{Serialize, Serializer};

use crate::regime::{emission::GaussianEmission, errors::HmmResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HmmModel {
    pub n_states: usize,
    #[serde(serialize_with = "serialize_vector")]
    pub start_prob: Array1<f64>,
    #[serde(serialize_with = "serialize_matrix")]
    pub transmat: Array2<f64>,
    /// `K × d` state means in standardized feature units.
    #[serde(serialize_with = "serialize_matrix")]
    pub means: Array2<f64>,
    /// One `d × d` covariance per state.
    #[serde(serialize_with = "serialize_matrices")]
    pub covars: Vec<Array2<f64>>,
    /// Log-likelihood of the final parameters.
    pub loglik: f64,
    pub iterations: usize,
    pub converged: bool,
    /// Log-likelihood after each E-step.
    pub history: Vec<f64>,
}

impl HmmModel {
    /// Factorized emission densities for every state.
    ///
    /// # Errors
    /// `HmmError::SingularCovariance` for the first non-positive-definite
    /// covariance.
    pub fn emissions(&self) -> HmmResult<Vec<GaussianEmission>> {
        self.covars
            .iter()
            .enumerate()
            .map(|(k, cov)| GaussianEmission::new(self.means.row(k), cov, k))
            .collect()
    }

    /// Transition matrix as nested rows.
    pub fn transition_rows(&self) -> Vec<Vec<f64>> {
        self.transmat.rows().into_iter().map(|row| row.to_vec()).collect()
    }

    /// State order by ascending second moment of the standardized return
    /// feature, `Σ_k[0, 0] + μ_k[0]²`; ties keep the original order.
    pub fn volatility_order(&self) -> Vec<usize> {
        let key = |k: usize| self.covars[k][[0, 0]] + self.means[[k, 0]].powi(2);
        let mut order: Vec<usize> = (0..self.n_states).collect();
        order.sort_by(|&a, &b| key(a).total_cmp(&key(b)));
        order
    }

    /// Relabel states so that new state `i` is old state `order[i]`.
    ///
    /// # Panics
    /// If `order` is not a permutation of `0..n_states`.
    pub fn relabel(&self, order: &[usize]) -> Self {
        assert_eq!(order.len(), self.n_states, "relabel order must cover every state");
        let k = self.n_states;
        Self {
            n_states: k,
            start_prob: Array1::from_shape_fn(k, |i| self.start_prob[order[i]]),
            transmat: Array2::from_shape_fn((k, k), |(i, j)| self.transmat[[order[i], order[j]]]),
            means: Array2::from_shape_fn(self.means.dim(), |(i, j)| self.means[[order[i], j]]),
            covars: order.iter().map(|&o| self.covars[o].clone()).collect(),
            loglik: self.loglik,
            iterations: self.iterations,
            converged: self.converged,
            history: self.history.clone(),
        }
    }
}

// ---- Serialization helpers ----

fn serialize_vector<S: Serializer>(v: &Array1<f64>, s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(v.iter())
}

fn serialize_matrix<S: Serializer>(m: &Array2<f64>, s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(m.rows().into_iter().map(|row| row.to_vec()))
}

fn serialize_matrices<S: Serializer>(ms: &[Array2<f64>], s: S) -> Result<S::Ok, S::Error> {
    s.collect_seq(
        ms.iter().map(|m| m.rows().into_iter().map(|row| row.to_vec()).collect::<Vec<_>>()),
    )
}
