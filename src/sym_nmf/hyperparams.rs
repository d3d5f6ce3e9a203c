use rand::Rng;

use crate::param_guard::ParamGuard;
use crate::sym_nmf::errors::SymNmfParamsError;
use crate::Float;

#[derive(Clone, Debug, PartialEq)]
/// The set of hyperparameters that can be specified for the execution of
/// the [SymNMF algorithm](crate::SymNmf).
pub struct SymNmfValidParams<F: Float, R: Rng> {
    /// The rank of the factorization, i.e. the number of clusters.
    n_clusters: usize,
    /// The optimization is considered complete when the squared Frobenius
    /// norm of the difference between consecutive association matrices
    /// falls below `tolerance`.
    tolerance: F,
    /// We exit the optimization loop when the number of iterations exceeds
    /// `max_n_iterations` even if the `tolerance` convergence condition has
    /// not been met. Reaching the cap is a normal exit, not a failure.
    max_n_iterations: u64,
    /// The random number generator used to draw the initial association
    /// matrix.
    rng: R,
}

#[derive(Clone, Debug, PartialEq)]
/// An helper struct used to construct a set of [valid hyperparameters](SymNmfValidParams)
/// for the [SymNMF algorithm](crate::SymNmf) (using the builder pattern).
pub struct SymNmfParams<F: Float, R: Rng>(SymNmfValidParams<F, R>);

impl<F: Float, R: Rng> SymNmfParams<F, R> {
    /// `new` lets us configure our optimization parameters:
    /// * we will be looking for `n_clusters` in the similarity graph;
    /// * the optimization is considered complete if the squared Frobenius
    ///   norm of the change of the association matrix after an iteration is
    ///   lower than `tolerance`;
    /// * we exit the loop when the number of iterations exceeds
    ///   `max_n_iterations` even if the `tolerance` condition has not been
    ///   met, and return the last association matrix either way.
    ///
    /// Defaults are provided if optional parameters are not specified:
    /// * `tolerance = 1e-4`
    /// * `max_n_iterations = 300`
    pub fn new(n_clusters: usize, rng: R) -> Self {
        Self(SymNmfValidParams {
            n_clusters,
            tolerance: F::cast(1e-4),
            max_n_iterations: 300,
            rng,
        })
    }

    /// Change the value of `tolerance`
    pub fn tolerance(mut self, tolerance: F) -> Self {
        self.0.tolerance = tolerance;
        self
    }

    /// Change the value of `max_n_iterations`
    pub fn max_n_iterations(mut self, max_n_iterations: u64) -> Self {
        self.0.max_n_iterations = max_n_iterations;
        self
    }
}

impl<F: Float, R: Rng> ParamGuard for SymNmfParams<F, R> {
    type Checked = SymNmfValidParams<F, R>;
    type Error = SymNmfParamsError;

    fn check_ref(&self) -> Result<&Self::Checked, Self::Error> {
        if self.0.n_clusters == 0 {
            Err(SymNmfParamsError::NClusters)
        } else if self.0.tolerance <= F::zero() {
            Err(SymNmfParamsError::Tolerance)
        } else if self.0.max_n_iterations == 0 {
            Err(SymNmfParamsError::MaxIterations)
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked, Self::Error> {
        self.check_ref()?;
        Ok(self.0)
    }
}

impl<F: Float, R: Rng> SymNmfValidParams<F, R> {
    /// The rank of the factorization, i.e. the number of clusters
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    /// The squared-Frobenius convergence threshold
    pub fn tolerance(&self) -> F {
        self.tolerance
    }

    /// The iteration cap
    pub fn max_n_iterations(&self) -> u64 {
        self.max_n_iterations
    }

    /// Returns the random generator
    pub fn rng(&self) -> &R {
        &self.rng
    }
}
