use crate::k_means::errors::KMeansParamsError;
use crate::param_guard::ParamGuard;
use crate::Float;

#[derive(Clone, Debug, PartialEq)]
/// The set of hyperparameters that can be specified for the execution of
/// the [K-means algorithm](crate::KMeans).
pub struct KMeansValidParams<F: Float> {
    /// The training is considered complete when every centroid moved by a
    /// euclidean distance lower than `tolerance` during the last iteration.
    tolerance: F,
    /// We exit the training loop when the number of training iterations
    /// exceeds `max_n_iterations` even if the `tolerance` convergence
    /// condition has not been met.
    max_n_iterations: u64,
    /// The number of clusters we will be looking for in the training dataset.
    n_clusters: usize,
}

#[derive(Clone, Debug, PartialEq)]
/// An helper struct used to construct a set of [valid hyperparameters](KMeansValidParams)
/// for the [K-means algorithm](crate::KMeans) (using the builder pattern).
pub struct KMeansParams<F: Float>(KMeansValidParams<F>);

impl<F: Float> KMeansParams<F> {
    /// `new` lets us configure our training algorithm parameters:
    /// * we will be looking for `n_clusters` in the training dataset;
    /// * the training is considered complete if every centroid moved by a
    ///   euclidean distance lower than `tolerance` during the last
    ///   iteration;
    /// * we exit the training loop when the number of training iterations
    ///   exceeds `max_n_iterations` even if the `tolerance` convergence
    ///   condition has not been met.
    ///
    /// Initial centroids are always the first `n_clusters` points in input
    /// order, so separate runs over the same data give identical results.
    ///
    /// Defaults are provided if optional parameters are not specified:
    /// * `tolerance = 1e-4`
    /// * `max_n_iterations = 300`
    pub fn new(n_clusters: usize) -> Self {
        Self(KMeansValidParams {
            tolerance: F::cast(1e-4),
            max_n_iterations: 300,
            n_clusters,
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

impl<F: Float> ParamGuard for KMeansParams<F> {
    type Checked = KMeansValidParams<F>;
    type Error = KMeansParamsError;

    fn check_ref(&self) -> Result<&Self::Checked, Self::Error> {
        if self.0.n_clusters == 0 {
            Err(KMeansParamsError::NClusters)
        } else if self.0.tolerance <= F::zero() {
            Err(KMeansParamsError::Tolerance)
        } else if self.0.max_n_iterations == 0 {
            Err(KMeansParamsError::MaxIterations)
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked, Self::Error> {
        self.check_ref()?;
        Ok(self.0)
    }
}

impl<F: Float> KMeansValidParams<F> {
    /// The per-centroid euclidean movement below which training stops
    pub fn tolerance(&self) -> F {
        self.tolerance
    }

    /// The iteration cap
    pub fn max_n_iterations(&self) -> u64 {
        self.max_n_iterations
    }

    /// The number of clusters we will be looking for in the training dataset
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::KMeans;

    #[test]
    fn autotraits() {
        fn has_autotraits<T: Send + Sync + Sized + Unpin>() {}
        has_autotraits::<KMeansParams<f64>>();
        has_autotraits::<KMeansValidParams<f64>>();
    }

    #[test]
    fn n_clusters_cannot_be_zero() {
        let res = KMeans::<f32>::params(0).check();
        assert!(matches!(res, Err(KMeansParamsError::NClusters)));
    }

    #[test]
    fn tolerance_has_to_be_positive() {
        let res = KMeans::<f64>::params(1).tolerance(-1.0).check();
        assert!(matches!(res, Err(KMeansParamsError::Tolerance)));
        let res = KMeans::<f64>::params(1).tolerance(0.0).check();
        assert!(matches!(res, Err(KMeansParamsError::Tolerance)));
    }

    #[test]
    fn max_n_iterations_cannot_be_zero() {
        let res = KMeans::<f64>::params(1).max_n_iterations(0).check();
        assert!(matches!(res, Err(KMeansParamsError::MaxIterations)));
    }
}
