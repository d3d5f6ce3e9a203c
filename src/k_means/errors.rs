use thiserror::Error;

/// An error when building K-means hyperparameters with an invalid value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KMeansParamsError {
    #[error("n_clusters cannot be 0")]
    NClusters,
    #[error("tolerance must be greater than 0")]
    Tolerance,
    #[error("max_n_iterations cannot be 0")]
    MaxIterations,
}
