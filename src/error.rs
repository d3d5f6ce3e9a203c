//! Error types shared across the numerical core.
//!
//! Every stage of the pipeline reports the specific failure it detected;
//! collapsing everything into a single user-facing message is left to the
//! outermost binary layer.

use thiserror::Error;

use crate::{KMeansParamsError, SymNmfParamsError};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The input text could not be parsed into a uniform point set
    #[error("invalid input data: {0}")]
    InputFormat(String),
    /// Two vectors of unequal length were compared
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    /// A point with zero total similarity has no defined normalization
    #[error("degree of point {0} is zero, cannot normalize an isolated point")]
    SingularDegree(usize),
    /// The requested number of clusters does not fit the number of samples
    #[error("invalid rank: {rank} clusters requested for {samples} samples")]
    InvalidRank { rank: usize, samples: usize },
    /// The silhouette metric was called on a degenerate labeling
    #[error("silhouette precondition violated: {0}")]
    MetricPrecondition(String),
    #[error("invalid K-means hyperparameter: {0}")]
    KMeansParams(#[from] KMeansParamsError),
    #[error("invalid SymNMF hyperparameter: {0}")]
    SymNmfParams(#[from] SymNmfParamsError),
}
