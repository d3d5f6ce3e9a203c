//! Clustering by symmetric non-negative matrix factorization, with a
//! classical K-means baseline to compare against.
//!
//! ## The big picture
//!
//! Given a set of `n` points in `R^d`, this crate builds a normalized
//! pairwise-similarity graph `W` and factorizes it as `W ≈ H·Hᵗ` with `H`
//! entry-wise non-negative (`n x k`). The row-wise argmax of the final `H`
//! assigns each point to one of `k` clusters. The same points are clustered
//! independently with Lloyd's K-means, and both labelings are scored with
//! the silhouette metric so the two methods can be compared on equal terms.
//!
//! ## Pipeline
//!
//! * [`graph`] turns raw points into the similarity matrix `A`, the degree
//!   matrix `D` and the normalized matrix `W = D^{-1/2} A D^{-1/2}`.
//! * [`SymNmf`] refines a random non-negative seed matrix `H` with a
//!   damped multiplicative update until the change between iterations
//!   falls below a tolerance or an iteration cap is reached.
//! * [`KMeans`] runs the classical assign/recompute loop with
//!   deterministic initial centroids (the first `k` input points).
//! * [`compare`](analysis::compare) derives hard labels from both models
//!   and evaluates each with [`silhouette_score`].
//!
//! All computation is synchronous, single-threaded and in-memory; the
//! iteration caps are the only bound on runtime.

pub mod analysis;
pub mod distance;
pub mod error;
pub mod graph;
pub mod io;
mod k_means;
mod param_guard;
pub mod silhouette;
mod sym_nmf;

pub use analysis::{compare, Comparison};
pub use error::{Error, Result};
pub use k_means::{KMeans, KMeansParams, KMeansParamsError, KMeansValidParams};
pub use param_guard::ParamGuard;
pub use silhouette::silhouette_score;
pub use sym_nmf::{reconstruction_error, SymNmf, SymNmfParams, SymNmfParamsError, SymNmfValidParams};

use ndarray::NdFloat;
use num_traits::{FromPrimitive, NumCast, Signed};
use rand::distributions::uniform::SampleUniform;
use std::iter::Sum;

/// Floating point numbers the numerical core can run on.
///
/// This trait is implemented for `f32` and `f64`; everything in the crate is
/// generic over it so callers pick their own precision.
pub trait Float:
    NdFloat + FromPrimitive + Signed + Sum + SampleUniform + approx::AbsDiffEq<Epsilon = Self>
{
    fn cast<T: NumCast>(x: T) -> Self {
        NumCast::from(x).unwrap()
    }
}

impl Float for f32 {}
impl Float for f64 {}
