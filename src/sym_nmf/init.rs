use ndarray::{Array2, ArrayBase, Data, Ix2};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::Rng;

use crate::Float;

/// Draws the initial association matrix `H₀` for a normalized similarity
/// matrix `w`.
///
/// Entries are sampled uniformly from `[0, 2·sqrt(mean(w) / k))`, which
/// scales the seed so that `H₀·H₀ᵗ` has roughly the same magnitude as `w`.
pub(crate) fn random_init<F: Float>(
    n_clusters: usize,
    w: &ArrayBase<impl Data<Elem = F>, Ix2>,
    rng: &mut impl Rng,
) -> Array2<F> {
    let mean = w.sum() / F::cast(w.len());
    let upper_bound = F::cast(2.0) * (mean / F::cast(n_clusters)).sqrt();
    Array2::random_using(
        (w.nrows(), n_clusters),
        Uniform::new(F::zero(), upper_bound),
        rng,
    )
}
