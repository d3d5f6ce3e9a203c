use ndarray::{Array1, Array2, ArrayBase, Data, Ix2, Zip};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256Plus;

use crate::error::{Error, Result};
use crate::sym_nmf::hyperparams::{SymNmfParams, SymNmfValidParams};
use crate::sym_nmf::init::random_init;
use crate::Float;

#[derive(Clone, Debug, PartialEq)]
/// Symmetric non-negative matrix factorization of a similarity graph.
///
/// Given the normalized similarity matrix `W` of `n` points, SymNMF looks
/// for a non-negative `n x k` association matrix `H` minimizing
/// `‖W - H·Hᵗ‖²_F`. Entry `H[i][j]` measures how strongly point `i` is
/// associated with cluster `j`, so the row-wise argmax of the final `H`
/// yields a hard clustering.
///
/// The optimizer is a damped multiplicative update: each entry is rescaled
/// by a ratio of the gradient terms,
///
/// ```text
/// H ← H ∘ (1/2 + 1/2 · (W·H) ⊘ (H·(HᵗH)))
/// ```
///
/// which keeps `H` entry-wise non-negative without any clamping and never
/// increases the reconstruction error. The loop stops once the squared
/// Frobenius norm of the change between consecutive iterations falls below
/// `tolerance`, or when `max_n_iterations` is reached; the last computed
/// `H` is returned either way.
///
/// Each iteration costs `O(n²k + nk²)`: one product with `W` and two thin
/// products through the `k x k` Gram matrix `HᵗH`.
///
/// ## Example
///
/// ```
/// use symnmf::{graph, ParamGuard, SymNmf};
/// use ndarray::array;
///
/// let points = array![[0.0, 0.0], [0.0, 1.0], [10.0, 10.0], [10.0, 11.0]];
/// let w = graph::normalized_similarity(&points).unwrap();
///
/// let model = SymNmf::params(2)
///     .check()
///     .unwrap()
///     .fit(&w)
///     .unwrap();
/// let labels = model.predict();
/// assert_eq!(labels[0], labels[1]);
/// assert_eq!(labels[2], labels[3]);
/// assert_ne!(labels[0], labels[2]);
/// ```
pub struct SymNmf<F: Float> {
    h: Array2<F>,
    n_iterations: u64,
}

/// Guard added to the update denominator to avoid division by zero; small
/// enough not to bias the factorization.
const DIVISION_GUARD: f64 = 1e-12;

impl<F: Float> SymNmf<F> {
    /// Configures the factorization with a default seeded generator for the
    /// initial association matrix.
    pub fn params(n_clusters: usize) -> SymNmfParams<F, Xoshiro256Plus> {
        SymNmfParams::new(n_clusters, Xoshiro256Plus::seed_from_u64(42))
    }

    /// Configures the factorization with an explicit generator, for callers
    /// that need control over reproducibility.
    pub fn params_with_rng<R: Rng>(n_clusters: usize, rng: R) -> SymNmfParams<F, R> {
        SymNmfParams::new(n_clusters, rng)
    }

    /// Return the final association matrix with shape `(n_points, n_clusters)`.
    pub fn association(&self) -> &Array2<F> {
        &self.h
    }

    /// Number of update iterations actually performed.
    pub fn n_iterations(&self) -> u64 {
        self.n_iterations
    }

    /// Assigns each point to the cluster with the strongest association,
    /// i.e. the row-wise argmax of `H`. Ties break towards the lowest
    /// cluster index.
    pub fn predict(&self) -> Array1<usize> {
        self.h.rows().into_iter().map(row_argmax).collect()
    }
}

impl<F: Float, R: Rng + Clone> SymNmfValidParams<F, R> {
    /// Factorizes the normalized similarity matrix `w`, drawing the initial
    /// association matrix from the params' generator.
    ///
    /// Fails with [`Error::InvalidRank`] when the requested number of
    /// clusters is not smaller than the number of points.
    pub fn fit(&self, w: &ArrayBase<impl Data<Elem = F>, Ix2>) -> Result<SymNmf<F>> {
        let mut rng = self.rng().clone();
        self.validate(w)?;
        let h = random_init(self.n_clusters(), w, &mut rng);
        self.fit_from(h, w)
    }

    /// Factorizes `w` starting from a caller-provided non-negative seed
    /// matrix, bypassing the random initialization.
    pub fn fit_from(
        &self,
        seed: Array2<F>,
        w: &ArrayBase<impl Data<Elem = F>, Ix2>,
    ) -> Result<SymNmf<F>> {
        self.validate(w)?;
        if seed.dim() != (w.nrows(), self.n_clusters()) {
            return Err(Error::DimensionMismatch {
                expected: w.nrows() * self.n_clusters(),
                found: seed.len(),
            });
        }

        let mut h = seed;
        let mut n_iterations = 0;
        for _ in 0..self.max_n_iterations() {
            let delta = update_step(&mut h, w);
            n_iterations += 1;
            if delta < self.tolerance() {
                break;
            }
        }
        Ok(SymNmf { h, n_iterations })
    }

    fn validate(&self, w: &ArrayBase<impl Data<Elem = F>, Ix2>) -> Result<()> {
        if w.nrows() != w.ncols() {
            return Err(Error::DimensionMismatch {
                expected: w.nrows(),
                found: w.ncols(),
            });
        }
        if self.n_clusters() >= w.nrows() {
            return Err(Error::InvalidRank {
                rank: self.n_clusters(),
                samples: w.nrows(),
            });
        }
        Ok(())
    }
}

/// Applies one multiplicative update to `h` in place and returns the squared
/// Frobenius norm of the change.
fn update_step<F: Float>(h: &mut Array2<F>, w: &ArrayBase<impl Data<Elem = F>, Ix2>) -> F {
    let numerator = w.dot(h);
    // Forming the k x k Gram matrix first keeps the denominator at
    // O(n k²) instead of the O(n² k) of (H·Hᵗ)·H.
    let gram = h.t().dot(h);
    let denominator = h.dot(&gram);

    let damping = F::cast(0.5);
    let guard = F::cast(DIVISION_GUARD);
    let mut delta = F::zero();
    Zip::from(h)
        .and(&numerator)
        .and(&denominator)
        .for_each(|entry, &num, &den| {
            let updated = *entry * (damping + damping * num / (den + guard));
            let step = updated - *entry;
            delta = delta + step * step;
            *entry = updated;
        });
    delta
}

/// Squared Frobenius reconstruction error `‖W - H·Hᵗ‖²_F` of an association
/// matrix against the similarity graph it factorizes.
pub fn reconstruction_error<F: Float>(
    w: &ArrayBase<impl Data<Elem = F>, Ix2>,
    h: &ArrayBase<impl Data<Elem = F>, Ix2>,
) -> F {
    let residual = w.to_owned() - h.dot(&h.t());
    residual.iter().map(|&r| r * r).sum()
}

fn row_argmax<F: Float>(row: ndarray::ArrayView1<F>) -> usize {
    let mut best = 0;
    let mut best_value = row[0];
    for (index, &value) in row.iter().enumerate() {
        if value > best_value {
            best = index;
            best_value = value;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph;
    use crate::ParamGuard;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use rand_xoshiro::Xoshiro256Plus;

    fn two_blobs() -> Array2<f64> {
        let points = array![[0.0, 0.0], [0.0, 1.0], [10.0, 10.0], [10.0, 11.0]];
        graph::normalized_similarity(&points).unwrap()
    }

    #[test]
    fn factorization_stays_non_negative() {
        let w = two_blobs();
        let mut rng = Xoshiro256Plus::seed_from_u64(3);
        let mut h = random_init(2, &w, &mut rng);
        for _ in 0..50 {
            update_step(&mut h, &w);
            assert!(h.iter().all(|&v| v >= 0.0));
        }
    }

    #[test]
    fn reconstruction_error_is_non_increasing() {
        let w = two_blobs();
        let mut rng = Xoshiro256Plus::seed_from_u64(11);
        let mut h = random_init(2, &w, &mut rng);
        let mut previous = reconstruction_error(&w, &h);
        for _ in 0..100 {
            update_step(&mut h, &w);
            let current = reconstruction_error(&w, &h);
            assert!(current <= previous + 1e-12);
            previous = current;
        }
    }

    #[test]
    fn separated_blobs_are_recovered() {
        let w = two_blobs();
        let model = SymNmf::params(2).check().unwrap().fit(&w).unwrap();
        let labels = model.predict();
        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[2], labels[3]);
        assert_ne!(labels[0], labels[2]);
    }

    #[test]
    fn cap_is_a_normal_exit() {
        let w = two_blobs();
        let model = SymNmf::params(2)
            .tolerance(1e-30)
            .max_n_iterations(5)
            .check()
            .unwrap()
            .fit(&w)
            .unwrap();
        assert_eq!(model.n_iterations(), 5);
        assert_eq!(model.association().dim(), (4, 2));
    }

    #[test]
    fn rank_must_be_below_sample_count() {
        let w = two_blobs();
        let res = SymNmf::<f64>::params(4).check().unwrap().fit(&w);
        assert!(matches!(
            res,
            Err(Error::InvalidRank {
                rank: 4,
                samples: 4
            })
        ));
    }

    #[test]
    fn non_square_input_is_rejected() {
        let w = array![[0.0, 0.5, 0.1], [0.5, 0.0, 0.2]];
        let res = SymNmf::<f64>::params(1).check().unwrap().fit(&w);
        assert!(matches!(res, Err(Error::DimensionMismatch { .. })));
    }

    #[test]
    fn fixed_seed_is_reproducible() {
        let w = two_blobs();
        let a = SymNmf::params(2).check().unwrap().fit(&w).unwrap();
        let b = SymNmf::params(2).check().unwrap().fit(&w).unwrap();
        assert_abs_diff_eq!(a.association(), b.association());
    }

    #[test]
    fn argmax_breaks_ties_towards_lowest_index() {
        let row = array![0.3, 0.7, 0.7];
        assert_eq!(row_argmax(row.view()), 1);
        let flat = array![0.5, 0.5];
        assert_eq!(row_argmax(flat.view()), 0);
    }

    #[test]
    fn seed_shape_is_checked() {
        let w = two_blobs();
        let params = SymNmf::<f64>::params(2).check().unwrap();
        let res = params.fit_from(Array2::ones((3, 2)), &w);
        assert!(matches!(res, Err(Error::DimensionMismatch { .. })));
    }
}
