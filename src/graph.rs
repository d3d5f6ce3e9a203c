//! Construction of the normalized similarity graph.
//!
//! Raw points are turned into three matrices, each built from the previous
//! one: the Gaussian similarity matrix `A`, the diagonal degree matrix `D`
//! and the normalized matrix `W = D^{-1/2} A D^{-1/2}`. `W` is what the
//! SymNMF optimizer factorizes.

use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix1, Ix2};

use crate::distance::squared_distance;
use crate::error::{Error, Result};
use crate::Float;

/// Computes the pairwise similarity matrix of a point set.
///
/// The result is `n x n`, symmetric with a zero diagonal; off-diagonal
/// entries are the Gaussian affinity `exp(-‖xᵢ - xⱼ‖² / 2)`, which lies in
/// `(0, 1]`. Runs in `O(n² d)`, computing each pair once.
pub fn similarity_matrix<F: Float>(points: &ArrayBase<impl Data<Elem = F>, Ix2>) -> Array2<F> {
    let n = points.nrows();
    let mut similarity = Array2::zeros((n, n));
    for i in 0..n {
        for j in (i + 1)..n {
            let affinity =
                (-squared_distance(&points.row(i), &points.row(j)) / F::cast(2.0)).exp();
            similarity[(i, j)] = affinity;
            similarity[(j, i)] = affinity;
        }
    }
    similarity
}

/// Computes the per-point degrees, i.e. the row sums of the similarity
/// matrix.
///
/// Fails with [`Error::SingularDegree`] if any degree is zero: an isolated
/// point has no defined normalization. With the Gaussian kernel this only
/// happens when every affinity of a row underflows to zero.
pub fn degree_vector<F: Float>(
    similarity: &ArrayBase<impl Data<Elem = F>, Ix2>,
) -> Result<Array1<F>> {
    let degrees = similarity.sum_axis(Axis(1));
    for (i, &degree) in degrees.iter().enumerate() {
        if degree <= F::zero() {
            return Err(Error::SingularDegree(i));
        }
    }
    Ok(degrees)
}

/// Embeds the degrees into a full diagonal matrix.
///
/// Only the `ddg` output goal needs the `n x n` form; the normalization
/// below works on the vector directly.
pub fn degree_matrix<F: Float>(
    similarity: &ArrayBase<impl Data<Elem = F>, Ix2>,
) -> Result<Array2<F>> {
    let degrees = degree_vector(similarity)?;
    Ok(Array2::from_diag(&degrees))
}

/// Normalizes a similarity matrix by its degrees:
/// `W[i][j] = A[i][j] / sqrt(D[i][i] * D[j][j])`.
///
/// `D^{-1/2}` is applied as a vector row- and column-wise instead of forming
/// the inverse matrix, which keeps the operation `O(n²)` and avoids
/// amplifying rounding error through two full matrix products. Symmetry and
/// the zero diagonal of `A` carry over to `W`.
pub fn normalized_matrix<F: Float>(
    similarity: &ArrayBase<impl Data<Elem = F>, Ix2>,
    degrees: &ArrayBase<impl Data<Elem = F>, Ix1>,
) -> Array2<F> {
    let inv_sqrt = degrees.mapv(|d| F::one() / d.sqrt());
    let mut normalized = similarity.to_owned();
    for ((i, j), w) in normalized.indexed_iter_mut() {
        *w = *w * inv_sqrt[i] * inv_sqrt[j];
    }
    normalized
}

/// Convenience chain from raw points to the normalized matrix `W`.
pub fn normalized_similarity<F: Float>(
    points: &ArrayBase<impl Data<Elem = F>, Ix2>,
) -> Result<Array2<F>> {
    let similarity = similarity_matrix(points);
    let degrees = degree_vector(&similarity)?;
    Ok(normalized_matrix(&similarity, &degrees))
}
