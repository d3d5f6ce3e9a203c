//! Pairwise distance and affinity kernel.

use ndarray::{ArrayBase, Data, Ix1};

use crate::error::{Error, Result};
use crate::Float;

/// Squared Euclidean distance between two points of equal dimension.
///
/// The dimension check is the caller's responsibility; the graph builder and
/// the K-means assignment loop only ever pass rows of the same matrix.
pub(crate) fn squared_distance<F: Float>(
    x: &ArrayBase<impl Data<Elem = F>, Ix1>,
    y: &ArrayBase<impl Data<Elem = F>, Ix1>,
) -> F {
    x.iter()
        .zip(y.iter())
        .map(|(&a, &b)| (a - b) * (a - b))
        .sum()
}

/// Euclidean distance between two points.
///
/// Fails with [`Error::DimensionMismatch`] if the points do not live in the
/// same space.
pub fn euclidean_distance<F: Float>(
    x: &ArrayBase<impl Data<Elem = F>, Ix1>,
    y: &ArrayBase<impl Data<Elem = F>, Ix1>,
) -> Result<F> {
    if x.len() != y.len() {
        return Err(Error::DimensionMismatch {
            expected: x.len(),
            found: y.len(),
        });
    }
    Ok(squared_distance(x, y).sqrt())
}

/// Gaussian affinity `exp(-‖x - y‖² / 2)` between two points.
///
/// Identical points have affinity one; zeroing the diagonal of the
/// similarity matrix is the graph builder's job, not the kernel's.
pub fn gaussian_affinity<F: Float>(
    x: &ArrayBase<impl Data<Elem = F>, Ix1>,
    y: &ArrayBase<impl Data<Elem = F>, Ix1>,
) -> Result<F> {
    if x.len() != y.len() {
        return Err(Error::DimensionMismatch {
            expected: x.len(),
            found: y.len(),
        });
    }
    Ok((-squared_distance(x, y) / F::cast(2.0)).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn euclidean_distance_works() {
        let x = array![0.0, 3.0];
        let y = array![4.0, 0.0];
        assert_abs_diff_eq!(euclidean_distance(&x, &y).unwrap(), 5.0);
        assert_abs_diff_eq!(euclidean_distance(&x, &x).unwrap(), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let x = array![1.0, -2.0, 0.5];
        let y = array![0.0, 4.0, 2.5];
        assert_abs_diff_eq!(
            euclidean_distance(&x, &y).unwrap(),
            euclidean_distance(&y, &x).unwrap()
        );
    }

    #[test]
    fn mismatched_dimensions_are_rejected() {
        let x = array![1.0, 2.0];
        let y = array![1.0, 2.0, 3.0];
        let res = euclidean_distance(&x, &y);
        assert!(matches!(
            res,
            Err(Error::DimensionMismatch {
                expected: 2,
                found: 3
            })
        ));
        assert!(gaussian_affinity(&x, &y).is_err());
    }

    #[test]
    fn affinity_of_identical_points_is_one() {
        let x = array![1.0, 2.0, 3.0];
        assert_abs_diff_eq!(gaussian_affinity(&x, &x).unwrap(), 1.0);
    }

    #[test]
    fn affinity_decays_with_distance() {
        let origin = array![0.0, 0.0];
        let near = array![0.1, 0.0];
        let far = array![10.0, 0.0];
        let a_near = gaussian_affinity(&origin, &near).unwrap();
        let a_far = gaussian_affinity(&origin, &far).unwrap();
        assert!(a_near > a_far);
        assert!(a_far > 0.0);
        assert!(a_near <= 1.0);
        assert_abs_diff_eq!(a_near, (-0.005f64).exp(), epsilon = 1e-12);
    }
}
