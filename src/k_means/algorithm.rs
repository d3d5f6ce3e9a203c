use ndarray::{s, Array1, Array2, ArrayBase, Axis, Data, DataMut, Ix1, Ix2, Zip};

use crate::distance::squared_distance;
use crate::error::{Error, Result};
use crate::k_means::hyperparams::{KMeansParams, KMeansValidParams};
use crate::Float;

#[derive(Clone, Debug, PartialEq)]
/// K-means clustering aims to partition a set of unlabeled observations into
/// clusters, where each observation belongs to the cluster with the nearest
/// mean.
///
/// The mean of the points within a cluster is called *centroid*. Given the
/// set of centroids, you can assign an observation to a cluster choosing the
/// nearest centroid.
///
/// This is the classical Lloyd's algorithm with two deliberate departures
/// from the textbook version, kept for reproducibility and comparability
/// with the SymNMF pipeline:
///
/// * initial centroids are the first `n_clusters` points in input order,
///   never randomly sampled;
/// * a centroid that ends an iteration with no assigned points is replaced
///   by the all-zero vector rather than keeping its previous position.
///
/// Assignment and update are repeated until every centroid moves by less
/// than `tolerance` in one iteration, or until `max_n_iterations` is
/// exhausted. The model only stores the final centroids; per-point labels
/// are produced afterwards by [`predict`](KMeans::predict) using the same
/// nearest-centroid rule as the assignment step.
///
/// ## Example
///
/// ```
/// use symnmf::{KMeans, ParamGuard};
/// use ndarray::array;
///
/// let points = array![[0.0, 0.0], [0.0, 1.0], [10.0, 10.0], [10.0, 11.0]];
/// let model = KMeans::params(2).check().unwrap().fit(&points).unwrap();
/// let labels = model.predict(&points);
/// assert_eq!(labels.to_vec(), vec![0, 0, 1, 1]);
/// ```
pub struct KMeans<F: Float> {
    centroids: Array2<F>,
    n_iterations: u64,
}

impl<F: Float> KMeans<F> {
    pub fn params(n_clusters: usize) -> KMeansParams<F> {
        KMeansParams::new(n_clusters)
    }

    /// Return the set of centroids as a 2-dimensional matrix with shape
    /// `(n_centroids, n_features)`.
    pub fn centroids(&self) -> &Array2<F> {
        &self.centroids
    }

    /// Number of assign/update iterations actually performed.
    pub fn n_iterations(&self) -> u64 {
        self.n_iterations
    }

    /// Given an input matrix `observations`, with shape
    /// `(n_observations, n_features)`, `predict` returns, for each
    /// observation, the index of the closest cluster/centroid. Ties break
    /// towards the lowest centroid index.
    pub fn predict(&self, observations: &ArrayBase<impl Data<Elem = F>, Ix2>) -> Array1<usize> {
        let mut memberships = Array1::zeros(observations.nrows());
        update_cluster_memberships(&self.centroids, observations, &mut memberships);
        memberships
    }
}

impl<F: Float> KMeansValidParams<F> {
    /// Given an input matrix `observations`, with shape
    /// `(n_observations, n_features)`, `fit` identifies `n_clusters`
    /// centroids based on the training data distribution.
    ///
    /// Fails with [`Error::InvalidRank`] when more clusters than
    /// observations are requested.
    pub fn fit(&self, observations: &ArrayBase<impl Data<Elem = F>, Ix2>) -> Result<KMeans<F>> {
        let n_samples = observations.nrows();
        let n_clusters = self.n_clusters();
        if n_clusters > n_samples {
            return Err(Error::InvalidRank {
                rank: n_clusters,
                samples: n_samples,
            });
        }

        // Deterministic initialisation: the first k observations in input
        // order become the starting centroids.
        let mut centroids = observations.slice(s![..n_clusters, ..]).to_owned();
        let mut memberships = Array1::zeros(n_samples);
        let mut n_iterations = 0;

        for _ in 0..self.max_n_iterations() {
            update_cluster_memberships(&centroids, observations, &mut memberships);
            let new_centroids = compute_centroids(n_clusters, observations, &memberships);
            let converged = centroids
                .rows()
                .into_iter()
                .zip(new_centroids.rows())
                .all(|(old, new)| squared_distance(&old, &new).sqrt() < self.tolerance());
            centroids = new_centroids;
            n_iterations += 1;
            if converged {
                break;
            }
        }

        Ok(KMeans {
            centroids,
            n_iterations,
        })
    }
}

/// `compute_centroids` returns a 2-dimensional array, where the i-th row
/// corresponds to the i-th cluster.
///
/// A cluster with no members keeps the all-zero accumulator as its centroid.
/// Resetting to zero instead of holding the previous position changes which
/// clusters survive, so downstream label counts depend on it staying this
/// way.
fn compute_centroids<F: Float>(
    n_clusters: usize,
    // (n_observations, n_features)
    observations: &ArrayBase<impl Data<Elem = F>, Ix2>,
    // (n_observations,)
    cluster_memberships: &ArrayBase<impl Data<Elem = usize>, Ix1>,
) -> Array2<F> {
    let mut counts: Array1<usize> = Array1::zeros(n_clusters);
    let mut centroids = Array2::zeros((n_clusters, observations.ncols()));

    Zip::from(observations.rows())
        .and(cluster_memberships)
        .for_each(|observation, &cluster_membership| {
            let mut centroid = centroids.row_mut(cluster_membership);
            centroid += &observation;
            counts[cluster_membership] += 1;
        });

    Zip::from(centroids.rows_mut())
        .and(&counts)
        .for_each(|mut centroid, &count| {
            if count > 0 {
                centroid /= F::cast(count);
            }
        });
    centroids
}

// Update `cluster_memberships` with the index of the cluster each
// observation belongs to.
fn update_cluster_memberships<F: Float>(
    centroids: &ArrayBase<impl Data<Elem = F>, Ix2>,
    observations: &ArrayBase<impl Data<Elem = F>, Ix2>,
    cluster_memberships: &mut ArrayBase<impl DataMut<Elem = usize>, Ix1>,
) {
    Zip::from(observations.axis_iter(Axis(0)))
        .and(cluster_memberships)
        .for_each(|observation, cluster_membership| {
            *cluster_membership = closest_centroid(centroids, &observation).0
        });
}

/// Given a matrix of centroids with shape (n_centroids, n_features) and an
/// observation, return the index of the closest centroid and its squared
/// distance. The first minimum in index order wins, so ties break towards
/// the lowest centroid index.
pub(crate) fn closest_centroid<F: Float>(
    // (n_centroids, n_features)
    centroids: &ArrayBase<impl Data<Elem = F>, Ix2>,
    // (n_features)
    observation: &ArrayBase<impl Data<Elem = F>, Ix1>,
) -> (usize, F) {
    let mut closest_index = 0;
    let mut minimum_distance = squared_distance(&centroids.row(0), observation);

    for (centroid_index, centroid) in centroids.rows().into_iter().enumerate() {
        let distance = squared_distance(&centroid, observation);
        if distance < minimum_distance {
            closest_index = centroid_index;
            minimum_distance = distance;
        }
    }
    (closest_index, minimum_distance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParamGuard;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn worked_example_converges_quickly() {
        let points = array![[0.0, 0.0], [0.0, 1.0], [10.0, 10.0], [10.0, 11.0]];
        let model = KMeans::params(2).check().unwrap().fit(&points).unwrap();

        assert_abs_diff_eq!(
            model.centroids(),
            &array![[0.0, 0.5], [10.0, 10.5]],
            epsilon = 1e-10
        );
        // The centroids reach their final position on the second update;
        // one more iteration is needed to observe the sub-tolerance move.
        assert!(model.n_iterations() <= 3);
        assert_eq!(model.predict(&points).to_vec(), vec![0, 0, 1, 1]);
    }

    #[test]
    fn returned_centroids_are_a_fixed_point() {
        let points = array![
            [0.0, 0.0],
            [0.5, 0.1],
            [0.1, 0.4],
            [8.0, 8.0],
            [8.2, 7.9],
            [-5.0, 3.0]
        ];
        let model = KMeans::params(3).check().unwrap().fit(&points).unwrap();
        let labels = model.predict(&points);
        let recomputed = compute_centroids(3, &points, &labels);
        assert_abs_diff_eq!(model.centroids(), &recomputed, epsilon = 1e-10);
    }

    #[test]
    fn empty_cluster_becomes_zero_centroid() {
        let observations = array![[1.0, 2.0]];
        let memberships = array![0];
        let centroids = compute_centroids(2, &observations, &memberships);
        assert_abs_diff_eq!(centroids, array![[1.0, 2.0], [0.0, 0.0]]);
    }

    #[test]
    fn duplicate_points_leave_a_zero_centroid() {
        // Both points tie to centroid 0, so centroid 1 is starved and reset
        // to the origin.
        let points = array![[1.0, 1.0], [1.0, 1.0]];
        let model = KMeans::params(2).check().unwrap().fit(&points).unwrap();
        assert_abs_diff_eq!(model.centroids(), &array![[1.0, 1.0], [0.0, 0.0]]);
    }

    #[test]
    fn more_clusters_than_points_is_invalid() {
        let points = array![[0.0, 0.0], [1.0, 1.0]];
        let res = KMeans::<f64>::params(3).check().unwrap().fit(&points);
        assert!(matches!(
            res,
            Err(Error::InvalidRank {
                rank: 3,
                samples: 2
            })
        ));
    }

    #[test]
    fn one_cluster_per_point_is_allowed() {
        let points = array![[0.0, 0.0], [5.0, 5.0]];
        let model = KMeans::params(2).check().unwrap().fit(&points).unwrap();
        assert_eq!(model.predict(&points).to_vec(), vec![0, 1]);
    }

    #[test]
    fn nothing_is_closer_than_self() {
        let centroids = array![[0.0, 0.0], [4.0, 1.0], [-3.0, 7.0]];
        for (index, centroid) in centroids.rows().into_iter().enumerate() {
            assert_eq!(closest_centroid(&centroids, &centroid).0, index);
        }
    }

    #[test]
    fn assignment_ties_break_towards_lowest_index() {
        let centroids = array![[0.0, 0.0], [2.0, 0.0]];
        let observation = array![1.0, 0.0];
        assert_eq!(closest_centroid(&centroids, &observation).0, 0);
    }
}
