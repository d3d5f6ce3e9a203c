//! Silhouette score, the clustering-quality metric used to compare the two
//! pipelines.

use ndarray::{ArrayBase, Data, Ix1, Ix2};

use crate::distance::squared_distance;
use crate::error::{Error, Result};
use crate::Float;

/// Evaluates the quality of a clustering using euclidean distance.
///
/// Given a labeled point set, the silhouette score for each sample is
/// computed as the relative difference between the average distance of the
/// sample to other samples in the same cluster (`a`) and the minimum
/// average distance of the sample to samples in another cluster (`b`):
/// `s = (b - a) / max(a, b)`. This value goes from -1 to +1 as the point
/// moves from being closer (on average) to another cluster to being firmly
/// inside its own. A sample alone in its cluster scores 0. The score of the
/// clustering is the mean over all samples.
///
/// Fails with [`Error::MetricPrecondition`] when fewer than two distinct
/// labels are present, and with [`Error::DimensionMismatch`] when the label
/// vector does not match the number of points. Callers must treat either
/// failure as fatal instead of substituting a default score.
pub fn silhouette_score<F: Float>(
    points: &ArrayBase<impl Data<Elem = F>, Ix2>,
    labels: &ArrayBase<impl Data<Elem = usize>, Ix1>,
) -> Result<F> {
    let n_samples = points.nrows();
    if labels.len() != n_samples {
        return Err(Error::DimensionMismatch {
            expected: n_samples,
            found: labels.len(),
        });
    }

    let n_labels = match labels.iter().max() {
        Some(&max) => max + 1,
        None => {
            return Err(Error::MetricPrecondition(
                "cannot score an empty point set".into(),
            ))
        }
    };
    let mut counts = vec![0usize; n_labels];
    for &label in labels.iter() {
        counts[label] += 1;
    }
    if counts.iter().filter(|&&count| count > 0).count() < 2 {
        return Err(Error::MetricPrecondition(
            "at least 2 distinct labels are required".into(),
        ));
    }

    let mut total = F::zero();
    let mut sums = vec![F::zero(); n_labels];
    for (i, sample) in points.rows().into_iter().enumerate() {
        // Distance mass from `sample` to every cluster, own cluster included.
        for sum in sums.iter_mut() {
            *sum = F::zero();
        }
        for (j, other) in points.rows().into_iter().enumerate() {
            sums[labels[j]] += squared_distance(&sample, &other).sqrt();
        }

        let own = labels[i];
        if counts[own] == 1 {
            // Singleton clusters contribute a flat 0.
            continue;
        }
        // The own cluster averages by excluding the sample itself.
        let a = sums[own] / F::cast(counts[own] - 1);
        // Keep the minimum average distance to any other non-empty cluster.
        let mut b = F::infinity();
        for (label, (&sum, &count)) in sums.iter().zip(counts.iter()).enumerate() {
            if label != own && count > 0 {
                b = b.min(sum / F::cast(count));
            }
        }

        let denominator = a.max(b);
        if denominator > F::zero() {
            total = total + (b - a) / denominator;
        }
    }

    Ok(total / F::cast(n_samples))
}
