//! Runs both clustering pipelines over the same point set and scores them
//! against each other.

use ndarray::{ArrayBase, Data, Ix2};
use rand::Rng;

use crate::error::Result;
use crate::graph;
use crate::param_guard::ParamGuard;
use crate::silhouette::silhouette_score;
use crate::{Float, KMeans, SymNmf};

/// Silhouette scores of the two clustering methods over one point set.
#[derive(Clone, Debug, PartialEq)]
pub struct Comparison<F: Float> {
    /// Score of the SymNMF labeling
    pub symnmf: F,
    /// Score of the K-means labeling
    pub kmeans: F,
}

/// Clusters `points` into `k` clusters with both SymNMF and K-means and
/// returns the silhouette score of each labeling.
///
/// The SymNMF side builds the normalized similarity graph, factorizes it
/// starting from a seed matrix drawn from `rng`, and labels each point by
/// the row-wise argmax of the association matrix. The K-means side runs
/// Lloyd's iteration on the raw points and labels each point by its nearest
/// final centroid. Both methods use their default tolerances and iteration
/// caps.
///
/// Every failure along the way propagates as the specific error raised at
/// the point of detection; no default score is ever substituted.
pub fn compare<F: Float, R: Rng + Clone>(
    points: &ArrayBase<impl Data<Elem = F>, Ix2>,
    n_clusters: usize,
    rng: R,
) -> Result<Comparison<F>> {
    let w = graph::normalized_similarity(points)?;
    let symnmf_model = SymNmf::params_with_rng(n_clusters, rng).check()?.fit(&w)?;
    let symnmf_labels = symnmf_model.predict();

    let kmeans_model = KMeans::params(n_clusters).check()?.fit(points)?;
    let kmeans_labels = kmeans_model.predict(points);

    Ok(Comparison {
        symnmf: silhouette_score(points, &symnmf_labels)?,
        kmeans: silhouette_score(points, &kmeans_labels)?,
    })
}
