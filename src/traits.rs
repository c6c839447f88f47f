use crate::ClusteringError;

/// Common interface for hard clustering algorithms (one label per point),
/// implemented by every clustering model in this crate. Useful for callers
/// running several algorithms over the same data and comparing the results
/// uniformly.
pub trait Clusterer {
    /// Runs the algorithm and returns one cluster label per input point, in
    /// input order. `-1` marks noise for algorithms that produce it.
    fn fit_predict(&self) -> Result<Vec<i32>, ClusteringError>;
}
