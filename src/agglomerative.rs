use crate::data_wrappers::{CandidatePair, MergeStep};
use crate::distance::squared_euclidean_distance;
use crate::union_find::UnionFind;
use crate::validation::DataValidator;
use crate::ClusteringError;
use num_traits::Float;
use std::collections::{BinaryHeap, HashMap};

/// The outcome of an agglomerative clustering run.
#[derive(Debug, Clone, PartialEq)]
pub struct AgglomerativeFit<T> {
    /// One cluster label per input point, in input order. Labels are in
    /// `0..n_clusters`, numbered by each cluster's first member index.
    pub labels: Vec<i32>,
    /// The merge events performed to reach `n_clusters`, in merge order.
    /// Ward linkage guarantees the recorded distances are non-decreasing.
    pub dendrogram: Vec<MergeStep<T>>,
}

/// State of an active cluster during the merge loop.
#[derive(Debug, Clone)]
struct WardCluster<T> {
    centroid: Vec<T>,
    size: usize,
}

/// Agglomerative hierarchical clustering under Ward's variance-minimizing
/// linkage. Generic over floating point numeric types.
///
/// Every point starts as a singleton cluster; the pair of clusters whose
/// merge least increases the total within-cluster variance is merged until
/// `n_clusters` remain. Candidate merges live in a priority queue and only
/// pairs involving a newly formed cluster are ever (re)computed, from the
/// maintained sizes and centroids, so a run is O(n² log n) rather than the
/// O(n³) of rebuilding the full cost matrix at each step.
///
/// # Examples
/// ```
///use flatclust::Agglomerative;
///
///let data: Vec<Vec<f32>> = vec![
///    vec![1.1, 1.1],
///    vec![1.2, 1.1],
///    vec![0.9, 1.0],
///    vec![5.0, 5.1],
///    vec![5.1, 5.0],
///];
///let clusterer = Agglomerative::new(&data, 2);
///let result = clusterer.fit().unwrap();
///assert_eq!(result.labels, vec![0, 0, 0, 1, 1]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Agglomerative<'a, T> {
    data: &'a [Vec<T>],
    n_samples: usize,
    n_clusters: usize,
}

impl<'a, T: Float> Agglomerative<'a, T> {
    /// Creates an instance of the agglomerative clustering model.
    ///
    /// # Parameters
    /// * `data` - a reference to the data to cluster, a collection of vectors
    ///            of floating point numbers. The vectors must all be of the
    ///            same dimensionality and contain no infinite values.
    /// * `n_clusters` - the number of clusters to stop merging at.
    ///
    /// # Returns
    /// * The agglomerative clustering model instance.
    pub fn new(data: &'a [Vec<T>], n_clusters: usize) -> Self {
        let n_samples = data.len();
        Agglomerative {
            data,
            n_samples,
            n_clusters,
        }
    }

    /// Performs clustering on the list of vectors passed to the constructor.
    ///
    /// # Returns
    /// * A result that, if successful, contains the cluster labels and the
    ///   recorded dendrogram. Requesting `n_clusters` equal to the number of
    ///   samples returns each point in its own cluster and an empty
    ///   dendrogram; requesting 1 returns all points under a single label.
    ///   An error will be returned if the input data is invalid or
    ///   `n_clusters` is outside `1..=n_samples`.
    pub fn fit(&self) -> Result<AgglomerativeFit<T>, ClusteringError> {
        self.validate_arguments()?;
        DataValidator::new(self.data).validate_input_data()?;

        // Cluster ids index this vec: 0..n_samples are the singletons, merged
        // clusters are appended with ids n_samples, n_samples + 1, ...
        let mut clusters: Vec<Option<WardCluster<T>>> = self
            .data
            .iter()
            .map(|point| {
                Some(WardCluster {
                    centroid: point.clone(),
                    size: 1,
                })
            })
            .collect();

        let mut heap = self.initial_candidates(&clusters);
        let mut membership = UnionFind::new(self.n_samples);
        // A representative point of each cluster, indexed by cluster id
        let mut representatives: Vec<usize> = (0..self.n_samples).collect();
        let mut dendrogram: Vec<MergeStep<T>> = Vec::with_capacity(self.n_samples - self.n_clusters);
        let mut active = self.n_samples;

        while active > self.n_clusters {
            let pair = heap.pop().expect("Merge candidates exhausted");
            // Stale entry: one of the clusters was already merged away
            if clusters[pair.left].is_none() || clusters[pair.right].is_none() {
                continue;
            }
            let left = clusters[pair.left].take().expect("Active cluster");
            let right = clusters[pair.right].take().expect("Active cluster");

            let new_id = clusters.len();
            let size = left.size + right.size;
            let centroid = Self::weighted_centroid(&left, &right);
            dendrogram.push(MergeStep {
                left_cluster_id: pair.left,
                right_cluster_id: pair.right,
                new_cluster_id: new_id,
                distance: pair.cost,
                size,
            });
            membership.union(representatives[pair.left], representatives[pair.right]);
            representatives.push(representatives[pair.left]);

            // Only pairs involving the new cluster need costs; everything
            // else in the heap stays valid
            for (other_id, slot) in clusters.iter().enumerate() {
                if let Some(other) = slot {
                    heap.push(CandidatePair {
                        cost: Self::ward_cost(&centroid, size, &other.centroid, other.size),
                        left: other_id,
                        right: new_id,
                    });
                }
            }
            clusters.push(Some(WardCluster { centroid, size }));
            active -= 1;
        }

        Ok(AgglomerativeFit {
            labels: self.label_points(&mut membership),
            dendrogram,
        })
    }

    fn validate_arguments(&self) -> Result<(), ClusteringError> {
        if self.n_clusters < 1 || self.n_clusters > self.n_samples {
            return Err(ClusteringError::InvalidArgument(format!(
                "n_clusters must be in 1..={}, got {}",
                self.n_samples, self.n_clusters
            )));
        }
        Ok(())
    }

    fn initial_candidates(&self, clusters: &[Option<WardCluster<T>>]) -> BinaryHeap<CandidatePair<T>> {
        let mut heap = BinaryHeap::with_capacity(self.n_samples * (self.n_samples - 1) / 2);
        for left in 0..self.n_samples {
            for right in (left + 1)..self.n_samples {
                let (a, b) = (
                    clusters[left].as_ref().expect("Singleton cluster"),
                    clusters[right].as_ref().expect("Singleton cluster"),
                );
                heap.push(CandidatePair {
                    cost: Self::ward_cost(&a.centroid, a.size, &b.centroid, b.size),
                    left,
                    right,
                });
            }
        }
        heap
    }

    /// The increase in total within-cluster variance caused by merging two
    /// clusters: `|A|·|B| / (|A|+|B|) · d²(centroid_A, centroid_B)`.
    fn ward_cost(centroid_a: &[T], size_a: usize, centroid_b: &[T], size_b: usize) -> T {
        let size_a = T::from(size_a).expect("Failed to convert");
        let size_b = T::from(size_b).expect("Failed to convert");
        size_a * size_b / (size_a + size_b) * squared_euclidean_distance(centroid_a, centroid_b)
    }

    fn weighted_centroid(left: &WardCluster<T>, right: &WardCluster<T>) -> Vec<T> {
        let size_left = T::from(left.size).expect("Failed to convert");
        let size_right = T::from(right.size).expect("Failed to convert");
        let total = size_left + size_right;
        left.centroid
            .iter()
            .zip(&right.centroid)
            .map(|(&l, &r)| (l * size_left + r * size_right) / total)
            .collect()
    }

    /// Labels every point with its active cluster, numbering clusters in
    /// order of their first member index.
    fn label_points(&self, membership: &mut UnionFind) -> Vec<i32> {
        let mut labels = Vec::with_capacity(self.n_samples);
        let mut root_labels: HashMap<usize, i32> = HashMap::new();
        let mut next_label = 0;
        for point in 0..self.n_samples {
            let root = membership.find(point);
            let label = *root_labels.entry(root).or_insert_with(|| {
                let label = next_label;
                next_label += 1;
                label
            });
            labels.push(label);
        }
        labels
    }
}

impl<'a, T: Float> crate::Clusterer for Agglomerative<'a, T> {
    fn fit_predict(&self) -> Result<Vec<i32>, ClusteringError> {
        self.fit().map(|fit| fit.labels)
    }
}
