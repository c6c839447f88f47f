use crate::distance::squared_euclidean_distance;
use crate::validation::DataValidator;
use crate::{ClusteringError, KMeansHyperParams};
use num_traits::Float;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Possible strategies for choosing the initial centroids.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KMeansInit {
    /// Greedy farthest seeding: the first centroid is chosen uniformly at
    /// random, each subsequent one with probability proportional to its
    /// squared distance to the nearest centroid chosen so far.
    KMeansPlusPlus,
    /// Uniform random sampling of distinct points.
    Random,
}

/// The outcome of a K-means run.
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansFit<T> {
    /// One cluster label per input point, in input order. Labels are in
    /// `0..n_clusters`; K-means never produces noise labels.
    pub labels: Vec<i32>,
    /// The final centroid of each cluster, indexed by cluster label.
    pub centroids: Vec<Vec<T>>,
    /// Number of Lloyd iterations performed.
    pub iterations: usize,
    /// Whether the run reached a fixed point before `max_iterations`. A
    /// non-converged run still returns its best-effort labelling.
    pub converged: bool,
    /// The within-cluster sum of squared distances of the final labelling.
    pub inertia: T,
}

/// K-means clustering using Lloyd's algorithm. Generic over floating point
/// numeric types.
///
/// The result is a local optimum of the within-cluster sum of squared
/// distances, not a global one; quality depends on the initialization, which
/// is why k-means++ seeding is the default.
#[derive(Debug, Clone, PartialEq)]
pub struct KMeans<'a, T> {
    data: &'a [Vec<T>],
    n_samples: usize,
    hp: KMeansHyperParams,
}

impl<'a, T: Float> KMeans<'a, T> {
    /// Creates an instance of the K-means clustering model using a custom
    /// hyper parameter configuration.
    ///
    /// # Parameters
    /// * `data` - a reference to the data to cluster, a collection of vectors
    ///            of floating point numbers. The vectors must all be of the
    ///            same dimensionality and contain no infinite values.
    /// * `hyper_params` - the hyper parameter configuration.
    ///
    /// # Returns
    /// * The K-means model instance.
    ///
    /// # Examples
    /// ```
    ///use flatclust::{KMeans, KMeansHyperParams};
    ///
    ///let data: Vec<Vec<f32>> = vec![
    ///    vec![1.1, 1.1],
    ///    vec![1.2, 1.1],
    ///    vec![0.9, 1.0],
    ///    vec![5.0, 5.1],
    ///    vec![5.1, 5.0],
    ///    vec![4.9, 5.0],
    ///];
    ///let hyper_params = KMeansHyperParams::builder(2)
    ///    .max_iterations(100)
    ///    .seed(42)
    ///    .build();
    ///let clusterer = KMeans::new(&data, hyper_params);
    ///let result = clusterer.fit().unwrap();
    ///assert_eq!(result.labels.len(), 6);
    /// ```
    pub fn new(data: &'a [Vec<T>], hyper_params: KMeansHyperParams) -> Self {
        let n_samples = data.len();
        KMeans {
            data,
            n_samples,
            hp: hyper_params,
        }
    }

    /// Creates an instance of the K-means clustering model using the default
    /// hyper parameters for the given number of clusters.
    pub fn default_hyper_params(data: &'a [Vec<T>], n_clusters: usize) -> KMeans<'a, T> {
        let hyper_params = KMeansHyperParams::builder(n_clusters).build();
        KMeans::new(data, hyper_params)
    }

    /// Performs clustering on the list of vectors passed to the constructor.
    ///
    /// # Returns
    /// * A result that, if successful, contains the cluster labels, the final
    ///   centroids, the iteration count, the convergence flag and the final
    ///   inertia. Failing to converge within `max_iterations` is not an
    ///   error; it is reported through the `converged` flag. An error will be
    ///   returned if the input data is invalid or the cluster count is
    ///   outside `1..=n_samples`.
    pub fn fit(&self) -> Result<KMeansFit<T>, ClusteringError> {
        self.validate_arguments()?;
        DataValidator::new(self.data).validate_input_data()?;
        let centroids = self.init_centroids();
        Ok(self.run_lloyd(centroids, |data, centroids| {
            data.iter()
                .map(|point| Self::nearest_centroid(point, centroids))
                .collect()
        }))
    }

    fn validate_arguments(&self) -> Result<(), ClusteringError> {
        if self.hp.n_clusters < 1 || self.hp.n_clusters > self.n_samples {
            return Err(ClusteringError::InvalidArgument(format!(
                "n_clusters must be in 1..={}, got {}",
                self.n_samples, self.hp.n_clusters
            )));
        }
        if self.hp.max_iterations < 1 {
            return Err(ClusteringError::InvalidArgument(String::from(
                "max_iterations must be at least 1",
            )));
        }
        Ok(())
    }

    fn init_centroids(&self) -> Vec<Vec<T>> {
        let mut rng = match self.hp.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        match self.hp.init {
            KMeansInit::KMeansPlusPlus => self.init_kmeans_plus_plus(&mut rng),
            KMeansInit::Random => self.init_random(&mut rng),
        }
    }

    fn init_random(&self, rng: &mut StdRng) -> Vec<Vec<T>> {
        rand::seq::index::sample(rng, self.n_samples, self.hp.n_clusters)
            .into_iter()
            .map(|idx| self.data[idx].clone())
            .collect()
    }

    fn init_kmeans_plus_plus(&self, rng: &mut StdRng) -> Vec<Vec<T>> {
        let mut centroids: Vec<Vec<T>> = Vec::with_capacity(self.hp.n_clusters);
        let first = rng.gen_range(0..self.n_samples);
        centroids.push(self.data[first].clone());

        // Squared distance of each point to its nearest chosen centroid
        let mut min_dists: Vec<T> = self
            .data
            .iter()
            .map(|point| squared_euclidean_distance(point, &centroids[0]))
            .collect();

        while centroids.len() < self.hp.n_clusters {
            let total = min_dists.iter().fold(T::zero(), |acc, &d| acc + d);
            let chosen = if total > T::zero() {
                let threshold = T::from(rng.gen::<f64>()).expect("Failed to convert") * total;
                let mut cumulative = T::zero();
                let mut chosen = self.n_samples - 1;
                for (idx, &dist) in min_dists.iter().enumerate() {
                    cumulative = cumulative + dist;
                    if cumulative >= threshold {
                        chosen = idx;
                        break;
                    }
                }
                chosen
            } else {
                // Every point coincides with a centroid already
                rng.gen_range(0..self.n_samples)
            };
            let centroid = self.data[chosen].clone();
            for (min_dist, point) in min_dists.iter_mut().zip(self.data) {
                let dist = squared_euclidean_distance(point, &centroid);
                if dist < *min_dist {
                    *min_dist = dist;
                }
            }
            centroids.push(centroid);
        }
        centroids
    }

    fn run_lloyd<F>(&self, mut centroids: Vec<Vec<T>>, assign: F) -> KMeansFit<T>
    where
        F: Fn(&[Vec<T>], &[Vec<T>]) -> Vec<(usize, T)>,
    {
        let mut labels: Vec<usize> = vec![usize::MAX; self.n_samples];
        let mut converged = false;
        let mut iterations = 0;
        let mut inertia = T::zero();

        for _ in 0..self.hp.max_iterations {
            iterations += 1;
            let assignment = assign(self.data, &centroids);
            inertia = assignment.iter().fold(T::zero(), |acc, &(_, d)| acc + d);
            let new_labels: Vec<usize> = assignment.iter().map(|&(label, _)| label).collect();
            if new_labels == labels {
                converged = true;
                break;
            }
            let dists: Vec<T> = assignment.iter().map(|&(_, dist)| dist).collect();
            labels = new_labels;
            self.update_centroids(&labels, &dists, &mut centroids);
        }

        KMeansFit {
            labels: labels.into_iter().map(|label| label as i32).collect(),
            centroids,
            iterations,
            converged,
            inertia,
        }
    }

    /// Labels a point with the id of its nearest centroid under squared
    /// Euclidean distance. Ties go to the lowest cluster id.
    fn nearest_centroid(point: &[T], centroids: &[Vec<T>]) -> (usize, T) {
        let mut best = 0;
        let mut best_dist = T::infinity();
        for (idx, centroid) in centroids.iter().enumerate() {
            let dist = squared_euclidean_distance(point, centroid);
            if dist < best_dist {
                best_dist = dist;
                best = idx;
            }
        }
        (best, best_dist)
    }

    fn update_centroids(&self, labels: &[usize], dists: &[T], centroids: &mut [Vec<T>]) {
        let n_dims = self.data[0].len();
        let mut sums = vec![vec![T::zero(); n_dims]; self.hp.n_clusters];
        let mut counts = vec![0usize; self.hp.n_clusters];
        for (point, &label) in self.data.iter().zip(labels) {
            counts[label] += 1;
            for (sum, &coord) in sums[label].iter_mut().zip(point) {
                *sum = *sum + coord;
            }
        }

        // Points already claimed to reseed an empty cluster this iteration
        let mut reseeded: Vec<usize> = Vec::new();
        for cluster_id in 0..self.hp.n_clusters {
            if counts[cluster_id] == 0 {
                let farthest = self.farthest_point(dists, &reseeded);
                reseeded.push(farthest);
                centroids[cluster_id] = self.data[farthest].clone();
            } else {
                let count = T::from(counts[cluster_id]).expect("Failed to convert");
                centroids[cluster_id] = sums[cluster_id].iter().map(|&sum| sum / count).collect();
            }
        }
    }

    /// The point with the greatest distance to its own centroid, used to
    /// reseed an empty cluster.
    fn farthest_point(&self, dists: &[T], excluded: &[usize]) -> usize {
        let mut farthest = 0;
        let mut max_dist = T::neg_infinity();
        for (idx, &dist) in dists.iter().enumerate() {
            if !excluded.contains(&idx) && dist > max_dist {
                max_dist = dist;
                farthest = idx;
            }
        }
        farthest
    }
}

impl<'a, T: Float> crate::Clusterer for KMeans<'a, T> {
    fn fit_predict(&self) -> Result<Vec<i32>, ClusteringError> {
        self.fit().map(|fit| fit.labels)
    }
}

#[cfg(feature = "parallel")]
impl<'a, T: Float + Send + Sync> KMeans<'a, T> {
    /// Parallel version of [`KMeans::fit`]. The assignment step maps points
    /// in parallel; labels are collected in input order, so results are
    /// identical to the serial version.
    pub fn fit_par(&self) -> Result<KMeansFit<T>, ClusteringError> {
        self.validate_arguments()?;
        DataValidator::new(self.data).validate_input_data()?;
        let centroids = self.init_centroids();
        Ok(self.run_lloyd(centroids, |data, centroids| {
            data.par_iter()
                .map(|point| Self::nearest_centroid(point, centroids))
                .collect()
        }))
    }
}
