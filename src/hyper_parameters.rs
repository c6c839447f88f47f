use crate::distance::DistanceMetric;
use crate::kmeans::KMeansInit;
use crate::neighbourhood::NnAlgorithm;

// Defaults for parameters
const MAX_ITERATIONS_DEFAULT: usize = 300;
const KMEANS_INIT_DEFAULT: KMeansInit = KMeansInit::KMeansPlusPlus;
const EPSILON_DEFAULT: f64 = 0.5;
const MIN_SAMPLES_DEFAULT: usize = 5;
const DISTANCE_METRIC_DEFAULT: DistanceMetric = DistanceMetric::Euclidean;
const NN_ALGORITHM_DEFAULT: NnAlgorithm = NnAlgorithm::Auto;

/// A wrapper around the hyper parameters used in K-means clustering.
/// Out-of-range values are not rejected here; `KMeans::fit` validates them
/// before any computation begins.
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansHyperParams {
    pub(crate) n_clusters: usize,
    pub(crate) max_iterations: usize,
    pub(crate) init: KMeansInit,
    pub(crate) seed: Option<u64>,
}

/// Builder object to set custom K-means hyper parameters.
pub struct KMeansHyperParamsBuilder {
    n_clusters: usize,
    max_iterations: Option<usize>,
    init: Option<KMeansInit>,
    seed: Option<u64>,
}

impl KMeansHyperParams {
    /// Enters the builder pattern, allowing custom hyper parameters to be set
    /// using various setter methods.
    ///
    /// # Parameters
    /// * `n_clusters` - the number of clusters to partition the data into.
    ///
    /// # Returns
    /// * the hyper parameter configuration builder
    pub fn builder(n_clusters: usize) -> KMeansHyperParamsBuilder {
        KMeansHyperParamsBuilder {
            n_clusters,
            max_iterations: None,
            init: None,
            seed: None,
        }
    }
}

impl KMeansHyperParamsBuilder {
    /// Sets the maximum number of Lloyd iterations before the algorithm gives
    /// up on convergence and returns its best-effort labelling. Defaults to 300.
    pub fn max_iterations(mut self, max_iterations: usize) -> KMeansHyperParamsBuilder {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Sets the centroid initialization strategy. Defaults to
    /// `KMeansInit::KMeansPlusPlus`.
    pub fn init(mut self, init: KMeansInit) -> KMeansHyperParamsBuilder {
        self.init = Some(init);
        self
    }

    /// Sets the seed of the random number generator used to choose the initial
    /// centroids. Runs with the same seed on the same data produce identical
    /// results. When no seed is set, the generator is seeded from process
    /// entropy.
    pub fn seed(mut self, seed: u64) -> KMeansHyperParamsBuilder {
        self.seed = Some(seed);
        self
    }

    /// Finishes the building of the hyper parameter configuration, applying
    /// defaults for any parameter not explicitly set.
    pub fn build(self) -> KMeansHyperParams {
        KMeansHyperParams {
            n_clusters: self.n_clusters,
            max_iterations: self.max_iterations.unwrap_or(MAX_ITERATIONS_DEFAULT),
            init: self.init.unwrap_or(KMEANS_INIT_DEFAULT),
            seed: self.seed,
        }
    }
}

/// A wrapper around the hyper parameters used in DBSCAN clustering.
/// Only use if you want to tune hyper parameters. Otherwise use
/// `Dbscan::default_hyper_params` to instantiate the model with defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct DbscanHyperParams {
    pub(crate) epsilon: f64,
    pub(crate) min_samples: usize,
    pub(crate) dist_metric: DistanceMetric,
    pub(crate) nn_algo: NnAlgorithm,
}

/// Builder object to set custom DBSCAN hyper parameters.
pub struct DbscanHyperParamsBuilder {
    epsilon: Option<f64>,
    min_samples: Option<usize>,
    dist_metric: Option<DistanceMetric>,
    nn_algo: Option<NnAlgorithm>,
}

impl DbscanHyperParams {
    pub(crate) fn default() -> Self {
        Self::builder().build()
    }

    /// Enters the builder pattern, allowing custom hyper parameters to be set
    /// using various setter methods.
    ///
    /// # Returns
    /// * the hyper parameter configuration builder
    pub fn builder() -> DbscanHyperParamsBuilder {
        DbscanHyperParamsBuilder {
            epsilon: None,
            min_samples: None,
            dist_metric: None,
            nn_algo: None,
        }
    }
}

impl DbscanHyperParamsBuilder {
    /// Sets epsilon, the neighbourhood radius. Two points are neighbours if
    /// the distance between them is at most epsilon. This is the main hyper
    /// parameter for changing the results of clustering and is strongly
    /// dataset-dependent. Defaults to 0.5.
    pub fn epsilon(mut self, epsilon: f64) -> DbscanHyperParamsBuilder {
        self.epsilon = Some(epsilon);
        self
    }

    /// Sets min samples, the number of points (the point itself included)
    /// that must lie within epsilon of a point for it to count as a core
    /// point. Defaults to 5.
    pub fn min_samples(mut self, min_samples: usize) -> DbscanHyperParamsBuilder {
        self.min_samples = Some(min_samples);
        self
    }

    /// Sets the distance metric used for neighbourhood queries.
    /// Defaults to Euclidean. Options are defined by the DistanceMetric enum.
    pub fn dist_metric(mut self, dist_metric: DistanceMetric) -> DbscanHyperParamsBuilder {
        self.dist_metric = Some(dist_metric);
        self
    }

    /// Sets the nearest neighbour algorithm used to compute epsilon
    /// neighbourhoods. The primary reason for changing this parameter is
    /// performance. BruteForce compares each point against all others, which
    /// works fine on small datasets but scales poorly to larger ones.
    /// Defaults to Auto, whereby the algorithm is chosen internally based on
    /// the size of the input data.
    pub fn nn_algorithm(mut self, nn_algorithm: NnAlgorithm) -> DbscanHyperParamsBuilder {
        self.nn_algo = Some(nn_algorithm);
        self
    }

    /// Finishes the building of the hyper parameter configuration, applying
    /// defaults for any parameter not explicitly set.
    pub fn build(self) -> DbscanHyperParams {
        DbscanHyperParams {
            epsilon: self.epsilon.unwrap_or(EPSILON_DEFAULT),
            min_samples: self.min_samples.unwrap_or(MIN_SAMPLES_DEFAULT),
            dist_metric: self.dist_metric.unwrap_or(DISTANCE_METRIC_DEFAULT),
            nn_algo: self.nn_algo.unwrap_or(NN_ALGORITHM_DEFAULT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kmeans_builder_applies_defaults() {
        let hp = KMeansHyperParams::builder(3).build();
        assert_eq!(hp.n_clusters, 3);
        assert_eq!(hp.max_iterations, 300);
        assert_eq!(hp.init, KMeansInit::KMeansPlusPlus);
        assert_eq!(hp.seed, None);
    }

    #[test]
    fn dbscan_builder_overrides_defaults() {
        let hp = DbscanHyperParams::builder()
            .epsilon(0.1)
            .min_samples(3)
            .dist_metric(DistanceMetric::Manhattan)
            .nn_algorithm(NnAlgorithm::BruteForce)
            .build();
        assert_eq!(hp.epsilon, 0.1);
        assert_eq!(hp.min_samples, 3);
        assert_eq!(hp.dist_metric, DistanceMetric::Manhattan);
        assert_eq!(hp.nn_algo, NnAlgorithm::BruteForce);
    }
}
