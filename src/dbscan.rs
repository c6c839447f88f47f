#[cfg(feature = "parallel")]
use crate::neighbourhood::parallel::RegionQueryCalculatorPar;
use crate::neighbourhood::serial::RegionQueryCalculator;
use crate::validation::DataValidator;
use crate::{ClusteringError, DbscanHyperParams};
use num_traits::Float;
use std::collections::VecDeque;

// Internal label encoding. UNCLASSIFIED points have not been reached yet;
// NOISE_LABEL points were visited without enough neighbours, but may still be
// promoted to border points of a cluster found later.
const UNCLASSIFIED: i32 = -2;
const NOISE_LABEL: i32 = -1;

/// The DBSCAN clustering algorithm (Ester et al., 1996) in Rust. Generic over
/// floating point numeric types.
///
/// DBSCAN groups points by neighbourhood density. Unlike K-means it discovers
/// clusters of arbitrary shape, determines the number of clusters itself, and
/// labels outliers as noise rather than forcing them into a cluster. A point
/// is *core* if at least `min_samples` points (itself included) lie within
/// `epsilon` of it; points within `epsilon` of a core point but not core
/// themselves are *border* points; everything else is noise, labelled `-1`.
///
/// # Examples
/// ```
///use flatclust::Dbscan;
///
///let data: Vec<Vec<f32>> = vec![
///    vec![1.0, 1.0],
///    vec![1.1, 1.0],
///    vec![1.0, 1.1],
///    vec![1.1, 1.1],
///    vec![0.9, 1.0],
///    vec![1.0, 0.9],
///    vec![5.0, 5.0],
///    vec![5.1, 5.0],
///    vec![5.0, 5.1],
///    vec![5.1, 5.1],
///    vec![4.9, 5.0],
///    vec![5.0, 4.9],
///    vec![10.0, 10.0],
///];
///let clusterer = Dbscan::default_hyper_params(&data);
///let result = clusterer.fit().unwrap();
///assert_eq!(result, vec![0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, -1]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Dbscan<'a, T> {
    data: &'a [Vec<T>],
    n_samples: usize,
    hp: DbscanHyperParams,
}

impl<'a, T: Float> Dbscan<'a, T> {
    /// Creates an instance of the DBSCAN clustering model using a custom
    /// hyper parameter configuration.
    ///
    /// # Parameters
    /// * `data` - a reference to the data to cluster, a collection of vectors
    ///            of floating point numbers. The vectors must all be of the
    ///            same dimensionality and contain no infinite values.
    /// * `hyper_params` - the hyper parameter configuration.
    ///
    /// # Returns
    /// * The DBSCAN model instance.
    ///
    /// # Examples
    /// ```
    ///use flatclust::{Dbscan, DbscanHyperParams, DistanceMetric, NnAlgorithm};
    ///
    ///let data: Vec<Vec<f32>> = vec![
    ///    vec![1.3, 1.1],
    ///    vec![1.3, 1.2],
    ///    vec![1.0, 1.1],
    ///    vec![1.2, 1.2],
    ///];
    ///let hyper_params = DbscanHyperParams::builder()
    ///    .epsilon(0.4)
    ///    .min_samples(3)
    ///    .dist_metric(DistanceMetric::Manhattan)
    ///    .nn_algorithm(NnAlgorithm::BruteForce)
    ///    .build();
    ///let clusterer = Dbscan::new(&data, hyper_params);
    /// ```
    pub fn new(data: &'a [Vec<T>], hyper_params: DbscanHyperParams) -> Self {
        let n_samples = data.len();
        Dbscan {
            data,
            n_samples,
            hp: hyper_params,
        }
    }

    /// Creates an instance of the DBSCAN clustering model using the default
    /// hyper parameters (epsilon 0.5, min samples 5, Euclidean distance).
    pub fn default_hyper_params(data: &'a [Vec<T>]) -> Dbscan<'a, T> {
        let hyper_params = DbscanHyperParams::default();
        Dbscan::new(data, hyper_params)
    }

    /// Performs clustering on the list of vectors passed to the constructor.
    ///
    /// # Returns
    /// * A result that, if successful, contains a list of cluster labels with
    ///   a length equal to the number of samples passed to the constructor.
    ///   Non-negative integers mean a data point belongs to a cluster of that
    ///   label; `-1` labels mean that a data point is noise. Cluster
    ///   membership is deterministic for fixed hyper parameters and input
    ///   order; the id numbers themselves depend on assignment order. An
    ///   error will be returned if the input data or the hyper parameters are
    ///   invalid.
    pub fn fit(&self) -> Result<Vec<i32>, ClusteringError> {
        self.validate_arguments()?;
        DataValidator::new(self.data).validate_input_data()?;
        let neighbourhoods = RegionQueryCalculator::new(self.data, &self.hp).calc_neighbourhoods();
        Ok(self.label_points(&neighbourhoods))
    }

    fn validate_arguments(&self) -> Result<(), ClusteringError> {
        if !self.hp.epsilon.is_finite() || self.hp.epsilon <= 0.0 {
            return Err(ClusteringError::InvalidArgument(format!(
                "epsilon must be positive and finite, got {}",
                self.hp.epsilon
            )));
        }
        if self.hp.min_samples < 1 {
            return Err(ClusteringError::InvalidArgument(String::from(
                "min_samples must be at least 1",
            )));
        }
        Ok(())
    }

    fn label_points(&self, neighbourhoods: &[Vec<usize>]) -> Vec<i32> {
        let mut labels = vec![UNCLASSIFIED; self.n_samples];
        let mut visited = vec![false; self.n_samples];
        let mut cluster_id = 0;

        for point in 0..self.n_samples {
            if visited[point] {
                continue;
            }
            visited[point] = true;

            // Neighbourhoods include the point itself
            if neighbourhoods[point].len() < self.hp.min_samples {
                // Tentative: may become a border point of a later cluster
                labels[point] = NOISE_LABEL;
                continue;
            }
            labels[point] = cluster_id;
            self.expand_cluster(&neighbourhoods[point], neighbourhoods, &mut labels, &mut visited, cluster_id);
            cluster_id += 1;
        }
        labels
    }

    /// Breadth-first expansion from a core point. Every point in the frontier
    /// is density-reachable from the cluster's seed; core points extend the
    /// frontier with their own neighbourhoods.
    fn expand_cluster(
        &self,
        seeds: &[usize],
        neighbourhoods: &[Vec<usize>],
        labels: &mut [i32],
        visited: &mut [bool],
        cluster_id: i32,
    ) {
        let mut frontier: VecDeque<usize> = seeds.iter().copied().collect();

        while let Some(neighbour) = frontier.pop_front() {
            // Assign before the visited check so that points previously
            // marked as noise are promoted to border points
            if labels[neighbour] < 0 {
                labels[neighbour] = cluster_id;
            }
            if visited[neighbour] {
                continue;
            }
            visited[neighbour] = true;

            if neighbourhoods[neighbour].len() >= self.hp.min_samples {
                for &next in &neighbourhoods[neighbour] {
                    if labels[next] < 0 {
                        frontier.push_back(next);
                    }
                }
            }
        }
    }
}

impl<'a, T: Float> crate::Clusterer for Dbscan<'a, T> {
    fn fit_predict(&self) -> Result<Vec<i32>, ClusteringError> {
        self.fit()
    }
}

#[cfg(feature = "parallel")]
impl<'a, T: Float + Send + Sync> Dbscan<'a, T> {
    /// Parallel version of [`Dbscan::fit`]. Neighbourhood queries run in
    /// parallel and are collected in input order; the cluster expansion
    /// itself is sequential, so results are identical to the serial version.
    pub fn fit_par(&self) -> Result<Vec<i32>, ClusteringError> {
        self.validate_arguments()?;
        DataValidator::new(self.data).validate_input_data()?;
        let neighbourhoods =
            RegionQueryCalculatorPar::new(self.data, &self.hp).calc_neighbourhoods();
        Ok(self.label_points(&neighbourhoods))
    }
}
