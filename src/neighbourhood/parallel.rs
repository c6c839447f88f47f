#![cfg(feature = "parallel")]
use super::{NnAlgorithm, BRUTE_FORCE_N_SAMPLES_LIMIT};
use crate::distance::{get_dist_func, DistanceMetric};
use crate::DbscanHyperParams;
use num_traits::Float;
use rayon::prelude::*;

pub(crate) struct RegionQueryCalculatorPar<'a, T> {
    data: &'a [Vec<T>],
    nn_algo: NnAlgorithm,
    dist_metric: DistanceMetric,
    epsilon: T,
}

impl<'a, T: Float + Send + Sync> RegionQueryCalculatorPar<'a, T> {
    pub(crate) fn new(data: &'a [Vec<T>], hp: &'a DbscanHyperParams) -> Self {
        Self {
            data,
            nn_algo: hp.nn_algo.clone(),
            dist_metric: hp.dist_metric,
            epsilon: T::from(hp.epsilon).expect("Failed to convert epsilon"),
        }
    }

    /// Parallel counterpart of the serial calculator. Per-point queries are
    /// independent and collected in input order, so the output is identical
    /// to the serial version.
    pub(crate) fn calc_neighbourhoods(&self) -> Vec<Vec<usize>> {
        let n_samples = self.data.len();
        match (&self.nn_algo, n_samples) {
            (NnAlgorithm::Auto, usize::MIN..=BRUTE_FORCE_N_SAMPLES_LIMIT) => {
                BruteForce::calc_neighbourhoods(self.data, self.epsilon, self.dist_metric)
            }
            (NnAlgorithm::Auto, _) => {
                KdTree::calc_neighbourhoods(self.data, self.epsilon, self.dist_metric)
            }
            (NnAlgorithm::BruteForce, _) => {
                BruteForce::calc_neighbourhoods(self.data, self.epsilon, self.dist_metric)
            }
            (NnAlgorithm::KdTree, _) => {
                KdTree::calc_neighbourhoods(self.data, self.epsilon, self.dist_metric)
            }
        }
    }
}

pub(crate) struct BruteForce;

impl BruteForce {
    fn calc_neighbourhoods<T: Float + Send + Sync>(
        data: &[Vec<T>],
        epsilon: T,
        dist_metric: DistanceMetric,
    ) -> Vec<Vec<usize>> {
        let dist_func = get_dist_func(&dist_metric);
        data.par_iter()
            .map(|point| {
                data.iter()
                    .enumerate()
                    .filter(|(_idx, other)| dist_func(point, other) <= epsilon)
                    .map(|(idx, _other)| idx)
                    .collect()
            })
            .collect()
    }
}

pub(crate) struct KdTree;

impl KdTree {
    fn calc_neighbourhoods<T: Float + Send + Sync>(
        data: &[Vec<T>],
        epsilon: T,
        dist_metric: DistanceMetric,
    ) -> Vec<Vec<usize>> {
        let mut tree: kdtree::KdTree<T, usize, &Vec<T>> = kdtree::KdTree::new(data[0].len());
        data.iter()
            .enumerate()
            .for_each(|(n, datapoint)| tree.add(datapoint, n).expect("Failed to add to KdTree"));

        let dist_func = get_dist_func(&dist_metric);
        data.par_iter()
            .map(|datapoint| {
                let mut neighbours: Vec<usize> = tree
                    .within(datapoint, epsilon, &dist_func)
                    .expect("Failed to find neighbours")
                    .into_iter()
                    .map(|(_dist, idx)| *idx)
                    .collect();
                neighbours.sort_unstable();
                neighbours
            })
            .collect()
    }
}
