use super::{NnAlgorithm, BRUTE_FORCE_N_SAMPLES_LIMIT};
use crate::distance::{get_dist_func, DistanceMetric};
use crate::DbscanHyperParams;
use num_traits::Float;

pub(crate) struct RegionQueryCalculator<'a, T> {
    data: &'a [Vec<T>],
    nn_algo: NnAlgorithm,
    dist_metric: DistanceMetric,
    epsilon: T,
}

impl<'a, T: Float> RegionQueryCalculator<'a, T> {
    pub(crate) fn new(data: &'a [Vec<T>], hp: &'a DbscanHyperParams) -> Self {
        Self {
            data,
            nn_algo: hp.nn_algo.clone(),
            dist_metric: hp.dist_metric,
            epsilon: T::from(hp.epsilon).expect("Failed to convert epsilon"),
        }
    }

    /// Computes the epsilon-neighbourhood of every point, the point itself
    /// included. Neighbourhoods are in ascending index order whichever
    /// algorithm computes them.
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
    fn calc_neighbourhoods<T: Float>(
        data: &[Vec<T>],
        epsilon: T,
        dist_metric: DistanceMetric,
    ) -> Vec<Vec<usize>> {
        let dist_func = get_dist_func(&dist_metric);
        data.iter()
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
    fn calc_neighbourhoods<T: Float>(
        data: &[Vec<T>],
        epsilon: T,
        dist_metric: DistanceMetric,
    ) -> Vec<Vec<usize>> {
        let mut tree: kdtree::KdTree<T, usize, &Vec<T>> = kdtree::KdTree::new(data[0].len());
        data.iter()
            .enumerate()
            .for_each(|(n, datapoint)| tree.add(datapoint, n).expect("Failed to add to KdTree"));

        let dist_func = get_dist_func(&dist_metric);
        data.iter()
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

#[cfg(test)]
mod tests {
    use super::*;

    fn test_data() -> Vec<Vec<f32>> {
        vec![
            vec![0.0, 0.0],
            vec![0.1, 0.0],
            vec![0.0, 0.1],
            vec![5.0, 5.0],
            vec![5.1, 5.0],
        ]
    }

    #[test]
    fn neighbourhoods_include_the_point_itself() {
        let data = test_data();
        let neighbourhoods =
            BruteForce::calc_neighbourhoods(&data, 0.2, DistanceMetric::Euclidean);
        for (idx, neighbourhood) in neighbourhoods.iter().enumerate() {
            assert!(neighbourhood.contains(&idx));
        }
    }

    #[test]
    fn brute_force_and_kd_tree_agree() {
        let data = test_data();
        let brute = BruteForce::calc_neighbourhoods(&data, 0.2, DistanceMetric::Euclidean);
        let kd = KdTree::calc_neighbourhoods(&data, 0.2, DistanceMetric::Euclidean);
        assert_eq!(brute, kd);
        assert_eq!(brute[0], vec![0, 1, 2]);
        assert_eq!(brute[3], vec![3, 4]);
    }
}
