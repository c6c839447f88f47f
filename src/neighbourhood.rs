#[cfg(feature = "parallel")]
pub(super) mod parallel;
pub(super) mod serial;

pub(crate) const BRUTE_FORCE_N_SAMPLES_LIMIT: usize = 1024;

/// The nearest neighbour algorithm options
#[derive(Debug, Clone, PartialEq)]
pub enum NnAlgorithm {
    /// The nearest neighbour algorithm is selected internally based on the
    /// size of the input data
    Auto,
    /// Compares each point against all others
    BruteForce,
    /// K-dimensional tree algorithm
    KdTree,
}
