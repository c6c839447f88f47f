use crate::ClusteringError;
use num_traits::Float;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use std::f64::consts::PI;

/// Generates the classic two-interleaving-crescents ("moons") dataset, a
/// synthetic point set with non-convex structure that density-based
/// clustering recovers and centroid-based clustering does not.
///
/// The first half of the samples lie on the upper half of the unit circle,
/// the second half on a lower half-circle offset to interleave with the
/// first. Independent zero-mean Gaussian noise with standard deviation
/// `noise` is added to every coordinate.
///
/// # Parameters
/// * `n_samples` - the total number of points to generate, split roughly in
///   half between the two arcs.
/// * `noise` - the standard deviation of the Gaussian noise added to each
///   coordinate.
/// * `seed` - seed of the random number generator driving the noise. The
///   same seed produces a bit-identical dataset; `None` seeds the generator
///   from process entropy.
///
/// # Returns
/// * A result that, if successful, contains the generated points and the
///   ground truth labels (0 for the first arc, 1 for the second), in the
///   same order. The labels are intended for evaluation and visualisation
///   only; no clustering algorithm in this crate consumes them.
///
/// # Examples
/// ```
///use flatclust::dataset::make_moons;
///
///let (data, labels) = make_moons::<f64>(100, 0.05, Some(42)).unwrap();
///assert_eq!(data.len(), 100);
///assert_eq!(labels.len(), 100);
/// ```
pub fn make_moons<T: Float>(
    n_samples: usize,
    noise: f64,
    seed: Option<u64>,
) -> Result<(Vec<Vec<T>>, Vec<i32>), ClusteringError> {
    if n_samples < 2 {
        return Err(ClusteringError::InvalidArgument(format!(
            "n_samples must be at least 2, got {n_samples}"
        )));
    }
    if !noise.is_finite() || noise < 0.0 {
        return Err(ClusteringError::InvalidArgument(format!(
            "noise must be non-negative and finite, got {noise}"
        )));
    }

    let n_outer = n_samples / 2;
    let n_inner = n_samples - n_outer;

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let gauss = Normal::new(0.0, noise)
        .map_err(|_| ClusteringError::InvalidArgument(format!("invalid noise level {noise}")))?;

    let mut data: Vec<Vec<T>> = Vec::with_capacity(n_samples);
    let mut labels: Vec<i32> = Vec::with_capacity(n_samples);

    for i in 0..n_outer {
        let t = arc_parameter(i, n_outer);
        let x = t.cos() + gauss.sample(&mut rng);
        let y = t.sin() + gauss.sample(&mut rng);
        data.push(vec![cast(x), cast(y)]);
        labels.push(0);
    }
    for i in 0..n_inner {
        let t = arc_parameter(i, n_inner);
        let x = 1.0 - t.cos() + gauss.sample(&mut rng);
        let y = 1.0 - t.sin() - 0.5 + gauss.sample(&mut rng);
        data.push(vec![cast(x), cast(y)]);
        labels.push(1);
    }

    Ok((data, labels))
}

/// Evenly spaces `count` parameter values over [0, π].
fn arc_parameter(i: usize, count: usize) -> f64 {
    if count > 1 {
        PI * i as f64 / (count - 1) as f64
    } else {
        0.0
    }
}

fn cast<T: Float>(value: f64) -> T {
    T::from(value).expect("Failed to convert coordinate")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_samples_between_the_arcs() {
        let (data, labels) = make_moons::<f64>(5, 0.0, Some(1)).unwrap();
        assert_eq!(data.len(), 5);
        assert_eq!(labels, vec![0, 0, 1, 1, 1]);
    }

    #[test]
    fn same_seed_is_bit_identical() {
        let (data_a, labels_a) = make_moons::<f64>(200, 0.09, Some(7)).unwrap();
        let (data_b, labels_b) = make_moons::<f64>(200, 0.09, Some(7)).unwrap();
        assert_eq!(data_a, data_b);
        assert_eq!(labels_a, labels_b);
    }

    #[test]
    fn different_seeds_differ() {
        let (data_a, _) = make_moons::<f64>(50, 0.09, Some(1)).unwrap();
        let (data_b, _) = make_moons::<f64>(50, 0.09, Some(2)).unwrap();
        assert_ne!(data_a, data_b);
    }

    #[test]
    fn noiseless_points_lie_on_their_arcs() {
        let (data, labels) = make_moons::<f64>(100, 0.0, None).unwrap();
        for (point, label) in data.iter().zip(&labels) {
            let (x, y) = (point[0], point[1]);
            let radius = match label {
                // Outer arc: unit circle about the origin
                0 => (x * x + y * y).sqrt(),
                // Inner arc: unit circle about (1, 0.5), vertically flipped
                _ => ((x - 1.0).powi(2) + (y - 0.5).powi(2)).sqrt(),
            };
            assert!((radius - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn rejects_invalid_arguments() {
        assert!(matches!(
            make_moons::<f64>(1, 0.1, None),
            Err(ClusteringError::InvalidArgument(..))
        ));
        assert!(matches!(
            make_moons::<f64>(100, -0.1, None),
            Err(ClusteringError::InvalidArgument(..))
        ));
        assert!(matches!(
            make_moons::<f64>(100, f64::NAN, None),
            Err(ClusteringError::InvalidArgument(..))
        ));
    }
}
