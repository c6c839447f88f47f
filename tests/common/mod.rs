#![allow(dead_code)]
use flatclust::dataset::make_moons;
use std::collections::HashMap;

pub const MOONS_SEED: u64 = 42;

/// The dataset of the end-to-end scenario: 1500 points on two interleaving
/// crescents with Gaussian noise of standard deviation 0.09.
pub fn moons_1500() -> (Vec<Vec<f64>>, Vec<i32>) {
    make_moons(1500, 0.09, Some(MOONS_SEED)).unwrap()
}

/// A smaller crescent dataset for the quicker cross-algorithm checks.
pub fn moons_small() -> (Vec<Vec<f64>>, Vec<i32>) {
    make_moons(300, 0.05, Some(MOONS_SEED)).unwrap()
}

/// Two well-separated square blobs of `n_per_blob` points each, centred on
/// the origin and on (10, 10). No randomness involved.
pub fn two_blobs(n_per_blob: usize) -> Vec<Vec<f64>> {
    let mut data = Vec::with_capacity(2 * n_per_blob);
    for i in 0..n_per_blob {
        let dx = (i % 10) as f64 * 0.01;
        let dy = (i / 10) as f64 * 0.01;
        data.push(vec![dx, dy]);
    }
    for i in 0..n_per_blob {
        let dx = (i % 10) as f64 * 0.01;
        let dy = (i / 10) as f64 * 0.01;
        data.push(vec![10.0 + dx, 10.0 + dy]);
    }
    data
}

/// Counts how many points carry each label.
pub fn cluster_sizes(labels: &[i32]) -> HashMap<i32, usize> {
    let mut sizes = HashMap::new();
    for &label in labels {
        *sizes.entry(label).or_insert(0) += 1;
    }
    sizes
}

/// The cluster ids (noise excluded) ordered by descending size.
pub fn clusters_by_size(labels: &[i32]) -> Vec<(i32, usize)> {
    let mut sizes: Vec<(i32, usize)> = cluster_sizes(labels)
        .into_iter()
        .filter(|&(label, _)| label != -1)
        .collect();
    sizes.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    sizes
}

/// Asserts the basic label-coverage contract: one label per point, and every
/// label either a non-negative id below the produced cluster count, or -1
/// where permitted.
pub fn assert_label_coverage(labels: &[i32], n_samples: usize, noise_permitted: bool) {
    assert_eq!(labels.len(), n_samples);
    let n_clusters = labels.iter().filter(|&&l| l != -1).max().map_or(0, |&l| l + 1);
    for &label in labels {
        if label == -1 {
            assert!(noise_permitted, "unexpected noise label");
        } else {
            assert!((0..n_clusters).contains(&label));
        }
    }
}
