use flatclust::dataset::make_moons;
use flatclust::{
    Agglomerative, Clusterer, Dbscan, DbscanHyperParams, KMeans, KMeansHyperParams,
};
use std::collections::HashMap;

mod common;

#[test]
fn generator_is_deterministic_end_to_end() {
    let (data_a, truth_a) = common::moons_1500();
    let (data_b, truth_b) = common::moons_1500();
    assert_eq!(data_a, data_b);
    assert_eq!(truth_a, truth_b);

    let hp = KMeansHyperParams::builder(2).seed(common::MOONS_SEED).build();
    let fit_a = KMeans::new(&data_a, hp.clone()).fit().unwrap();
    let fit_b = KMeans::new(&data_b, hp).fit().unwrap();
    assert_eq!(fit_a.labels, fit_b.labels);
    assert_eq!(fit_a.centroids, fit_b.centroids);
}

#[test]
fn every_algorithm_covers_every_point() {
    let (data, _) = common::moons_small();

    let kmeans = KMeans::new(&data, KMeansHyperParams::builder(2).seed(1).build())
        .fit()
        .unwrap();
    common::assert_label_coverage(&kmeans.labels, data.len(), false);
    assert_eq!(kmeans.centroids.len(), 2);

    let ward = Agglomerative::new(&data, 2).fit().unwrap();
    common::assert_label_coverage(&ward.labels, data.len(), false);

    let hp = DbscanHyperParams::builder().epsilon(0.1).build();
    let dbscan = Dbscan::new(&data, hp).fit().unwrap();
    common::assert_label_coverage(&dbscan, data.len(), true);
}

#[test]
fn kmeans_recovers_two_well_separated_blobs() {
    let data = common::two_blobs(50);
    let hp = KMeansHyperParams::builder(2).seed(7).build();
    let result = KMeans::new(&data, hp).fit().unwrap();

    assert!(result.converged);
    let origin_label = result.labels[0];
    let far_label = result.labels[50];
    assert_ne!(origin_label, far_label);
    assert!(result.labels[..50].iter().all(|&l| l == origin_label));
    assert!(result.labels[50..].iter().all(|&l| l == far_label));
}

#[test]
fn the_three_algorithms_agree_on_unambiguous_blobs() {
    let data = common::two_blobs(20);
    let kmeans = KMeans::new(&data, KMeansHyperParams::builder(2).seed(5).build());
    let ward = Agglomerative::new(&data, 2);
    let dbscan = Dbscan::new(
        &data,
        DbscanHyperParams::builder().epsilon(0.5).min_samples(3).build(),
    );
    let models: Vec<&dyn Clusterer> = vec![&kmeans, &ward, &dbscan];

    for model in models {
        let labels = model.fit_predict().unwrap();
        let first_blob = labels[0];
        let second_blob = labels[20];
        assert_ne!(first_blob, second_blob);
        assert!(labels[..20].iter().all(|&l| l == first_blob));
        assert!(labels[20..].iter().all(|&l| l == second_blob));
    }
}

#[test]
fn ward_produces_a_balanced_split_of_the_crescents() {
    let (data, _) = common::moons_small();
    let result = Agglomerative::new(&data, 2).fit().unwrap();
    let sizes = common::clusters_by_size(&result.labels);
    assert_eq!(sizes.len(), 2);
    // Ward's variance criterion favours balanced clusters; neither side
    // should collapse to a sliver
    assert!(sizes[1].1 >= data.len() / 5);

    for window in result.dendrogram.windows(2) {
        assert!(window[0].distance <= window[1].distance);
    }
}

// The end-to-end scenario: on the two-crescent set, density-based clustering
// recovers the arcs while centroid-based clustering bisects them.
#[test]
fn dbscan_recovers_the_crescents_where_kmeans_bisects_them() {
    let (data, ground_truth) = common::moons_1500();

    let hp = DbscanHyperParams::builder().epsilon(0.1).build();
    let dbscan_labels = Dbscan::new(&data, hp).fit().unwrap();

    let dominant = common::clusters_by_size(&dbscan_labels);
    assert!(dominant.len() >= 2);
    let (first_id, first_size) = dominant[0];
    let (second_id, second_size) = dominant[1];

    // The two dominant clusters hold at least 95% of all points
    assert!(first_size + second_size >= data.len() * 95 / 100);
    assert!(first_size >= data.len() * 2 / 5);
    assert!(second_size >= data.len() * 2 / 5);
    // Whatever is left over is noise or marginal fragments
    for (label, size) in dominant.iter().skip(2) {
        assert!(
            *size < data.len() / 100,
            "unexpected extra cluster {label} of size {size}"
        );
    }

    // Each dominant cluster follows a single arc of the ground truth
    let purity = |cluster_id: i32| -> (i32, f64) {
        let mut arc_counts: HashMap<i32, usize> = HashMap::new();
        let mut total = 0;
        for (&label, &arc) in dbscan_labels.iter().zip(&ground_truth) {
            if label == cluster_id {
                *arc_counts.entry(arc).or_insert(0) += 1;
                total += 1;
            }
        }
        let (&arc, &count) = arc_counts.iter().max_by_key(|&(_, &count)| count).unwrap();
        (arc, count as f64 / total as f64)
    };
    let (first_arc, first_purity) = purity(first_id);
    let (second_arc, second_purity) = purity(second_id);
    assert_ne!(first_arc, second_arc);
    assert!(first_purity >= 0.9);
    assert!(second_purity >= 0.9);

    // K-means cannot follow the non-convex arcs: its straight-boundary
    // bisection puts points of both arcs into both of its clusters
    let hp = KMeansHyperParams::builder(2).seed(common::MOONS_SEED).build();
    let kmeans_labels = KMeans::new(&data, hp).fit().unwrap().labels;
    for kmeans_cluster in [0, 1] {
        for arc in [0, 1] {
            let count = kmeans_labels
                .iter()
                .zip(&ground_truth)
                .filter(|&(&label, &truth)| label == kmeans_cluster && truth == arc)
                .count();
            assert!(
                count >= data.len() / 20,
                "kmeans cluster {kmeans_cluster} holds only {count} points of arc {arc}"
            );
        }
    }
}

#[test]
fn noise_labels_appear_only_in_dbscan_output() {
    let (data, _) = common::moons_small();

    let kmeans = KMeans::new(&data, KMeansHyperParams::builder(3).seed(2).build())
        .fit()
        .unwrap();
    assert!(kmeans.labels.iter().all(|&label| label >= 0));

    let ward = Agglomerative::new(&data, 3).fit().unwrap();
    assert!(ward.labels.iter().all(|&label| label >= 0));
}

#[test]
fn generator_rejects_degenerate_requests() {
    assert!(make_moons::<f64>(0, 0.1, None).is_err());
    assert!(make_moons::<f64>(1, 0.1, None).is_err());
    assert!(make_moons::<f64>(100, -1.0, None).is_err());
}
