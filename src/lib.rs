//! Three flat clustering algorithms for dense vectors in pure Rust, generic
//! over floating point numeric types:
//!
//!  1. **K-means** ([`KMeans`]) - the classic partitional algorithm: Lloyd
//!     iterations from a k-means++ seeding. Fast and simple, but it assumes
//!     roughly spherical clusters and needs the cluster count up front;
//!  2. **Agglomerative hierarchical clustering** ([`Agglomerative`]) -
//!     bottom-up merging under Ward's variance-minimizing linkage, recording
//!     the dendrogram on the way to the requested number of clusters; and
//!  3. **DBSCAN** ([`Dbscan`]) - density-based clustering that discovers
//!     clusters of arbitrary shape, determines the number of clusters itself
//!     and labels outliers as noise (`-1`), at the price of a
//!     dataset-dependent `epsilon` parameter.
//!
//! All three implement the [`Clusterer`] trait, so a caller can run them over
//! the same data and compare the label assignments uniformly. The
//! [`dataset::make_moons`] generator produces the standard benchmark of two
//! interleaving crescents that separates the density-based from the
//! centroid-based algorithms.
//!
//! Every stochastic step takes an explicit optional seed instead of using a
//! hidden process-wide generator, so runs are reproducible and clustering
//! models can safely run on parallel threads over shared data.
//!
//! # Examples
//! ```
//!use flatclust::{Agglomerative, Clusterer, Dbscan, DbscanHyperParams, KMeans};
//!
//!let data: Vec<Vec<f64>> = vec![
//!    vec![1.0, 1.1],
//!    vec![1.2, 1.0],
//!    vec![0.9, 1.0],
//!    vec![4.0, 4.1],
//!    vec![4.1, 4.0],
//!    vec![3.9, 4.0],
//!];
//!
//!let ward_labels = Agglomerative::new(&data, 2).fit_predict().unwrap();
//!assert_eq!(ward_labels, vec![0, 0, 0, 1, 1, 1]);
//!
//!let hyper_params = DbscanHyperParams::builder()
//!    .epsilon(0.5)
//!    .min_samples(2)
//!    .build();
//!let dbscan_labels = Dbscan::new(&data, hyper_params).fit_predict().unwrap();
//!assert_eq!(dbscan_labels, ward_labels);
//!
//!let kmeans_labels = KMeans::default_hyper_params(&data, 2).fit_predict().unwrap();
//!assert_eq!(kmeans_labels.len(), data.len());
//! ```
//!
//! # References
//! * [Lloyd, S. Least squares quantization in PCM.](https://doi.org/10.1109/TIT.1982.1056489)
//! * [Ward, J. H. Hierarchical grouping to optimize an objective function.](https://doi.org/10.1080/01621459.1963.10500845)
//! * [Ester, M. et al. A density-based algorithm for discovering clusters in large spatial databases with noise.](https://dl.acm.org/doi/10.5555/3001460.3001507)

pub use crate::agglomerative::{Agglomerative, AgglomerativeFit};
pub use crate::data_wrappers::MergeStep;
pub use crate::dbscan::Dbscan;
pub use crate::distance::DistanceMetric;
pub use crate::error::ClusteringError;
pub use crate::hyper_parameters::{
    DbscanHyperParams, DbscanHyperParamsBuilder, KMeansHyperParams, KMeansHyperParamsBuilder,
};
pub use crate::kmeans::{KMeans, KMeansFit, KMeansInit};
pub use crate::neighbourhood::NnAlgorithm;
pub use crate::traits::Clusterer;

mod agglomerative;
mod data_wrappers;
pub mod dataset;
mod dbscan;
mod distance;
mod error;
mod hyper_parameters;
mod kmeans;
mod neighbourhood;
mod traits;
mod union_find;
mod validation;
