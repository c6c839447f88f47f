use std::error::Error;
use std::fmt::{Display, Formatter};

/// Possible errors that arise from invalid input data or parameters.
#[derive(Debug, Clone)]
pub enum ClusteringError {
    EmptyDataset,
    WrongDimension(String),
    NonFiniteCoordinate(String),
    InvalidArgument(String),
}

impl Error for ClusteringError {}

impl Display for ClusteringError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            ClusteringError::EmptyDataset => String::from("The dataset provided is empty"),
            ClusteringError::WrongDimension(msg) => {
                format!("Input vectors have mismatched dimensions: {msg}")
            }
            ClusteringError::NonFiniteCoordinate(msg) => {
                format!("Non finite coordinate: {msg}")
            }
            ClusteringError::InvalidArgument(msg) => {
                format!("Invalid argument: {msg}")
            }
        };
        write!(f, "{message}")
    }
}
