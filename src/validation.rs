use crate::ClusteringError;
use num_traits::Float;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DataValidator<'a, T> {
    data: &'a [Vec<T>],
}

impl<'a, T: Float> DataValidator<'a, T> {
    pub(crate) fn new(data: &'a [Vec<T>]) -> Self {
        Self { data }
    }

    pub(crate) fn validate_input_data(&self) -> Result<(), ClusteringError> {
        if self.data.is_empty() {
            return Err(ClusteringError::EmptyDataset);
        }
        let dims_0th = self.data[0].len();
        for (n, datapoint) in self.data.iter().enumerate() {
            for element in datapoint {
                if !element.is_finite() {
                    return Err(ClusteringError::NonFiniteCoordinate(format!(
                        "{n}th vector contains non-finite element(s)"
                    )));
                }
            }
            let dims_nth = datapoint.len();
            if dims_nth != dims_0th {
                return Err(ClusteringError::WrongDimension(format!(
                    "0th data point has {dims_0th} dimensions, but {n}th has {dims_nth}"
                )));
            }
        }
        Ok(())
    }
}
