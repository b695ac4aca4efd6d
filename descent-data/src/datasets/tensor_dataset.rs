use super::traits::{Dataset, Sample};
use descent_core::{DescentError, Element, ShapeError, Tensor};

/// Labelled examples stored as the rows of an `(n, features)` tensor.
///
/// The rows are copied out of the tensor on construction, so later changes to
/// the tensor do not reach the dataset.
#[derive(Debug, Clone)]
pub struct TensorDataset<T: Element> {
    features: Vec<T>,
    labels: Vec<usize>,
    num_features: usize,
}

impl<T: Element> TensorDataset<T> {
    /// # Errors
    ///
    /// * `ShapeError::RankMismatch` if `features` is not rank 2.
    /// * `ShapeError::Mismatch` if there is not exactly one label per row.
    pub fn new(features: Tensor<T>, labels: Vec<usize>) -> Result<Self, DescentError> {
        let shape = features.shape();
        if shape.len() != 2 {
            return Err(ShapeError::RankMismatch {
                expected: 2,
                actual: shape.len(),
                operation: "TensorDataset::new".to_string(),
            }
            .into());
        }
        if shape[0] != labels.len() {
            return Err(ShapeError::Mismatch {
                expected: vec![shape[0]],
                actual: vec![labels.len()],
                operation: "TensorDataset::new (labels)".to_string(),
            }
            .into());
        }
        Ok(Self {
            features: features.to_vec(),
            labels,
            num_features: shape[1],
        })
    }

    pub fn num_features(&self) -> usize {
        self.num_features
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }
}

impl<T: Element> Dataset for TensorDataset<T> {
    type Item = Sample<T>;

    fn get(&self, index: usize) -> Result<Self::Item, DescentError> {
        let label = *self
            .labels
            .get(index)
            .ok_or(DescentError::IndexOutOfBounds {
                index,
                len: self.labels.len(),
            })?;
        let start = index * self.num_features;
        let row = self.features[start..start + self.num_features].to_vec();
        Ok((row, label))
    }

    fn len(&self) -> usize {
        self.labels.len()
    }
}

#[cfg(test)]
#[path = "tensor_dataset_test.rs"]
mod tests;
