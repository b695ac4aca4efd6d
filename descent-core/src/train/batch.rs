use crate::error::{DescentError, ShapeError};
use crate::ops::expect_matrix;
use crate::ops::traits::Element;
use crate::tensor::Tensor;

/// One mini-batch: `(n, features)` inputs and one class index per row.
#[derive(Debug, Clone)]
pub struct Batch<T: Element> {
    pub inputs: Tensor<T>,
    pub targets: Vec<usize>,
}

impl<T: Element> Batch<T> {
    /// Builds a batch, checking that there is one target per input row.
    ///
    /// # Errors
    /// * `ShapeError::RankMismatch` if `inputs` is not rank 2.
    /// * `ShapeError::Mismatch` if `targets.len()` differs from the number of rows.
    pub fn new(inputs: Tensor<T>, targets: Vec<usize>) -> Result<Self, DescentError> {
        let shape = inputs.shape();
        let (rows, _) = expect_matrix(&shape, "Batch::new")?;
        if rows != targets.len() {
            return Err(ShapeError::Mismatch {
                expected: vec![rows],
                actual: vec![targets.len()],
                operation: "Batch::new (targets)".to_string(),
            }
            .into());
        }
        Ok(Batch { inputs, targets })
    }

    /// Number of examples in the batch.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// A finite, restartable sequence of batches.
///
/// Every call to [`BatchSource::batches`] starts a new pass (one epoch) over
/// the data.
pub trait BatchSource<T: Element> {
    fn batches(&mut self) -> Box<dyn Iterator<Item = Result<Batch<T>, DescentError>> + '_>;
}

/// An in-memory list of batches replayed identically every epoch.
impl<T: Element> BatchSource<T> for Vec<Batch<T>> {
    fn batches(&mut self) -> Box<dyn Iterator<Item = Result<Batch<T>, DescentError>> + '_> {
        Box::new(self.iter().cloned().map(Ok))
    }
}
