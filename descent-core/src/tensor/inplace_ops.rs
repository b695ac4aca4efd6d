use crate::error::{DescentError, GradientStateError, ShapeError};
use crate::ops::traits::Element;
use crate::tensor::Tensor;

impl<T: Element> Tensor<T> {
    /// Replaces the tensor's data in place.
    ///
    /// # Errors
    /// * `ShapeError::Mismatch` if `data.len()` differs from the current element count.
    /// * `GradientStateError::InplaceOnTrackedTensor` if the tensor requires grad
    ///   and a recorded operation still depends on it.
    pub fn set_data(&self, data: Vec<T>) -> Result<(), DescentError> {
        let mut guard = self.write_data();
        if data.len() != guard.numel() {
            return Err(ShapeError::Mismatch {
                expected: guard.shape.clone(),
                actual: vec![data.len()],
                operation: "set_data".to_string(),
            }
            .into());
        }
        guard.check_mutable("set_data")?;
        guard.data = data;
        guard.version += 1;
        Ok(())
    }

    /// Fills the tensor with `value` in place.
    ///
    /// Subject to the same restriction as [`Tensor::set_data`].
    pub fn fill_(&self, value: T) -> Result<(), DescentError> {
        let mut guard = self.write_data();
        guard.check_mutable("fill_")?;
        guard.data.iter_mut().for_each(|x| *x = value);
        guard.version += 1;
        Ok(())
    }

    /// Fails the way [`Tensor::set_data`] would, without writing anything.
    pub(crate) fn ensure_mutable(&self, operation: &str) -> Result<(), DescentError> {
        self.write_data().check_mutable(operation)
    }

    /// Applies `update(data, grad)` to a leaf parameter in place.
    ///
    /// Optimizer path. Skips the live-consumer check but still bumps the
    /// version, so a later backward through an older graph fails as stale.
    pub(crate) fn update_with_grad<F>(&self, update: F) -> Result<(), DescentError>
    where
        F: FnOnce(&mut [T], &[T]),
    {
        let mut guard = self.write_data();
        let guard = &mut *guard;
        if guard.grad_fn.is_some() {
            return Err(GradientStateError::NonLeafRequiresGrad.into());
        }
        let grad = match guard.grad.as_ref() {
            Some(g) => g,
            None => {
                return Err(DescentError::InternalError(
                    "update_with_grad called on a tensor without a gradient buffer".to_string(),
                ))
            }
        };
        update(&mut guard.data, grad);
        guard.version += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "inplace_ops_test.rs"]
mod tests;
