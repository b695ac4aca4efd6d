use crate::autograd::{should_record, OpKind, Operation, SavedContext};
use crate::error::{DescentError, ShapeError};
use crate::ops::traits::Element;
use crate::tensor::Tensor;

// --- Forward Operations ---

/// Sums all elements into a rank-0 tensor.
pub fn sum_op<T: Element>(input: &Tensor<T>) -> Result<Tensor<T>, DescentError> {
    let (total, numel) = {
        let guard = input.read_data();
        (guard.data.iter().copied().sum::<T>(), guard.numel())
    };
    let result = Tensor::scalar(total);
    if should_record(&[input]) {
        Operation::record(OpKind::Sum, &[input], SavedContext::Reduction { numel }, &result);
    }
    Ok(result)
}

/// Averages all elements into a rank-0 tensor.
///
/// # Errors
/// Returns `ShapeError::EmptyBatch` for a tensor with no elements.
pub fn mean_op<T: Element>(input: &Tensor<T>) -> Result<Tensor<T>, DescentError> {
    let (total, numel) = {
        let guard = input.read_data();
        (guard.data.iter().copied().sum::<T>(), guard.numel())
    };
    if numel == 0 {
        return Err(ShapeError::EmptyBatch {
            operation: "mean".to_string(),
        }
        .into());
    }
    let result = Tensor::scalar(total / T::from_count(numel));
    if should_record(&[input]) {
        Operation::record(OpKind::Mean, &[input], SavedContext::Reduction { numel }, &result);
    }
    Ok(result)
}

// --- Backward Operations ---

fn reduced_numel<T: Element>(op: &Operation<T>) -> Result<usize, DescentError> {
    match op.saved() {
        SavedContext::Reduction { numel } => Ok(*numel),
        other => Err(DescentError::InternalError(format!(
            "{} expects a reduction context, found {:?}",
            op.kind().name(),
            other
        ))),
    }
}

/// Broadcasts the upstream scalar to every input element.
pub(crate) fn sum_backward<T: Element>(
    op: &Operation<T>,
    grad_output: &[T],
) -> Result<Vec<Option<Vec<T>>>, DescentError> {
    let numel = reduced_numel(op)?;
    if !op.input_requires_grad(0) {
        return Ok(vec![None]);
    }
    Ok(vec![Some(vec![grad_output[0]; numel])])
}

/// Broadcasts the upstream scalar divided by the element count.
pub(crate) fn mean_backward<T: Element>(
    op: &Operation<T>,
    grad_output: &[T],
) -> Result<Vec<Option<Vec<T>>>, DescentError> {
    let numel = reduced_numel(op)?;
    if !op.input_requires_grad(0) {
        return Ok(vec![None]);
    }
    Ok(vec![Some(vec![grad_output[0] / T::from_count(numel); numel])])
}

#[cfg(test)]
#[path = "sum_test.rs"]
mod tests;
