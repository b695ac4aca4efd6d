use crate::autograd::{should_record, OpKind, Operation, SavedContext};
use crate::error::{DescentError, ShapeError};
use crate::ops::traits::Element;
use crate::tensor::Tensor;

// --- Forward Operation ---

/// Element-wise addition of two tensors of identical shape.
///
/// # Errors
/// Returns `ShapeError::IncompatibleShapes` if the shapes differ.
pub fn add_op<T: Element>(a: &Tensor<T>, b: &Tensor<T>) -> Result<Tensor<T>, DescentError> {
    let a_shape = a.shape();
    let b_shape = b.shape();
    if a_shape != b_shape {
        return Err(ShapeError::IncompatibleShapes {
            shape1: a_shape,
            shape2: b_shape,
            operation: "add".to_string(),
        }
        .into());
    }

    let output: Vec<T> = if a.same_node(b) {
        a.read_data().data.iter().map(|&x| x + x).collect()
    } else {
        let a_guard = a.read_data();
        let b_guard = b.read_data();
        a_guard
            .data
            .iter()
            .zip(b_guard.data.iter())
            .map(|(&x, &y)| x + y)
            .collect()
    };

    let result = Tensor::new(output, a_shape)?;
    if should_record(&[a, b]) {
        Operation::record(OpKind::Add, &[a, b], SavedContext::Inputs, &result);
    }
    Ok(result)
}

// --- Backward Operation ---

/// Both inputs receive the upstream gradient unchanged.
pub(crate) fn add_backward<T: Element>(
    op: &Operation<T>,
    grad_output: &[T],
) -> Result<Vec<Option<Vec<T>>>, DescentError> {
    Ok((0..2)
        .map(|i| op.input_requires_grad(i).then(|| grad_output.to_vec()))
        .collect())
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
