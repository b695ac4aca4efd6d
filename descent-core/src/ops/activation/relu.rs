use crate::autograd::{should_record, OpKind, Operation, SavedContext};
use crate::error::DescentError;
use crate::ops::traits::Element;
use crate::tensor::Tensor;

// --- Forward Operation ---

/// Applies the Rectified Linear Unit (ReLU) activation function element-wise.
/// ReLU(x) = max(0, x)
pub fn relu_op<T: Element>(input: &Tensor<T>) -> Result<Tensor<T>, DescentError> {
    let (output, mask, shape) = {
        let guard = input.read_data();
        let mask: Vec<bool> = guard.data.iter().map(|&x| x > T::zero()).collect();
        let output: Vec<T> = guard
            .data
            .iter()
            .zip(mask.iter())
            .map(|(&x, &positive)| if positive { x } else { T::zero() })
            .collect();
        (output, mask, guard.shape.clone())
    };

    let result = Tensor::new(output, shape)?;
    if should_record(&[input]) {
        Operation::record(OpKind::Relu, &[input], SavedContext::ReluMask(mask), &result);
    }
    Ok(result)
}

// --- Backward Operation ---

/// grad_input = grad_output * (input > 0)
pub(crate) fn relu_backward<T: Element>(
    op: &Operation<T>,
    grad_output: &[T],
) -> Result<Vec<Option<Vec<T>>>, DescentError> {
    let mask = match op.saved() {
        SavedContext::ReluMask(mask) => mask,
        other => {
            return Err(DescentError::InternalError(format!(
                "ReluBackward expects a mask, found {:?}",
                other
            )))
        }
    };
    if !op.input_requires_grad(0) {
        return Ok(vec![None]);
    }
    let grad_input = grad_output
        .iter()
        .zip(mask.iter())
        .map(|(&g, &positive)| if positive { g } else { T::zero() })
        .collect();
    Ok(vec![Some(grad_input)])
}

#[cfg(test)]
#[path = "relu_test.rs"]
mod tests;
