use crate::autograd::{should_record, OpKind, Operation, SavedContext};
use crate::error::{DescentError, ShapeError};
use crate::ops::expect_matrix;
use crate::ops::linalg::matmul::{matmul_nn, matmul_nt, matmul_tn};
use crate::ops::traits::Element;
use crate::tensor::Tensor;

// --- Forward Operation ---

/// Affine transform `y = x · Wᵀ + b`.
///
/// * `input`: `(n, in_features)`
/// * `weight`: `(out_features, in_features)`
/// * `bias`: `(out_features)`, optional
///
/// Returns a tensor of shape `(n, out_features)`.
///
/// # Errors
/// * `ShapeError::RankMismatch` if `input` or `weight` is not rank 2 or `bias` is not rank 1.
/// * `ShapeError::IncompatibleShapes` if the feature dimensions disagree.
pub fn linear_op<T: Element>(
    input: &Tensor<T>,
    weight: &Tensor<T>,
    bias: Option<&Tensor<T>>,
) -> Result<Tensor<T>, DescentError> {
    let input_shape = input.shape();
    let weight_shape = weight.shape();
    let (n, in_features) = expect_matrix(&input_shape, "linear (input)")?;
    let (out_features, weight_in) = expect_matrix(&weight_shape, "linear (weight)")?;
    if in_features != weight_in {
        return Err(ShapeError::IncompatibleShapes {
            shape1: input_shape,
            shape2: weight_shape,
            operation: "linear".to_string(),
        }
        .into());
    }
    if let Some(b) = bias {
        let bias_shape = b.shape();
        if bias_shape.len() != 1 {
            return Err(ShapeError::RankMismatch {
                expected: 1,
                actual: bias_shape.len(),
                operation: "linear (bias)".to_string(),
            }
            .into());
        }
        if bias_shape[0] != out_features {
            return Err(ShapeError::IncompatibleShapes {
                shape1: weight_shape,
                shape2: bias_shape,
                operation: "linear".to_string(),
            }
            .into());
        }
    }

    let mut output = {
        let x = input.read_data();
        let w = weight.read_data();
        matmul_nt(&x.data, &w.data, n, in_features, out_features)
    };
    if let Some(b) = bias {
        let b = b.read_data();
        for row in output.chunks_mut(out_features.max(1)) {
            for (y, &bj) in row.iter_mut().zip(b.data.iter()) {
                *y += bj;
            }
        }
    }

    let result = Tensor::new(output, vec![n, out_features])?;

    let mut inputs = vec![input, weight];
    if let Some(b) = bias {
        inputs.push(b);
    }
    if should_record(&inputs) {
        Operation::record(OpKind::Linear, &inputs, SavedContext::Inputs, &result);
    }
    Ok(result)
}

// --- Backward Operation ---

/// `dx = dy · W`, `dW = dyᵀ · x`, `db = Σ_rows dy`.
pub(crate) fn linear_backward<T: Element>(
    op: &Operation<T>,
    grad_output: &[T],
) -> Result<Vec<Option<Vec<T>>>, DescentError> {
    let inputs = op.inputs();
    if inputs.len() < 2 {
        return Err(DescentError::InternalError(format!(
            "LinearBackward expects 2 or 3 inputs, got {}",
            inputs.len()
        )));
    }
    let (input, weight) = (&inputs[0], &inputs[1]);
    let input_shape = input.shape();
    let weight_shape = weight.shape();
    let (n, in_features) = expect_matrix(&input_shape, "LinearBackward")?;
    let out_features = weight_shape[0];

    let grad_input = if op.input_requires_grad(0) {
        let w = weight.read_data();
        Some(matmul_nn(grad_output, &w.data, n, out_features, in_features))
    } else {
        None
    };

    let grad_weight = if op.input_requires_grad(1) {
        let x = input.read_data();
        Some(matmul_tn(grad_output, &x.data, out_features, n, in_features))
    } else {
        None
    };

    let mut grads = vec![grad_input, grad_weight];
    if inputs.len() == 3 {
        let grad_bias = if op.input_requires_grad(2) {
            let mut db = vec![T::zero(); out_features];
            for row in grad_output.chunks(out_features.max(1)) {
                for (acc, &g) in db.iter_mut().zip(row) {
                    *acc += g;
                }
            }
            Some(db)
        } else {
            None
        };
        grads.push(grad_bias);
    }
    Ok(grads)
}

#[cfg(test)]
#[path = "linear_test.rs"]
mod tests;
