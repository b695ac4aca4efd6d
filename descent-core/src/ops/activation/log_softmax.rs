use crate::autograd::{should_record, OpKind, Operation, SavedContext};
use crate::error::DescentError;
use crate::ops::expect_matrix;
use crate::ops::traits::Element;
use crate::tensor::Tensor;

// --- Forward Operation ---

/// Row-wise log-softmax of a `(n, c)` tensor.
///
/// `out[i, j] = x[i, j] − max_i − ln Σ_k exp(x[i, k] − max_i)`. Subtracting the
/// row maximum keeps every exponent `<= 0`, so large logits cannot overflow.
///
/// # Errors
/// Returns `ShapeError::RankMismatch` if `input` is not rank 2.
pub fn log_softmax_op<T: Element>(input: &Tensor<T>) -> Result<Tensor<T>, DescentError> {
    let shape = input.shape();
    let (rows, cols) = expect_matrix(&shape, "log_softmax")?;

    let output = {
        let guard = input.read_data();
        let mut output = Vec::with_capacity(rows * cols);
        for row in guard.data.chunks(cols.max(1)).take(rows) {
            let max = row.iter().fold(T::neg_infinity(), |m, &x| m.max(x));
            let sum_exp: T = row.iter().map(|&x| (x - max).exp()).sum();
            let log_norm = max + sum_exp.ln();
            output.extend(row.iter().map(|&x| x - log_norm));
        }
        output
    };

    let result = Tensor::new(output.clone(), shape)?;
    if should_record(&[input]) {
        Operation::record(
            OpKind::LogSoftmax,
            &[input],
            SavedContext::LogSoftmax { output, rows, cols },
            &result,
        );
    }
    Ok(result)
}

// --- Backward Operation ---

/// `dx = dy − softmax(x) · Σ_row dy`, with `softmax(x) = exp(out)`.
pub(crate) fn log_softmax_backward<T: Element>(
    op: &Operation<T>,
    grad_output: &[T],
) -> Result<Vec<Option<Vec<T>>>, DescentError> {
    let (output, cols) = match op.saved() {
        SavedContext::LogSoftmax { output, cols, .. } => (output, *cols),
        other => {
            return Err(DescentError::InternalError(format!(
                "LogSoftmaxBackward expects its forward output, found {:?}",
                other
            )))
        }
    };
    if !op.input_requires_grad(0) {
        return Ok(vec![None]);
    }

    let mut grad_input = Vec::with_capacity(grad_output.len());
    for (dy_row, out_row) in grad_output.chunks(cols.max(1)).zip(output.chunks(cols.max(1))) {
        let row_sum: T = dy_row.iter().copied().sum();
        grad_input.extend(
            dy_row
                .iter()
                .zip(out_row)
                .map(|(&dy, &logp)| dy - logp.exp() * row_sum),
        );
    }
    Ok(vec![Some(grad_input)])
}

#[cfg(test)]
#[path = "log_softmax_test.rs"]
mod tests;
