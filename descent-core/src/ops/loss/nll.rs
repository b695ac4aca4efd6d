use crate::autograd::{should_record, OpKind, Operation, SavedContext};
use crate::error::{DescentError, ShapeError};
use crate::ops::expect_matrix;
use crate::ops::traits::Element;
use crate::tensor::Tensor;

// --- Forward Operation ---

/// Mean negative log-likelihood of `targets` under `(n, c)` log-probabilities.
///
/// `loss = −(1/n) Σ_i log_probs[i, targets[i]]`, returned as a rank-0 tensor.
///
/// # Errors
/// * `ShapeError::RankMismatch` if `log_probs` is not rank 2.
/// * `ShapeError::Mismatch` if `targets.len() != n`.
/// * `ShapeError::EmptyBatch` if `n == 0`.
/// * `ShapeError::TargetOutOfRange` if a target is `>= c`.
pub fn nll_loss_op<T: Element>(
    log_probs: &Tensor<T>,
    targets: &[usize],
) -> Result<Tensor<T>, DescentError> {
    let shape = log_probs.shape();
    let (n, num_classes) = expect_matrix(&shape, "nll_loss")?;
    if targets.len() != n {
        return Err(ShapeError::Mismatch {
            expected: vec![n],
            actual: vec![targets.len()],
            operation: "nll_loss (targets)".to_string(),
        }
        .into());
    }
    if n == 0 {
        return Err(ShapeError::EmptyBatch {
            operation: "nll_loss".to_string(),
        }
        .into());
    }
    if let Some((index, &target)) = targets.iter().enumerate().find(|&(_, &t)| t >= num_classes) {
        return Err(ShapeError::TargetOutOfRange {
            index,
            target,
            num_classes,
        }
        .into());
    }

    let loss = {
        let guard = log_probs.read_data();
        let picked: T = targets
            .iter()
            .enumerate()
            .map(|(i, &t)| guard.data[i * num_classes + t])
            .sum();
        -picked / T::from_count(n)
    };

    let result = Tensor::scalar(loss);
    if should_record(&[log_probs]) {
        Operation::record(
            OpKind::NllLoss,
            &[log_probs],
            SavedContext::NllTargets {
                targets: targets.to_vec(),
                num_classes,
            },
            &result,
        );
    }
    Ok(result)
}

// --- Backward Operation ---

/// `−g/n` at each `(i, targets[i])`, zero elsewhere.
pub(crate) fn nll_loss_backward<T: Element>(
    op: &Operation<T>,
    grad_output: &[T],
) -> Result<Vec<Option<Vec<T>>>, DescentError> {
    let (targets, num_classes) = match op.saved() {
        SavedContext::NllTargets {
            targets,
            num_classes,
        } => (targets, *num_classes),
        other => {
            return Err(DescentError::InternalError(format!(
                "NllLossBackward expects targets, found {:?}",
                other
            )))
        }
    };
    if !op.input_requires_grad(0) {
        return Ok(vec![None]);
    }
    let n = targets.len();
    let scale = -grad_output[0] / T::from_count(n);
    let mut grad_input = vec![T::zero(); n * num_classes];
    for (i, &t) in targets.iter().enumerate() {
        grad_input[i * num_classes + t] = scale;
    }
    Ok(vec![Some(grad_input)])
}

#[cfg(test)]
#[path = "nll_test.rs"]
mod tests;
