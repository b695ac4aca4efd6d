// src/ops/loss/mod.rs

//! # Loss Functions
//!
//! Scalar losses over a batch of class scores and integer targets.

pub mod nll;

pub use nll::nll_loss_op;

use crate::error::DescentError;
use crate::ops::activation::log_softmax::log_softmax_op;
use crate::ops::traits::Element;
use crate::tensor::Tensor;

/// Cross-entropy between raw `(n, c)` logits and class indices:
/// `nll_loss(log_softmax(logits), targets)`.
pub fn cross_entropy_op<T: Element>(
    logits: &Tensor<T>,
    targets: &[usize],
) -> Result<Tensor<T>, DescentError> {
    let log_probs = log_softmax_op(logits)?;
    nll_loss_op(&log_probs, targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autograd::grad_check::check_grad;
    use approx::assert_relative_eq;

    #[test]
    fn test_cross_entropy_uniform_logits() {
        let logits = Tensor::new(vec![0.0_f64; 8], vec![2, 4]).unwrap();
        let loss = cross_entropy_op(&logits, &[1, 3]).unwrap();
        assert_relative_eq!(loss.item().unwrap(), 4.0_f64.ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_cross_entropy_gradient_is_softmax_minus_onehot() {
        let logits = Tensor::new_with_grad(vec![1.0_f64, 2.0, 0.5, -1.0, 0.0, 3.0], vec![2, 3]).unwrap();
        let targets = [2, 0];
        cross_entropy_op(&logits, &targets).unwrap().backward().unwrap();

        let grad = logits.grad().unwrap().to_vec();
        let data = logits.to_vec();
        for (row, &t) in targets.iter().enumerate() {
            let xs = &data[row * 3..row * 3 + 3];
            let norm: f64 = xs.iter().map(|v| v.exp()).sum();
            for j in 0..3 {
                let onehot = if j == t { 1.0 } else { 0.0 };
                let expected = (xs[j].exp() / norm - onehot) / 2.0;
                assert_relative_eq!(grad[row * 3 + j], expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_cross_entropy_grad_check() {
        let logits = Tensor::new_with_grad(vec![0.3_f64, -1.1, 2.2, 0.7, 0.0, -0.4, 1.5, 1.0], vec![2, 4]).unwrap();
        let seed = Tensor::scalar(1.0);
        check_grad(
            |inputs| cross_entropy_op(&inputs[0], &[3, 1]),
            &[logits],
            &seed,
            1e-6,
            1e-6,
            1e-5,
        )
        .unwrap();
    }
}
