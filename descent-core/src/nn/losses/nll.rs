use crate::error::DescentError;
use crate::nn::losses::Loss;
use crate::ops::loss::{cross_entropy_op, nll_loss_op};
use crate::ops::traits::Element;
use crate::tensor::Tensor;

/// Negative log-likelihood over `(n, c)` log-probabilities, averaged over the batch.
///
/// Pair it with a [`crate::nn::layers::LogSoftmax`] output layer.
#[derive(Debug, Default, Clone)]
pub struct NllLoss {}

impl NllLoss {
    pub fn new() -> Self {
        NllLoss {}
    }
}

impl<T: Element> Loss<T> for NllLoss {
    fn forward(&self, log_probs: &Tensor<T>, targets: &[usize]) -> Result<Tensor<T>, DescentError> {
        nll_loss_op(log_probs, targets)
    }
}

/// Cross-entropy over raw `(n, c)` logits: log-softmax followed by NLL.
#[derive(Debug, Default, Clone)]
pub struct CrossEntropyLoss {}

impl CrossEntropyLoss {
    pub fn new() -> Self {
        CrossEntropyLoss {}
    }
}

impl<T: Element> Loss<T> for CrossEntropyLoss {
    fn forward(&self, logits: &Tensor<T>, targets: &[usize]) -> Result<Tensor<T>, DescentError> {
        cross_entropy_op(logits, targets)
    }
}
