// src/nn/losses/mod.rs

pub mod nll;

pub use nll::{CrossEntropyLoss, NllLoss};

use crate::error::DescentError;
use crate::ops::traits::Element;
use crate::tensor::Tensor;

/// A scalar training objective over a batch of predictions and class targets.
pub trait Loss<T: Element>: std::fmt::Debug + Send + Sync {
    /// Computes the mean loss over the batch as a rank-0 tensor.
    fn forward(&self, predictions: &Tensor<T>, targets: &[usize]) -> Result<Tensor<T>, DescentError>;
}
