//! Reverse-mode automatic differentiation.
//!
//! Forward functions in [`crate::ops`] attach an [`Operation`] record to their
//! output whenever [`should_record`] says so. [`crate::Tensor::backward`] then
//! walks those records in reverse topological order and accumulates
//! gradients into every leaf that requires them.

pub mod grad_check;
pub mod grad_mode;
pub(crate) mod graph;
pub mod operation;

pub use grad_check::{check_grad, GradCheckError};
pub use grad_mode::{is_grad_enabled, no_grad, with_no_grad, NoGradGuard};
pub use operation::{OpKind, Operation, SavedContext};

use crate::ops::traits::Element;
use crate::tensor::Tensor;

/// Returns `true` if an operation on `inputs` must be recorded: tracking is
/// enabled on this thread and at least one input requires gradients.
pub(crate) fn should_record<T: Element>(inputs: &[&Tensor<T>]) -> bool {
    is_grad_enabled() && inputs.iter().any(|t| t.requires_grad())
}
