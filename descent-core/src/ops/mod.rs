//! # Tensor Operations Module (`ops`)
//!
//! Every differentiable operation lives in its own file and follows one layout:
//!
//! - an `xxx_op` forward function that validates shapes, computes the output
//!   and, when [`crate::autograd::should_record`] says so, attaches an
//!   [`Operation`](crate::autograd::Operation) record to it;
//! - an `xxx_backward` function that [`Operation::backward`](crate::autograd::Operation::backward)
//!   dispatches to for the matching [`OpKind`](crate::autograd::OpKind). It
//!   returns one gradient buffer per input, each with the input's element count.
//!
//! ## Key Submodules:
//!
//! - [`linalg`]: the affine `Linear` transform and its matrix kernels.
//! - [`activation`]: ReLU and row-wise log-softmax.
//! - [`loss`]: negative log-likelihood and the cross-entropy composite.
//! - [`arithmetic`]: element-wise addition.
//! - [`reduction`]: full `sum` and `mean`.

pub mod activation;
pub mod arithmetic;
pub mod linalg;
pub mod loss;
pub mod reduction;
pub mod traits;

use crate::error::{DescentError, ShapeError};

/// Checks that `shape` is a rank-2 `(rows, cols)` shape and returns both dimensions.
pub(crate) fn expect_matrix(shape: &[usize], operation: &str) -> Result<(usize, usize), DescentError> {
    if shape.len() != 2 {
        return Err(ShapeError::RankMismatch {
            expected: 2,
            actual: shape.len(),
            operation: operation.to_string(),
        }
        .into());
    }
    Ok((shape[0], shape[1]))
}
