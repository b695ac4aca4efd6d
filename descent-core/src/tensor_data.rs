// src/tensor_data.rs
use std::sync::{Arc, Weak};

use crate::autograd::Operation;
use crate::error::{DescentError, GradientStateError, ShapeError};
use crate::ops::traits::Element;

/// Internal storage and metadata for a Tensor.
///
/// This struct holds the contiguous row-major data buffer, the shape and the
/// autograd bookkeeping of one node of the computation graph.
/// It is wrapped in `Arc<RwLock<TensorData>>` by the `Tensor` struct
/// to allow shared ownership and interior mutability.
#[derive(Debug)]
pub struct TensorData<T: Element> {
    /// The underlying elements, flattened in row-major order.
    pub(crate) data: Vec<T>,
    /// The shape (dimensions) of the tensor. An empty shape is a scalar.
    pub(crate) shape: Vec<usize>,

    // --- Autograd Metadata ---
    /// Flag indicating if the tensor requires gradient computation.
    pub(crate) requires_grad: bool,
    /// Accumulated gradient, same length as `data`.
    /// Leaves allocate it as zeros when `requires_grad` is set. Non-leaf nodes
    /// allocate it on their first backward pass. Always `None` when
    /// `requires_grad` is false.
    pub(crate) grad: Option<Vec<T>>,
    /// The operation that produced this tensor. `None` for leaves.
    pub(crate) grad_fn: Option<Arc<Operation<T>>>,
    /// Bumped on every in-place mutation of `data`.
    pub(crate) version: u64,
    /// Bumped every time a gradient is accumulated into `grad`.
    pub(crate) grad_generation: u64,
    /// Operations that consumed this tensor as an input.
    pub(crate) consumers: Vec<Weak<Operation<T>>>,
}

impl<T: Element> TensorData<T> {
    /// Creates a new leaf `TensorData` from flattened data and a shape.
    ///
    /// # Errors
    /// Returns `ShapeError::TensorCreation` if the length of `data` does not match
    /// the number of elements described by `shape`.
    pub fn new(data: Vec<T>, shape: Vec<usize>) -> Result<Self, DescentError> {
        let numel: usize = shape.iter().product();
        if data.len() != numel {
            return Err(ShapeError::TensorCreation {
                data_len: data.len(),
                shape,
            }
            .into());
        }
        Ok(TensorData {
            data,
            shape,
            requires_grad: false,
            grad: None,
            grad_fn: None,
            version: 0,
            grad_generation: 0,
            consumers: Vec::new(),
        })
    }

    /// Total number of elements.
    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// Drops dead consumer handles and reports whether any consumer is still alive.
    pub(crate) fn has_live_consumer(&mut self) -> bool {
        self.consumers.retain(|op| op.strong_count() > 0);
        !self.consumers.is_empty()
    }

    /// Adds `incoming` element-wise into the gradient buffer, allocating it on first use.
    pub(crate) fn accumulate_grad(&mut self, incoming: &[T]) -> Result<(), DescentError> {
        if incoming.len() != self.data.len() {
            return Err(ShapeError::Mismatch {
                expected: self.shape.clone(),
                actual: vec![incoming.len()],
                operation: "accumulate_grad".to_string(),
            }
            .into());
        }
        let numel = self.data.len();
        let grad = self.grad.get_or_insert_with(|| vec![T::zero(); numel]);
        for (existing, new) in grad.iter_mut().zip(incoming.iter()) {
            *existing += *new;
        }
        self.grad_generation += 1;
        Ok(())
    }

    /// Refuses in-place mutation while the data is needed by a live operation.
    pub(crate) fn check_mutable(&mut self, operation: &str) -> Result<(), DescentError> {
        if self.requires_grad && self.has_live_consumer() {
            return Err(GradientStateError::InplaceOnTrackedTensor {
                operation: operation.to_string(),
            }
            .into());
        }
        Ok(())
    }
}
