// src/tensor/mod.rs

use crate::error::{DescentError, ShapeError};
use crate::ops::traits::Element;
use crate::tensor_data::TensorData;
use std::sync::{Arc, RwLock};

mod autograd_methods;
pub mod create;
mod inplace_ops;
mod op_methods;
mod traits;

pub use create::{full, ones, rand_uniform, randn, zeros, zeros_like};

/// Represents a multi-dimensional array (tensor) and a node of the computation graph.
///
/// `Tensor` uses `Arc<RwLock<TensorData>>` internally to allow for:
/// 1.  **Shared Ownership:** Multiple `Tensor` handles can point to the same
///     node (cheap clones). Operation records keep their inputs alive this way.
/// 2.  **Interior Mutability:** Autograd metadata (`requires_grad`, `grad`,
///     `grad_fn`) can be updated through a shared handle.
///
/// Tensors are created as leaves. Applying an operation to tensors that
/// require gradients produces a new tensor carrying the `Operation` record
/// (`grad_fn`) needed by [`Tensor::backward`].
pub struct Tensor<T: Element> {
    pub(crate) data: Arc<RwLock<TensorData<T>>>,
}

impl<T: Element> Tensor<T> {
    /// Creates a new leaf tensor from flattened row-major data and a shape.
    ///
    /// # Errors
    /// Returns `ShapeError::TensorCreation` if `data.len()` does not equal the
    /// product of `shape`.
    pub fn new(data: Vec<T>, shape: Vec<usize>) -> Result<Self, DescentError> {
        let td = TensorData::new(data, shape)?;
        Ok(Tensor {
            data: Arc::new(RwLock::new(td)),
        })
    }

    /// Creates a new leaf tensor that requires gradients.
    pub fn new_with_grad(data: Vec<T>, shape: Vec<usize>) -> Result<Self, DescentError> {
        let tensor = Self::new(data, shape)?;
        tensor.set_requires_grad(true)?;
        Ok(tensor)
    }

    /// Creates a rank-0 tensor holding a single value.
    pub fn scalar(value: T) -> Self {
        Self::from_raw(vec![value], Vec::new())
    }

    /// Wraps a buffer whose length is already known to match `shape`.
    pub(crate) fn from_raw(data: Vec<T>, shape: Vec<usize>) -> Self {
        debug_assert_eq!(data.len(), shape.iter().product::<usize>());
        Tensor {
            data: Arc::new(RwLock::new(TensorData {
                data,
                shape,
                requires_grad: false,
                grad: None,
                grad_fn: None,
                version: 0,
                grad_generation: 0,
                consumers: Vec::new(),
            })),
        }
    }

    /// Acquires a read lock on the tensor's data.
    /// Panics if the RwLock is poisoned.
    pub fn read_data(&self) -> std::sync::RwLockReadGuard<'_, TensorData<T>> {
        self.data.read().expect("RwLock poisoned")
    }

    /// Acquires a write lock on the tensor's data.
    /// Panics if the RwLock is poisoned.
    pub fn write_data(&self) -> std::sync::RwLockWriteGuard<'_, TensorData<T>> {
        self.data.write().expect("RwLock poisoned")
    }

    /// Stable identity of the underlying node, used as a key during graph traversal.
    pub(crate) fn node_id(&self) -> usize {
        Arc::as_ptr(&self.data) as *const () as usize
    }

    /// Returns the shape of the tensor.
    pub fn shape(&self) -> Vec<usize> {
        self.read_data().shape.clone()
    }

    /// Returns the number of dimensions.
    pub fn rank(&self) -> usize {
        self.read_data().shape.len()
    }

    /// Returns the total number of elements.
    pub fn numel(&self) -> usize {
        self.read_data().numel()
    }

    /// Returns a copy of the data, flattened in row-major order.
    pub fn to_vec(&self) -> Vec<T> {
        self.read_data().data.clone()
    }

    /// Returns the single value of a one-element tensor.
    ///
    /// # Errors
    /// Returns `ShapeError::Mismatch` if the tensor holds more than one element.
    pub fn item(&self) -> Result<T, DescentError> {
        let guard = self.read_data();
        if guard.data.len() != 1 {
            return Err(ShapeError::Mismatch {
                expected: vec![],
                actual: guard.shape.clone(),
                operation: "item".to_string(),
            }
            .into());
        }
        Ok(guard.data[0])
    }

    /// Returns the in-place modification counter of this tensor.
    pub fn version(&self) -> u64 {
        self.read_data().version
    }

    /// Returns `true` if this tensor was not produced by a recorded operation.
    pub fn is_leaf(&self) -> bool {
        self.read_data().grad_fn.is_none()
    }

    /// Returns `true` if both handles point to the same node.
    pub fn same_node(&self, other: &Tensor<T>) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
