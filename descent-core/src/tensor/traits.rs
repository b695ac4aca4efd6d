// src/tensor/traits.rs

use crate::ops::traits::Element;
use crate::tensor::Tensor;
use std::fmt::{self, Debug};
use std::sync::Arc;

impl<T: Element> Clone for Tensor<T> {
    /// Clones the Tensor. This is a shallow clone that increases the reference count
    /// of the underlying node. Modifications through one clone are visible
    /// through the others.
    fn clone(&self) -> Self {
        Tensor {
            data: Arc::clone(&self.data),
        }
    }
}

impl<T: Element> Debug for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.data.read() {
            Ok(guard) => write!(
                f,
                "Tensor(shape={:?}, requires_grad={}, has_grad={}, grad_fn={}, version={})",
                guard.shape,
                guard.requires_grad,
                guard.grad.is_some(),
                guard
                    .grad_fn
                    .as_ref()
                    .map(|op| op.kind().name())
                    .unwrap_or("None"),
                guard.version,
            ),
            Err(_) => write!(f, "Tensor(Error: RwLock poisoned)"),
        }
    }
}

impl<T: Element> PartialEq for Tensor<T> {
    /// Two tensors are equal when they have the same shape and the same values.
    /// Autograd metadata is not compared.
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.data, &other.data) {
            return true;
        }
        let a = self.read_data();
        let b = other.read_data();
        a.shape == b.shape && a.data == b.data
    }
}
