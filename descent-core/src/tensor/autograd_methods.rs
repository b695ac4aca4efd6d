use crate::autograd::graph::topological_sort;
use crate::autograd::Operation;
use crate::error::{DescentError, GradientStateError, ShapeError};
use crate::ops::traits::Element;
use crate::tensor::Tensor;
use std::collections::HashMap;
use std::sync::Arc;

impl<T: Element> Tensor<T> {
    /// Checks if this tensor requires gradient computation.
    pub fn requires_grad(&self) -> bool {
        self.read_data().requires_grad
    }

    /// Sets the `requires_grad` flag for this leaf tensor.
    ///
    /// Enabling it allocates a zero gradient buffer; disabling it frees the buffer.
    ///
    /// # Errors
    /// Returns `GradientStateError::NonLeafRequiresGrad` if the tensor was
    /// produced by a recorded operation.
    pub fn set_requires_grad(&self, requires_grad: bool) -> Result<(), DescentError> {
        let mut guard = self.write_data();
        if guard.grad_fn.is_some() {
            return Err(GradientStateError::NonLeafRequiresGrad.into());
        }
        guard.requires_grad = requires_grad;
        if requires_grad {
            if guard.grad.is_none() {
                let numel = guard.numel();
                guard.grad = Some(vec![T::zero(); numel]);
            }
        } else {
            guard.grad = None;
        }
        Ok(())
    }

    /// Returns a copy of the accumulated gradient, if a buffer exists.
    pub fn grad(&self) -> Option<Tensor<T>> {
        let guard = self.read_data();
        guard
            .grad
            .as_ref()
            .map(|g| Tensor::from_raw(g.clone(), guard.shape.clone()))
    }

    /// Returns the operation that produced this tensor, if any.
    pub fn grad_fn(&self) -> Option<Arc<Operation<T>>> {
        self.read_data().grad_fn.clone()
    }

    /// Number of gradient accumulations this node has received so far.
    pub fn grad_generation(&self) -> u64 {
        self.read_data().grad_generation
    }

    /// Accumulates the given gradient into the tensor's `grad` buffer.
    ///
    /// # Errors
    /// * `GradientStateError::RequiresGradNotMet` if the tensor does not require grad.
    /// * `ShapeError::Mismatch` if `grad_to_add` does not have this tensor's shape.
    pub fn acc_grad(&self, grad_to_add: &Tensor<T>) -> Result<(), DescentError> {
        // Copied out first: `grad_to_add` may be this very node.
        let (incoming_shape, incoming) = {
            let g = grad_to_add.read_data();
            (g.shape.clone(), g.data.clone())
        };
        let mut guard = self.write_data();
        if !guard.requires_grad {
            return Err(GradientStateError::RequiresGradNotMet.into());
        }
        if incoming_shape != guard.shape {
            return Err(ShapeError::Mismatch {
                expected: guard.shape.clone(),
                actual: incoming_shape,
                operation: "acc_grad".to_string(),
            }
            .into());
        }
        guard.accumulate_grad(&incoming)
    }

    /// Resets the gradient buffer to zeros. Calling it repeatedly has no further effect.
    pub fn zero_grad(&self) {
        let mut guard = self.write_data();
        if let Some(grad) = guard.grad.as_mut() {
            grad.iter_mut().for_each(|g| *g = T::zero());
        }
    }

    /// Returns a new leaf tensor holding a copy of this tensor's data, without history.
    pub fn detach(&self) -> Tensor<T> {
        let guard = self.read_data();
        Tensor::from_raw(guard.data.clone(), guard.shape.clone())
    }

    /// Performs the backward pass starting from this single-element tensor.
    ///
    /// The gradient of this tensor with respect to itself is seeded to `1`, then
    /// gradients flow back through every recorded operation and are **added**
    /// to the `grad` buffer of every node that requires them, this one and
    /// intermediate results included. Calling `backward` twice without
    /// resetting gradients therefore sums both passes.
    ///
    /// Buffers are only written once the whole pass has succeeded: on error no
    /// gradient changes.
    ///
    /// # Errors
    /// * `GradientStateError::RequiresGradNotMet` if this tensor does not require grad.
    /// * `GradientStateError::BackwardNonScalar` if it holds more than one element.
    /// * `GradientStateError::StaleInput` if a recorded input was modified in place.
    pub fn backward(&self) -> Result<(), DescentError> {
        let (numel, shape) = {
            let guard = self.read_data();
            (guard.numel(), guard.shape.clone())
        };
        if !self.requires_grad() {
            return Err(GradientStateError::RequiresGradNotMet.into());
        }
        if numel != 1 {
            return Err(GradientStateError::BackwardNonScalar { shape }.into());
        }
        self.run_backward(vec![T::one()])
    }

    /// Performs the backward pass with an explicit upstream gradient.
    ///
    /// # Errors
    /// * `ShapeError::Mismatch` if `gradient` does not have this tensor's shape.
    /// * Same as [`Tensor::backward`] otherwise.
    pub fn backward_with_grad(&self, gradient: &Tensor<T>) -> Result<(), DescentError> {
        if !self.requires_grad() {
            return Err(GradientStateError::RequiresGradNotMet.into());
        }
        let expected = self.shape();
        let actual = gradient.shape();
        if expected != actual {
            return Err(ShapeError::Mismatch {
                expected,
                actual,
                operation: "backward".to_string(),
            }
            .into());
        }
        self.run_backward(gradient.to_vec())
    }

    fn run_backward(&self, seed: Vec<T>) -> Result<(), DescentError> {
        let sorted_nodes = topological_sort(self);
        log::debug!(
            "backward: {} nodes reachable from {:?}",
            sorted_nodes.len(),
            self
        );

        // Gradients flowing through this pass, keyed by node. Every consumer of a
        // node is processed before the node itself, so by the time a node is
        // popped its entry holds the sum of all its consumers' contributions.
        let mut grad_map: HashMap<usize, Vec<T>> = HashMap::new();
        grad_map.insert(self.node_id(), seed);

        // Per-node totals, written into the `grad` buffers after the traversal.
        let mut pending: Vec<(&Tensor<T>, Vec<T>)> = Vec::new();

        for node in sorted_nodes.iter().rev() {
            let accumulated = match grad_map.remove(&node.node_id()) {
                Some(g) => g,
                None => continue,
            };

            let (grad_fn, requires_grad) = {
                let guard = node.read_data();
                if accumulated.len() != guard.numel() {
                    return Err(ShapeError::Mismatch {
                        expected: guard.shape.clone(),
                        actual: vec![accumulated.len()],
                        operation: "backward".to_string(),
                    }
                    .into());
                }
                (guard.grad_fn.clone(), guard.requires_grad)
            };

            if let Some(op) = grad_fn {
                let input_grads = op.backward(&accumulated)?;
                if input_grads.len() != op.inputs().len() {
                    return Err(DescentError::InternalError(format!(
                        "{} returned {} gradients for {} inputs",
                        op.kind().name(),
                        input_grads.len(),
                        op.inputs().len()
                    )));
                }

                for (input, maybe_grad) in op.inputs().iter().zip(input_grads) {
                    let grad = match maybe_grad {
                        Some(g) if input.requires_grad() => g,
                        _ => continue,
                    };
                    grad_map
                        .entry(input.node_id())
                        .and_modify(|existing| {
                            for (e, g) in existing.iter_mut().zip(grad.iter()) {
                                *e += *g;
                            }
                        })
                        .or_insert(grad);
                }
            }

            if requires_grad {
                pending.push((node, accumulated));
            }
        }

        for (node, grad) in pending {
            node.write_data().accumulate_grad(&grad)?;
        }
        Ok(())
    }

    /// Frees the computation graph reachable from this tensor.
    ///
    /// Every non-leaf node in the graph (this one included) loses its
    /// operation record and becomes a plain value that no longer requires
    /// gradients. Leaves such as parameters keep their gradients.
    pub fn release_graph(&self) {
        let sorted_nodes = topological_sort(self);
        for node in sorted_nodes {
            let mut guard = node.write_data();
            if guard.grad_fn.take().is_some() {
                guard.requires_grad = false;
                guard.grad = None;
            }
        }
    }
}

#[cfg(test)]
#[path = "autograd_methods_test.rs"]
mod tests;
