use crate::error::DescentError;
use crate::ops::traits::Element;
use crate::tensor::Tensor;
use std::fmt;
use std::ops::Deref;

/// A wrapper around a Tensor indicating it is a learnable parameter of a Module.
///
/// Parameters are leaves with `requires_grad = true`. Their data is only
/// changed by an optimizer `step()` or by [`crate::nn::Module::load_state_dict`].
pub struct Parameter<T: Element> {
    tensor: Tensor<T>,
    name: Option<String>,
}

impl<T: Element> Parameter<T> {
    /// Creates a new Parameter from a leaf Tensor and enables gradient tracking on it.
    ///
    /// # Errors
    /// Returns `GradientStateError::NonLeafRequiresGrad` if `tensor` was produced
    /// by a recorded operation.
    pub fn new(tensor: Tensor<T>, name: Option<String>) -> Result<Self, DescentError> {
        tensor.set_requires_grad(true)?;
        Ok(Parameter { tensor, name })
    }

    /// Creates a new Parameter without a name.
    pub fn new_unnamed(tensor: Tensor<T>) -> Result<Self, DescentError> {
        Self::new(tensor, None)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    /// Returns the underlying tensor handle.
    pub fn tensor(&self) -> &Tensor<T> {
        &self.tensor
    }

    /// Consumes the Parameter and returns the underlying Tensor.
    pub fn into_inner(self) -> Tensor<T> {
        self.tensor
    }
}

impl<T: Element> Deref for Parameter<T> {
    type Target = Tensor<T>;

    fn deref(&self) -> &Self::Target {
        &self.tensor
    }
}

impl<T: Element> fmt::Debug for Parameter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "Parameter(name={}, {:?})", name, self.tensor),
            None => write!(f, "Parameter({:?})", self.tensor),
        }
    }
}

impl<T: Element> Clone for Parameter<T> {
    /// Cloning a Parameter clones the handle: both share the same node.
    fn clone(&self) -> Self {
        Parameter {
            tensor: self.tensor.clone(),
            name: self.name.clone(),
        }
    }
}
