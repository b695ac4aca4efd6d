use crate::error::DescentError;
use crate::nn::module::Module;
use crate::nn::parameter::Parameter;
use crate::ops::activation::relu_op;
use crate::ops::traits::Element;
use crate::tensor::Tensor;

/// Layer that applies the Rectified Linear Unit (ReLU) activation function.
///
/// This layer does not have any learnable parameters.
#[derive(Debug, Default, Clone)]
pub struct ReLU {}

impl ReLU {
    /// Creates a new ReLU layer.
    pub fn new() -> Self {
        ReLU {}
    }
}

impl<T: Element> Module<T> for ReLU {
    fn forward(&self, input: &Tensor<T>) -> Result<Tensor<T>, DescentError> {
        relu_op(input)
    }

    fn parameters(&self) -> Vec<&Parameter<T>> {
        Vec::new()
    }

    fn named_parameters(&self) -> Vec<(String, &Parameter<T>)> {
        Vec::new()
    }
}
