use crate::error::DescentError;
use crate::nn::module::Module;
use crate::nn::parameter::Parameter;
use crate::ops::activation::log_softmax_op;
use crate::ops::traits::Element;
use crate::tensor::Tensor;

/// Row-wise log-softmax over `(n, c)` scores. No learnable parameters.
#[derive(Debug, Default, Clone)]
pub struct LogSoftmax {}

impl LogSoftmax {
    pub fn new() -> Self {
        LogSoftmax {}
    }
}

impl<T: Element> Module<T> for LogSoftmax {
    fn forward(&self, input: &Tensor<T>) -> Result<Tensor<T>, DescentError> {
        log_softmax_op(input)
    }

    fn parameters(&self) -> Vec<&Parameter<T>> {
        Vec::new()
    }

    fn named_parameters(&self) -> Vec<(String, &Parameter<T>)> {
        Vec::new()
    }
}
