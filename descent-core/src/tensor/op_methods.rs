use crate::error::DescentError;
use crate::ops;
use crate::ops::traits::Element;
use crate::tensor::Tensor;

/// Method forms of the `ops` functions.
impl<T: Element> Tensor<T> {
    /// See [`ops::arithmetic::add_op`].
    pub fn add(&self, other: &Tensor<T>) -> Result<Tensor<T>, DescentError> {
        ops::arithmetic::add_op(self, other)
    }

    /// See [`ops::activation::relu_op`].
    pub fn relu(&self) -> Result<Tensor<T>, DescentError> {
        ops::activation::relu_op(self)
    }

    /// See [`ops::activation::log_softmax_op`].
    pub fn log_softmax(&self) -> Result<Tensor<T>, DescentError> {
        ops::activation::log_softmax_op(self)
    }

    /// See [`ops::reduction::sum_op`].
    pub fn sum(&self) -> Result<Tensor<T>, DescentError> {
        ops::reduction::sum_op(self)
    }

    /// See [`ops::reduction::mean_op`].
    pub fn mean(&self) -> Result<Tensor<T>, DescentError> {
        ops::reduction::mean_op(self)
    }

    /// See [`ops::linalg::linear_op`].
    pub fn linear(
        &self,
        weight: &Tensor<T>,
        bias: Option<&Tensor<T>>,
    ) -> Result<Tensor<T>, DescentError> {
        ops::linalg::linear_op(self, weight, bias)
    }
}
