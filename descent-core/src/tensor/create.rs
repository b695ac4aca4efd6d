// src/tensor/create.rs

use crate::error::DescentError;
use crate::ops::traits::Element;
use crate::tensor::Tensor;
use rand::distributions::Uniform;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// Creates a new tensor filled with zeros with the specified shape.
pub fn zeros<T: Element>(shape: &[usize]) -> Result<Tensor<T>, DescentError> {
    full(shape, T::zero())
}

/// Creates a new tensor filled with ones with the specified shape.
pub fn ones<T: Element>(shape: &[usize]) -> Result<Tensor<T>, DescentError> {
    full(shape, T::one())
}

/// Creates a new tensor filled with a specific value with the specified shape.
pub fn full<T: Element>(shape: &[usize], value: T) -> Result<Tensor<T>, DescentError> {
    let numel = shape.iter().product();
    Tensor::new(vec![value; numel], shape.to_vec())
}

/// Creates a new tensor filled with zeros, having the same shape as the input tensor.
pub fn zeros_like<T: Element>(tensor: &Tensor<T>) -> Result<Tensor<T>, DescentError> {
    zeros(&tensor.shape())
}

/// Creates a tensor with elements drawn uniformly from `[low, high)`.
pub fn rand_uniform<T, R>(
    shape: &[usize],
    low: f64,
    high: f64,
    rng: &mut R,
) -> Result<Tensor<T>, DescentError>
where
    T: Element,
    R: Rng + ?Sized,
{
    if !low.is_finite() || !high.is_finite() {
        return Err(DescentError::InvalidHyperparameter {
            name: "rand_uniform bounds".to_string(),
            reason: format!("bounds must be finite, got [{}, {})", low, high),
        });
    }
    if low >= high {
        return Err(DescentError::InvalidHyperparameter {
            name: "rand_uniform bounds".to_string(),
            reason: format!("low ({}) must be smaller than high ({})", low, high),
        });
    }
    let numel = shape.iter().product();
    let dist = Uniform::new(low, high);
    let data_vec: Vec<T> = (0..numel)
        .map(|_| T::from_f64_lossy(dist.sample(rng)))
        .collect();
    Tensor::new(data_vec, shape.to_vec())
}

/// Creates a tensor with elements drawn from the standard normal distribution.
pub fn randn<T: Element>(shape: &[usize]) -> Result<Tensor<T>, DescentError> {
    let numel = shape.iter().product();
    let mut rng = rand::thread_rng();
    let data_vec: Vec<T> = (0..numel)
        .map(|_| {
            let v: f64 = StandardNormal.sample(&mut rng);
            T::from_f64_lossy(v)
        })
        .collect();
    Tensor::new(data_vec, shape.to_vec())
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
