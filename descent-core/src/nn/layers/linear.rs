use crate::error::{DescentError, ShapeError};
use crate::nn::init;
use crate::nn::module::Module;
use crate::nn::parameter::Parameter;
use crate::ops::expect_matrix;
use crate::ops::linalg::linear_op;
use crate::ops::traits::Element;
use crate::tensor::Tensor;
use rand::Rng;

/// Applies a linear transformation to the incoming data: y = xA^T + b
#[derive(Debug)]
pub struct Linear<T: Element> {
    weight: Parameter<T>,
    bias: Option<Parameter<T>>,
    in_features: usize,
    out_features: usize,
}

impl<T: Element> Linear<T> {
    /// Creates a new Linear layer initialised from the thread-local generator.
    ///
    /// # Arguments
    ///
    /// * `in_features` - Size of each input sample.
    /// * `out_features` - Size of each output sample.
    /// * `has_bias` - If `true`, the layer will learn an additive bias.
    pub fn new(in_features: usize, out_features: usize, has_bias: bool) -> Result<Self, DescentError> {
        Self::with_rng(in_features, out_features, has_bias, &mut rand::thread_rng())
    }

    /// Creates a new Linear layer drawing its initial values from `rng`.
    ///
    /// The weight `(out_features, in_features)` is Kaiming-uniform; the bias
    /// is uniform on `±1/sqrt(in_features)`.
    pub fn with_rng<R: Rng + ?Sized>(
        in_features: usize,
        out_features: usize,
        has_bias: bool,
        rng: &mut R,
    ) -> Result<Self, DescentError> {
        let weight_tensor = init::kaiming_uniform(&[out_features, in_features], in_features, rng)?;
        let weight = Parameter::new(weight_tensor, Some("weight".to_string()))?;

        let bias = if has_bias {
            let bound = 1.0 / (in_features as f64).sqrt();
            let bias_tensor = init::uniform(&[out_features], bound, rng)?;
            Some(Parameter::new(bias_tensor, Some("bias".to_string()))?)
        } else {
            None
        };

        Ok(Linear {
            weight,
            bias,
            in_features,
            out_features,
        })
    }

    /// Builds a layer from explicit weight `(out, in)` and optional bias `(out)` tensors.
    pub fn from_tensors(weight: Tensor<T>, bias: Option<Tensor<T>>) -> Result<Self, DescentError> {
        let shape = weight.shape();
        let (out_features, in_features) = expect_matrix(&shape, "Linear::from_tensors")?;
        let bias = match bias {
            Some(b) => {
                if b.shape() != vec![out_features] {
                    return Err(ShapeError::IncompatibleShapes {
                        shape1: shape,
                        shape2: b.shape(),
                        operation: "Linear::from_tensors".to_string(),
                    }
                    .into());
                }
                Some(Parameter::new(b, Some("bias".to_string()))?)
            }
            None => None,
        };
        Ok(Linear {
            weight: Parameter::new(weight, Some("weight".to_string()))?,
            bias,
            in_features,
            out_features,
        })
    }

    pub fn weight(&self) -> &Parameter<T> {
        &self.weight
    }

    pub fn bias(&self) -> Option<&Parameter<T>> {
        self.bias.as_ref()
    }

    pub fn in_features(&self) -> usize {
        self.in_features
    }

    pub fn out_features(&self) -> usize {
        self.out_features
    }
}

impl<T: Element> Module<T> for Linear<T> {
    fn forward(&self, input: &Tensor<T>) -> Result<Tensor<T>, DescentError> {
        linear_op(input, self.weight.tensor(), self.bias.as_ref().map(|b| b.tensor()))
    }

    fn parameters(&self) -> Vec<&Parameter<T>> {
        let mut params = vec![&self.weight];
        if let Some(b) = &self.bias {
            params.push(b);
        }
        params
    }

    fn named_parameters(&self) -> Vec<(String, &Parameter<T>)> {
        let mut params = vec![("weight".to_string(), &self.weight)];
        if let Some(b) = &self.bias {
            params.push(("bias".to_string(), b));
        }
        params
    }
}

#[cfg(test)]
#[path = "linear_test.rs"]
mod tests;
