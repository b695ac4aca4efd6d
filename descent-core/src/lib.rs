//! Reverse-mode automatic differentiation and gradient-descent training.
//!
//! A [`Tensor`] is a node of the computation graph. Functions in [`ops`] compute
//! new tensors and, while gradient tracking is enabled, record the
//! [`autograd::Operation`] that produced them. Calling [`Tensor::backward`] on
//! a scalar loss accumulates gradients into every leaf that requires them,
//! which [`optim::Sgd`] then consumes. [`train::Trainer`] drives the whole
//! loop over a [`train::BatchSource`].
//!
//! ```
//! use descent_core::nn::{CrossEntropyLoss, Linear, Loss, Module};
//! use descent_core::optim::{Optimizer, Sgd};
//! use descent_core::Tensor;
//!
//! # fn main() -> Result<(), descent_core::DescentError> {
//! let layer = Linear::<f32>::new(3, 2, true)?;
//! let mut optimizer = Sgd::new(layer.parameters(), 0.1)?;
//!
//! let x = Tensor::new(vec![0.5, -1.0, 2.0, 0.0, 1.0, 1.0], vec![2, 3])?;
//! let loss = CrossEntropyLoss::new().forward(&layer.forward(&x)?, &[0, 1])?;
//! optimizer.zero_grad();
//! loss.backward()?;
//! optimizer.step()?;
//! # Ok(())
//! # }
//! ```

pub mod autograd;
pub mod error;
pub mod model;
pub mod nn;
pub mod ops;
pub mod optim;
pub mod tensor;
pub mod tensor_data;
pub mod train;
pub mod utils;

pub use autograd::{is_grad_enabled, no_grad, with_no_grad, NoGradGuard};
pub use error::{DescentError, GradientStateError, ShapeError};
pub use ops::traits::Element;
pub use tensor::Tensor;
// Re-export traits required by public functions/structs
pub use num_traits;
