use crate::error::DescentError;
use crate::nn::parameter::Parameter;
use crate::ops::traits::Element;
use crate::optim::optimizer_trait::Optimizer;
use crate::tensor::Tensor;

/// Implements the Stochastic Gradient Descent (SGD) optimizer.
///
/// For every parameter `p` with gradient `g`:
///
/// ```text
/// d = g + weight_decay · p
/// v = momentum · v + d        (only when momentum > 0)
/// p = p − lr · v              (or p − lr · d without momentum)
/// ```
///
/// Parameters are updated independently of each other.
#[derive(Debug)]
pub struct Sgd<T: Element> {
    params: Vec<Tensor<T>>,
    lr: f64,
    momentum: f64,
    weight_decay: f64,
    momentum_buffers: Vec<Option<Vec<T>>>,
    /// `grad_generation` of each parameter when it was last stepped.
    stepped_generations: Vec<u64>,
}

fn validate_lr(lr: f64) -> Result<(), DescentError> {
    if !lr.is_finite() || lr <= 0.0 {
        return Err(DescentError::InvalidHyperparameter {
            name: "lr".to_string(),
            reason: format!("must be finite and > 0, got {}", lr),
        });
    }
    Ok(())
}

impl<T: Element> Sgd<T> {
    /// Creates a new `Sgd` optimizer over `params` with learning rate `lr`.
    ///
    /// The optimizer keeps its own handles to the parameters, so it can outlive
    /// the borrow of the model they were collected from.
    ///
    /// # Errors
    /// Returns `DescentError::InvalidHyperparameter` unless `lr` is finite and positive.
    pub fn new<'a, I>(params: I, lr: f64) -> Result<Self, DescentError>
    where
        I: IntoIterator<Item = &'a Parameter<T>>,
    {
        validate_lr(lr)?;
        let params: Vec<Tensor<T>> = params.into_iter().map(|p| p.tensor().clone()).collect();
        let count = params.len();
        log::debug!("Sgd: {} parameters, lr = {}", count, lr);
        Ok(Sgd {
            params,
            lr,
            momentum: 0.0,
            weight_decay: 0.0,
            momentum_buffers: vec![None; count],
            stepped_generations: vec![0; count],
        })
    }

    /// Enables classical momentum with factor `momentum` in `[0, 1)`.
    pub fn with_momentum(mut self, momentum: f64) -> Result<Self, DescentError> {
        if !(0.0..1.0).contains(&momentum) {
            return Err(DescentError::InvalidHyperparameter {
                name: "momentum".to_string(),
                reason: format!("must be in [0, 1), got {}", momentum),
            });
        }
        self.momentum = momentum;
        Ok(self)
    }

    /// Enables L2 weight decay with factor `weight_decay >= 0`.
    pub fn with_weight_decay(mut self, weight_decay: f64) -> Result<Self, DescentError> {
        if !weight_decay.is_finite() || weight_decay < 0.0 {
            return Err(DescentError::InvalidHyperparameter {
                name: "weight_decay".to_string(),
                reason: format!("must be finite and >= 0, got {}", weight_decay),
            });
        }
        self.weight_decay = weight_decay;
        Ok(self)
    }

    pub fn momentum(&self) -> f64 {
        self.momentum
    }

    pub fn weight_decay(&self) -> f64 {
        self.weight_decay
    }

    /// Number of managed parameters.
    pub fn num_params(&self) -> usize {
        self.params.len()
    }
}

impl<T: Element> Optimizer for Sgd<T> {
    fn step(&mut self) -> Result<(), DescentError> {
        let lr = T::from_f64_lossy(self.lr);
        let momentum = T::from_f64_lossy(self.momentum);
        let weight_decay = T::from_f64_lossy(self.weight_decay);
        let use_momentum = self.momentum != 0.0;
        let use_decay = self.weight_decay != 0.0;

        let mut any_fresh_grad = false;
        for (index, param) in self.params.iter().enumerate() {
            if !param.requires_grad() {
                continue;
            }
            let generation = param.grad_generation();
            if self.stepped_generations[index] != generation {
                any_fresh_grad = true;
            }
            self.stepped_generations[index] = generation;

            let buffer_slot = &mut self.momentum_buffers[index];
            param.update_with_grad(|data, grad| {
                let direction: Vec<T> = if use_decay {
                    grad.iter()
                        .zip(data.iter())
                        .map(|(&g, &p)| g + weight_decay * p)
                        .collect()
                } else {
                    grad.to_vec()
                };
                let direction = if use_momentum {
                    let buffer = buffer_slot.get_or_insert_with(|| vec![T::zero(); direction.len()]);
                    for (v, &d) in buffer.iter_mut().zip(direction.iter()) {
                        *v = momentum * *v + d;
                    }
                    buffer.clone()
                } else {
                    direction
                };
                for (p, d) in data.iter_mut().zip(direction) {
                    *p -= lr * d;
                }
            })?;
        }

        if !any_fresh_grad && !self.params.is_empty() {
            log::warn!(
                "Sgd::step called without a new gradient since the previous step; \
                 was backward() skipped?"
            );
        }
        Ok(())
    }

    fn zero_grad(&mut self) {
        for param in &self.params {
            param.zero_grad();
        }
    }

    fn learning_rate(&self) -> f64 {
        self.lr
    }

    fn set_learning_rate(&mut self, lr: f64) -> Result<(), DescentError> {
        validate_lr(lr)?;
        self.lr = lr;
        Ok(())
    }
}
