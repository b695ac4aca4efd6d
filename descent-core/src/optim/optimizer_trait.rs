use crate::error::DescentError;

/// Trait defining the common interface for all optimizers.
///
/// Optimizers are responsible for updating model parameters based on their gradients.
pub trait Optimizer {
    /// Performs a single optimization step.
    ///
    /// Applies the update rule to every managed parameter in place, using its
    /// accumulated gradient.
    fn step(&mut self) -> Result<(), DescentError>;

    /// Clears the gradients of all parameters managed by the optimizer.
    ///
    /// Gradients accumulate across backward passes, so this is called before
    /// each new backward pass of a training iteration.
    fn zero_grad(&mut self);

    /// Returns the current learning rate.
    fn learning_rate(&self) -> f64;

    /// Replaces the learning rate.
    ///
    /// # Errors
    /// Returns `DescentError::InvalidHyperparameter` unless `lr` is finite and positive.
    fn set_learning_rate(&mut self, lr: f64) -> Result<(), DescentError>;
}
