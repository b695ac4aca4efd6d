use crate::autograd::grad_mode::with_no_grad;
use crate::error::DescentError;
use crate::ops::traits::Element;
use crate::tensor::Tensor;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input tensor at index {input_index}, element index {element_index}: Analytical grad {analytical_grad:?} != Numerical grad {numerical_grad:?}. Difference: {difference:?}")]
    GradientMismatch {
        input_index: usize,
        element_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },
    #[error("Forward function execution failed during gradient check: {0}")]
    ForwardPassError(DescentError),
    #[error("Backward pass execution failed during gradient check: {0}")]
    BackwardPassError(DescentError),
    #[error("Tensor error during intermediate calculation: {0}")]
    TensorError(DescentError),
    #[error("Input tensor {input_index} requires grad but has no gradient after backward pass.")]
    MissingAnalyticalGrad { input_index: usize },
    #[error("Numerical gradient is NaN or infinite for input {input_index}, element {element_index}. Details: Loss+: {loss_plus:?}, Loss-: {loss_minus:?}")]
    NumericalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },
    #[error("Analytical gradient is NaN or infinite for input {input_index}, element {element_index}. Value: {value:?}")]
    AnalyticalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
        value: f64,
    },
    #[error("Gradient check input tensor must be a leaf node (no grad_fn). Input index: {input_index}")]
    InputNotLeaf { input_index: usize },
    #[error("Function did not propagate requires_grad correctly.")]
    RequiresGradPropagationError,
    #[error("Output gradient shape {actual:?} does not match function output shape {expected:?}")]
    OutputGradShape {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
}

impl From<DescentError> for GradCheckError {
    fn from(err: DescentError) -> Self {
        GradCheckError::TensorError(err)
    }
}

/// Checks analytical gradients against centered finite differences.
///
/// `func` is evaluated once with gradient tracking to obtain the analytical
/// gradients of `Σ func(inputs) ⊙ output_grad`, then twice per element of every
/// input that requires grad (with that element moved by `±epsilon`) to obtain
/// the numerical estimate `(L(x + ε) − L(x − ε)) / 2ε`.
///
/// An element passes when `|analytical − numerical| <= abs_tol + rel_tol · |numerical|`.
///
/// Inputs that require grad must be leaves; their gradient buffers are reset
/// before the analytical pass.
pub fn check_grad<T, F>(
    func: F,
    inputs: &[Tensor<T>],
    output_grad: &Tensor<T>,
    epsilon: f64,
    abs_tol: f64,
    rel_tol: f64,
) -> Result<(), GradCheckError>
where
    T: Element,
    F: Fn(&[Tensor<T>]) -> Result<Tensor<T>, DescentError>,
{
    for (i, input) in inputs.iter().enumerate() {
        if input.requires_grad() && !input.is_leaf() {
            return Err(GradCheckError::InputNotLeaf { input_index: i });
        }
    }

    // --- Analytical pass ---
    for input in inputs.iter().filter(|t| t.requires_grad()) {
        input.zero_grad();
    }
    let output = func(inputs).map_err(GradCheckError::ForwardPassError)?;
    if output.shape() != output_grad.shape() {
        return Err(GradCheckError::OutputGradShape {
            expected: output.shape(),
            actual: output_grad.shape(),
        });
    }
    if inputs.iter().any(|t| t.requires_grad()) {
        if !output.requires_grad() {
            return Err(GradCheckError::RequiresGradPropagationError);
        }
        output
            .backward_with_grad(output_grad)
            .map_err(GradCheckError::BackwardPassError)?;
    }
    drop(output);

    let weights: Vec<f64> = output_grad.to_vec().iter().map(|g| g.to_f64_lossy()).collect();

    // --- Numerical pass ---
    for (i, original_input) in inputs.iter().enumerate() {
        if !original_input.requires_grad() {
            continue;
        }
        let analytical: Vec<f64> = original_input
            .grad()
            .ok_or(GradCheckError::MissingAnalyticalGrad { input_index: i })?
            .to_vec()
            .iter()
            .map(|g| g.to_f64_lossy())
            .collect();
        let original_data: Vec<f64> = original_input
            .to_vec()
            .iter()
            .map(|x| x.to_f64_lossy())
            .collect();
        let shape = original_input.shape();

        for elem_idx in 0..original_data.len() {
            let perturbed_loss = |delta: f64| -> Result<f64, GradCheckError> {
                let mut data = original_data.clone();
                data[elem_idx] += delta;
                let perturbed =
                    Tensor::new(data.into_iter().map(T::from_f64_lossy).collect(), shape.clone())?;
                let mut perturbed_inputs = inputs.to_vec();
                perturbed_inputs[i] = perturbed;
                let out = with_no_grad(|| func(&perturbed_inputs))
                    .map_err(GradCheckError::ForwardPassError)?;
                Ok(weighted_sum(&out, &weights))
            };
            let loss_plus = perturbed_loss(epsilon)?;
            let loss_minus = perturbed_loss(-epsilon)?;
            let numerical_grad = (loss_plus - loss_minus) / (2.0 * epsilon);
            let analytical_grad = analytical[elem_idx];

            if !numerical_grad.is_finite() {
                return Err(GradCheckError::NumericalGradNaNOrInfinite {
                    input_index: i,
                    element_index: elem_idx,
                    loss_plus,
                    loss_minus,
                });
            }
            if !analytical_grad.is_finite() {
                return Err(GradCheckError::AnalyticalGradNaNOrInfinite {
                    input_index: i,
                    element_index: elem_idx,
                    value: analytical_grad,
                });
            }

            let difference = (analytical_grad - numerical_grad).abs();
            if difference > abs_tol + rel_tol * numerical_grad.abs() {
                return Err(GradCheckError::GradientMismatch {
                    input_index: i,
                    element_index: elem_idx,
                    analytical_grad,
                    numerical_grad,
                    difference,
                });
            }
        }
    }

    Ok(())
}

/// `Σ output ⊙ weights`, computed in f64.
fn weighted_sum<T: Element>(output: &Tensor<T>, weights: &[f64]) -> f64 {
    output
        .read_data()
        .data
        .iter()
        .zip(weights)
        .map(|(y, w)| y.to_f64_lossy() * w)
        .sum()
}
