use crate::error::{DescentError, GradientStateError, ShapeError};
use crate::ops;
use crate::ops::traits::Element;
use crate::tensor::Tensor;
use std::fmt;
use std::sync::Arc;

/// Closed set of differentiable operation kinds.
///
/// Every kind pairs a forward function (the `*_op` functions in `crate::ops`)
/// with a backward function; [`Operation::backward`] matches exhaustively on
/// this enum, so adding a kind without a backward rule does not compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    /// `y = x·Wᵀ + b`
    Linear,
    /// `y = max(0, x)`
    Relu,
    /// Row-wise numerically stable log-softmax.
    LogSoftmax,
    /// Mean negative log-likelihood over the batch.
    NllLoss,
    /// Element-wise addition of two same-shaped tensors.
    Add,
    /// Sum of all elements.
    Sum,
    /// Mean of all elements.
    Mean,
}

impl OpKind {
    /// Short name used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            OpKind::Linear => "LinearBackward",
            OpKind::Relu => "ReluBackward",
            OpKind::LogSoftmax => "LogSoftmaxBackward",
            OpKind::NllLoss => "NllLossBackward",
            OpKind::Add => "AddBackward",
            OpKind::Sum => "SumBackward",
            OpKind::Mean => "MeanBackward",
        }
    }
}

/// Forward-pass intermediates kept for the backward pass.
#[derive(Debug, Clone, PartialEq)]
pub enum SavedContext<T: Element> {
    /// Nothing beyond the inputs themselves is needed.
    Inputs,
    /// `x > 0` for every input element.
    ReluMask(Vec<bool>),
    /// The log-softmax output, laid out as `rows × cols`.
    LogSoftmax {
        output: Vec<T>,
        rows: usize,
        cols: usize,
    },
    /// Class index per example.
    NllTargets { targets: Vec<usize>, num_classes: usize },
    /// Element count of the reduced input.
    Reduction { numel: usize },
}

/// One recorded step of the computation graph.
///
/// An `Operation` is created by a forward function, stored in its output's
/// `grad_fn`, and lives as long as that output (or until
/// [`Tensor::release_graph`] is called). It keeps its inputs alive through
/// shared handles together with the input versions seen at record time.
pub struct Operation<T: Element> {
    kind: OpKind,
    inputs: Vec<Tensor<T>>,
    input_versions: Vec<u64>,
    saved: SavedContext<T>,
    output_shape: Vec<usize>,
}

impl<T: Element> Operation<T> {
    /// Attaches a new operation record to `output` and registers it with its inputs.
    ///
    /// The caller decides whether recording is needed (see
    /// [`crate::autograd::should_record`]).
    pub(crate) fn record(
        kind: OpKind,
        inputs: &[&Tensor<T>],
        saved: SavedContext<T>,
        output: &Tensor<T>,
    ) {
        let op = Arc::new(Operation {
            kind,
            inputs: inputs.iter().map(|t| (*t).clone()).collect(),
            input_versions: inputs.iter().map(|t| t.version()).collect(),
            saved,
            output_shape: output.shape(),
        });
        for input in inputs {
            input.write_data().consumers.push(Arc::downgrade(&op));
        }
        let mut guard = output.write_data();
        guard.requires_grad = true;
        guard.grad_fn = Some(op);
    }

    pub fn kind(&self) -> OpKind {
        self.kind
    }

    pub fn inputs(&self) -> &[Tensor<T>] {
        &self.inputs
    }

    pub fn saved(&self) -> &SavedContext<T> {
        &self.saved
    }

    pub fn output_shape(&self) -> &[usize] {
        &self.output_shape
    }

    /// Returns `true` if the input at `index` needs a gradient.
    pub(crate) fn input_requires_grad(&self, index: usize) -> bool {
        self.inputs
            .get(index)
            .map(|t| t.requires_grad())
            .unwrap_or(false)
    }

    /// Computes the gradient of every input from the gradient of the output.
    ///
    /// The returned vector is aligned with [`Operation::inputs`]; entries are
    /// `None` for inputs that do not require gradients. Each returned buffer has
    /// exactly as many elements as its input.
    ///
    /// # Errors
    /// * `GradientStateError::StaleInput` if an input was modified in place after
    ///   this operation was recorded.
    /// * `ShapeError::Mismatch` if `grad_output` does not match the output shape.
    pub fn backward(&self, grad_output: &[T]) -> Result<Vec<Option<Vec<T>>>, DescentError> {
        for (index, (input, &recorded)) in
            self.inputs.iter().zip(self.input_versions.iter()).enumerate()
        {
            let current = input.version();
            if current != recorded {
                return Err(GradientStateError::StaleInput {
                    operation: self.kind.name().to_string(),
                    input_index: index,
                    recorded,
                    current,
                }
                .into());
            }
        }
        let expected_numel: usize = self.output_shape.iter().product();
        if grad_output.len() != expected_numel {
            return Err(ShapeError::Mismatch {
                expected: self.output_shape.clone(),
                actual: vec![grad_output.len()],
                operation: self.kind.name().to_string(),
            }
            .into());
        }

        match self.kind {
            OpKind::Linear => ops::linalg::linear::linear_backward(self, grad_output),
            OpKind::Relu => ops::activation::relu::relu_backward(self, grad_output),
            OpKind::LogSoftmax => {
                ops::activation::log_softmax::log_softmax_backward(self, grad_output)
            }
            OpKind::NllLoss => ops::loss::nll::nll_loss_backward(self, grad_output),
            OpKind::Add => ops::arithmetic::add::add_backward(self, grad_output),
            OpKind::Sum => ops::reduction::sum::sum_backward(self, grad_output),
            OpKind::Mean => ops::reduction::sum::mean_backward(self, grad_output),
        }
    }
}

impl<T: Element> fmt::Debug for Operation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("kind", &self.kind)
            .field("num_inputs", &self.inputs.len())
            .field("output_shape", &self.output_shape)
            .finish()
    }
}
