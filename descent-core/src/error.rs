use thiserror::Error;

/// Errors raised when operation inputs have incompatible shapes.
///
/// These fail fast: a shape error is a programming error in the caller and is
/// never recovered locally.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum ShapeError {
    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    Mismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Incompatible shapes for operation {operation}: {shape1:?} and {shape2:?}")]
    IncompatibleShapes {
        shape1: Vec<usize>,
        shape2: Vec<usize>,
        operation: String,
    },

    #[error("Rank mismatch in {operation}: expected rank {expected}, got {actual}")]
    RankMismatch {
        expected: usize,
        actual: usize,
        operation: String,
    },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreation { data_len: usize, shape: Vec<usize> },

    #[error("Target class {target} at batch index {index} is out of range for {num_classes} classes")]
    TargetOutOfRange {
        index: usize,
        target: usize,
        num_classes: usize,
    },

    #[error("Operation {operation} received an empty batch")]
    EmptyBatch { operation: String },
}

/// Errors raised when the autograd state does not allow the requested action.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum GradientStateError {
    #[error("Backward called on non-scalar tensor of shape {shape:?} without explicit gradient.")]
    BackwardNonScalar { shape: Vec<usize> },

    #[error("Backward called on a tensor that does not require grad.")]
    RequiresGradNotMet,

    #[error("Input {input_index} of {operation} was modified in place after being recorded (version {recorded} -> {current}).")]
    StaleInput {
        operation: String,
        input_index: usize,
        recorded: u64,
        current: u64,
    },

    #[error("Cannot modify tensor data in place during {operation}: it requires grad and is used by a live operation.")]
    InplaceOnTrackedTensor { operation: String },

    #[error("requires_grad can only be changed on leaf tensors.")]
    NonLeafRequiresGrad,
}

/// Top-level error type for the descent framework.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum DescentError {
    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    GradientState(#[from] GradientStateError),

    #[error("Invalid hyperparameter {name}: {reason}")]
    InvalidHyperparameter { name: String, reason: String },

    #[error("Index out of bounds: index {index} for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Missing parameter '{name}' in state dict")]
    MissingParameter { name: String },

    #[error("Data error: {0}")]
    Data(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DescentError {
    /// Returns `true` for errors caused by incompatible shapes.
    pub fn is_shape_error(&self) -> bool {
        matches!(self, DescentError::Shape(_))
    }

    /// Returns `true` for errors caused by invalid autograd state.
    pub fn is_gradient_state_error(&self) -> bool {
        matches!(self, DescentError::GradientState(_))
    }
}
