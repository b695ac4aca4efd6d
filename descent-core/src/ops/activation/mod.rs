// src/ops/activation/mod.rs

//! # Activation Functions
//!
//! - [`relu_op`]: Rectified Linear Unit, element-wise.
//! - [`log_softmax_op`]: numerically stable log-softmax over the last axis of
//!   a `(n, c)` tensor.

pub mod log_softmax;
pub mod relu;

pub use log_softmax::log_softmax_op;
pub use relu::relu_op;
