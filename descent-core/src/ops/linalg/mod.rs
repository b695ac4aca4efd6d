// src/ops/linalg/mod.rs

pub mod linear;
pub(crate) mod matmul;

pub use linear::linear_op;
