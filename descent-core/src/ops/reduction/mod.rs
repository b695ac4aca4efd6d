// src/ops/reduction/mod.rs

pub mod sum;

pub use sum::{mean_op, sum_op};
