//! The training loop driver.
//!
//! A [`Trainer`] sequences, for every batch of every epoch:
//! forward → loss → `zero_grad` → backward → `step`.
//! It owns no learnable state; the model, loss, optimizer and batch source are
//! borrowed for the duration of [`Trainer::fit`].

pub mod batch;
pub mod cancel;
pub mod config;
pub mod trainer;

pub use batch::{Batch, BatchSource};
pub use cancel::CancellationToken;
pub use config::TrainerConfig;
pub use trainer::{EpochReport, Evaluation, Trainer, TrainingReport};
