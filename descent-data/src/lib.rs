//! Datasets, samplers and mini-batching for `descent-core` training loops.
//!
//! A [`DataLoader`] over any [`Dataset`] of `(features, label)` samples is a
//! [`descent_core::train::BatchSource`] and can be handed straight to
//! [`descent_core::train::Trainer::fit`].

pub mod dataloader;
pub mod datasets;
pub mod samplers;
pub mod synthetic;

pub use dataloader::{collate, DataLoader};
pub use datasets::{Dataset, Sample, TensorDataset, VecDataset};
pub use samplers::{RandomSampler, Sampler, SequentialSampler};
pub use synthetic::SyntheticImages;
