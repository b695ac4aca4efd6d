// src/nn/mod.rs

//! Layers, losses and the [`Module`] abstraction built on top of the `ops` functions.

pub mod init;
pub mod layers;
pub mod losses;
pub mod module;
pub mod parameter;

pub use layers::{Linear, LogSoftmax, ReLU};
pub use losses::{CrossEntropyLoss, Loss, NllLoss};
pub use module::{Module, StateDict};
pub use parameter::Parameter;
