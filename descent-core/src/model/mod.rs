// src/model/mod.rs

pub mod sequential;

pub use sequential::Sequential;
