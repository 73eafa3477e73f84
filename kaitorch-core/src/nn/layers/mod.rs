// src/nn/layers/mod.rs

pub mod dense;
pub mod dropout;

pub use dense::{Dense, LayerActivation};
pub use dropout::Dropout;
