//! Keras-style model containers.

pub mod sequential;

pub use sequential::{FitConfig, History, Sequential};
