// src/nn/mod.rs

//! Layers, losses and weight initializers for feed-forward models.

pub mod init;
pub mod layers;
pub mod losses;
pub mod module;

pub use init::Initializer;
pub use layers::{Dense, Dropout, LayerActivation};
pub use losses::Loss;
pub use module::Module;
