pub mod onehot;
pub mod testing;

pub use onehot::as_onehot;
