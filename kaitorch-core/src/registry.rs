//! Name-keyed factories for activations, initializers, optimizers and losses.
//!
//! A [`Registry`] is built once (usually with [`Registry::with_defaults`]),
//! optionally extended with [`Registry::register`], and then handed to the
//! component that needs to resolve names. Lookups of unregistered names fail
//! with the `Unknown*` error of the registered kind.

use crate::error::KaiTorchError;
use std::collections::BTreeMap;
use std::fmt;

type Factory<T> = Box<dyn Fn() -> T + Send + Sync>;

/// A kind of object that can be looked up by name.
pub trait Registered: Sized + 'static {
    /// Built-in `(name, factory)` pairs.
    fn defaults() -> Vec<(&'static str, fn() -> Self)>;

    /// Error returned when `name` is not registered.
    fn unknown(name: &str, available: Vec<String>) -> KaiTorchError;
}

pub struct Registry<T> {
    factories: BTreeMap<String, Factory<T>>,
}

impl<T: Registered> Registry<T> {
    /// A registry with nothing registered.
    pub fn empty() -> Self {
        Registry {
            factories: BTreeMap::new(),
        }
    }

    /// A registry holding the built-in factories of `T`.
    pub fn with_defaults() -> Self {
        let mut registry = Registry::empty();
        for (name, factory) in T::defaults() {
            registry.register(name, factory);
        }
        registry
    }

    /// Registers (or replaces) a factory under `name`.
    pub fn register<F>(&mut self, name: &str, factory: F) -> &mut Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.factories.insert(name.to_string(), Box::new(factory));
        self
    }

    /// Builds a fresh instance of the object registered under `name`.
    pub fn resolve(&self, name: &str) -> Result<T, KaiTorchError> {
        match self.factories.get(name) {
            Some(factory) => Ok(factory()),
            None => Err(T::unknown(name, self.names())),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.factories.keys().cloned().collect()
    }
}

impl<T: Registered> Default for Registry<T> {
    fn default() -> Self {
        Registry::with_defaults()
    }
}

impl<T> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("names", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::activation::Activation;

    #[test]
    fn test_defaults_resolve() {
        let registry: Registry<Activation> = Registry::with_defaults();
        assert_eq!(registry.resolve("sigmoid").unwrap(), Activation::Sigmoid);
        assert!(registry.contains("ReLU"));
    }

    #[test]
    fn test_unknown_name_lists_available() {
        let registry: Registry<Activation> = Registry::with_defaults();
        match registry.resolve("gelu") {
            Err(KaiTorchError::UnknownActivation { name, available }) => {
                assert_eq!(name, "gelu");
                assert_eq!(available, registry.names());
            }
            other => panic!("expected UnknownActivation, got {:?}", other),
        }
    }

    #[test]
    fn test_register_custom_factory() {
        let mut registry: Registry<Activation> = Registry::empty();
        assert!(registry.resolve("sigmoid").is_err());

        registry.register("steep_leaky", || Activation::LeakyRelu { alpha: 0.3 });
        assert_eq!(
            registry.resolve("steep_leaky").unwrap(),
            Activation::LeakyRelu { alpha: 0.3 }
        );
        assert_eq!(registry.names(), vec!["steep_leaky".to_string()]);
    }

    #[test]
    fn test_capturing_factory_and_default() {
        let mut registry: Registry<Activation> = Registry::default();
        let alpha = 0.05;
        registry.register("ELU", move || Activation::Elu { alpha });

        assert_eq!(registry.resolve("ELU").unwrap(), Activation::Elu { alpha: 0.05 });
        assert!(registry.contains("tanh"));
    }
}
