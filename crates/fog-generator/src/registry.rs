//! Name → generator lookup.

use crate::generators::BUILTINS;
use bson::Bson;
use rand::rngs::StdRng;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A zero-argument (apart from the RNG) synthetic value producer.
pub type GeneratorFn = Arc<dyn Fn(&mut StdRng) -> Bson + Send + Sync>;

/// Registry of named generators.
///
/// Lookups are by exact name. Registering a name that already exists
/// replaces the previous generator.
#[derive(Clone, Default)]
pub struct GeneratorRegistry {
    generators: BTreeMap<String, GeneratorFn>,
}

impl GeneratorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in generator.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (name, generator) in BUILTINS {
            registry.register(*name, *generator);
        }
        registry
    }

    /// Register (or replace) a generator under `name`.
    pub fn register<F>(&mut self, name: impl Into<String>, generator: F) -> &mut Self
    where
        F: Fn(&mut StdRng) -> Bson + Send + Sync + 'static,
    {
        self.generators.insert(name.into(), Arc::new(generator));
        self
    }

    pub fn lookup(&self, name: &str) -> Option<&GeneratorFn> {
        self.generators.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.generators.contains_key(name)
    }

    /// Produce a fresh value from the named generator.
    pub fn generate(&self, name: &str, rng: &mut StdRng) -> Option<Bson> {
        self.lookup(name).map(|generator| generator(rng))
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.generators.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}

impl fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorRegistry")
            .field("generators", &self.generators.keys().collect::<Vec<_>>())
            .finish()
    }
}
