//! Per-document `$set` / `$unset` builders.

use crate::error::FogError;
use bson::Bson;
use fog_core::{CompiledGeneratorMap, FlatKeys, FlatMap, UpdatePayload, UNSET_MARKER};
use fog_generator::GeneratorRegistry;
use rand::rngs::StdRng;
use std::sync::Arc;

/// Update operations for one collection.
///
/// Holds the compiled plan and the RNG for the collection; every call to
/// [`build_set`](Self::build_set) invokes the generators again, so no value is
/// ever shared between documents or between retries.
pub struct UpdateOperations {
    compiled: CompiledGeneratorMap,
    registry: Arc<GeneratorRegistry>,
    rng: StdRng,
}

impl UpdateOperations {
    pub fn new(compiled: CompiledGeneratorMap, registry: Arc<GeneratorRegistry>, rng: StdRng) -> Self {
        Self {
            compiled,
            registry,
            rng,
        }
    }

    pub fn compiled(&self) -> &CompiledGeneratorMap {
        &self.compiled
    }

    /// Fresh values for every `Call` path.
    pub fn build_set(&mut self) -> Result<FlatMap, FogError> {
        let mut set = FlatMap::new();
        for (path, name) in self.compiled.calls() {
            let value = self
                .registry
                .generate(name, &mut self.rng)
                .ok_or_else(|| FogError::UnknownGenerator {
                    path: path.to_string(),
                    name: name.to_string(),
                })?;
            set.insert(path, value);
        }
        Ok(set)
    }

    /// `path → 1` for every `Delete` path.
    pub fn build_unset(&self) -> FlatMap {
        self.compiled
            .deletions()
            .map(|path| (path.to_string(), Bson::Int32(UNSET_MARKER)))
            .collect()
    }

    /// Payload for a document whose flattened keys are `existing`.
    ///
    /// `set` is restricted to paths the document already has; `unset` is not
    /// filtered.
    pub fn build_payload(&mut self, existing: &FlatKeys) -> Result<UpdatePayload, FogError> {
        let set = retain_existing(self.build_set()?, existing);
        Ok(UpdatePayload::new(set, self.build_unset()))
    }
}

/// Drop every entry of `set` whose path is not in `existing`.
pub fn retain_existing(set: FlatMap, existing: &FlatKeys) -> FlatMap {
    set.into_iter()
        .filter(|(path, _)| existing.contains(path))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use fog_core::{flattened_keys, GeneratorRef};
    use rand::SeedableRng;

    fn counting_registry() -> Arc<GeneratorRegistry> {
        let mut registry = GeneratorRegistry::with_builtins();
        let counter = std::sync::atomic::AtomicI64::new(0);
        registry.register("counter", move |_: &mut StdRng| {
            Bson::Int64(counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst))
        });
        Arc::new(registry)
    }

    fn operations() -> UpdateOperations {
        let compiled: CompiledGeneratorMap = [
            ("email".to_string(), GeneratorRef::Call("safe_email".to_string())),
            ("visits".to_string(), GeneratorRef::Call("counter".to_string())),
            ("address.zip".to_string(), GeneratorRef::Delete),
            ("ssn".to_string(), GeneratorRef::Delete),
        ]
        .into_iter()
        .collect();
        UpdateOperations::new(compiled, counting_registry(), StdRng::seed_from_u64(42))
    }

    #[test]
    fn test_set_and_unset_are_disjoint() {
        let mut ops = operations();
        let set = ops.build_set().unwrap();
        let unset = ops.build_unset();

        assert_eq!(set.keys().collect::<Vec<_>>(), vec!["email", "visits"]);
        assert_eq!(unset, doc! { "address.zip": 1, "ssn": 1 });
        assert!(set.keys().all(|key| !unset.contains_key(key)));
    }

    #[test]
    fn test_build_set_is_fresh_per_call() {
        let mut ops = operations();
        let first = ops.build_set().unwrap();
        let second = ops.build_set().unwrap();

        assert_eq!(first.get_i64("visits").unwrap(), 0);
        assert_eq!(second.get_i64("visits").unwrap(), 1);
    }

    #[test]
    fn test_payload_only_sets_existing_keys() {
        let mut ops = operations();
        let document = doc! { "_id": 2, "name": "Ann", "visits": 3 };

        let payload = ops.build_payload(&flattened_keys(&document)).unwrap();

        assert_eq!(payload.set.keys().collect::<Vec<_>>(), vec!["visits"]);
        // unset is not filtered by existence
        assert_eq!(payload.unset, doc! { "address.zip": 1, "ssn": 1 });
    }

    #[test]
    fn test_retain_existing() {
        let existing: FlatKeys = ["a".to_string(), "b.c".to_string()].into_iter().collect();
        let set = doc! { "a": 1, "b.c": 2, "b": 3, "d": 4 };
        assert_eq!(retain_existing(set, &existing), doc! { "a": 1, "b.c": 2 });
    }
}
