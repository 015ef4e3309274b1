//! Compiled generator plans.

use std::collections::btree_map::{self, BTreeMap};

/// What to do with a single field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratorRef {
    /// Replace the field with a fresh value from the named generator.
    Call(String),
    /// Remove the field.
    Delete,
}

/// Flat mapping from dotted field path to [`GeneratorRef`].
///
/// Built once per collection and reused for every document in it; only the
/// generator *references* are shared, values are produced per document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledGeneratorMap {
    entries: BTreeMap<String, GeneratorRef>,
}

impl CompiledGeneratorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a path, returning the previous reference for that path if any.
    pub fn insert(&mut self, path: impl Into<String>, generator: GeneratorRef) -> Option<GeneratorRef> {
        self.entries.insert(path.into(), generator)
    }

    pub fn get(&self, path: &str) -> Option<&GeneratorRef> {
        self.entries.get(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, GeneratorRef> {
        self.entries.iter()
    }

    /// Paths bound to a named generator, with the generator name.
    pub fn calls(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|(path, generator)| match generator {
            GeneratorRef::Call(name) => Some((path.as_str(), name.as_str())),
            GeneratorRef::Delete => None,
        })
    }

    /// Paths marked for removal.
    pub fn deletions(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, generator)| matches!(generator, GeneratorRef::Delete))
            .map(|(path, _)| path.as_str())
    }
}

impl FromIterator<(String, GeneratorRef)> for CompiledGeneratorMap {
    fn from_iter<I: IntoIterator<Item = (String, GeneratorRef)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a CompiledGeneratorMap {
    type Item = (&'a String, &'a GeneratorRef);
    type IntoIter = btree_map::Iter<'a, String, GeneratorRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CompiledGeneratorMap {
        [
            ("email".to_string(), GeneratorRef::Call("safe_email".to_string())),
            ("address.city".to_string(), GeneratorRef::Call("city".to_string())),
            ("address.zip".to_string(), GeneratorRef::Delete),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_calls_and_deletions_are_disjoint() {
        let map = sample();

        let calls: Vec<_> = map.calls().collect();
        let deletions: Vec<_> = map.deletions().collect();

        assert_eq!(calls, vec![("address.city", "city"), ("email", "safe_email")]);
        assert_eq!(deletions, vec!["address.zip"]);
    }

    #[test]
    fn test_insert_replaces() {
        let mut map = CompiledGeneratorMap::new();
        assert!(map.insert("a", GeneratorRef::Delete).is_none());
        assert_eq!(
            map.insert("a", GeneratorRef::Call("word".to_string())),
            Some(GeneratorRef::Delete)
        );
        assert_eq!(map.len(), 1);
    }
}
