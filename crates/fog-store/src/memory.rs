//! In-memory document store.
//!
//! Mirrors the parts of MongoDB semantics the fog engine relies on:
//! documents keyed by `_id`, dotted-path `$set`/`$unset`, single-field
//! unique indexes that reject colliding updates with
//! [`StoreError::DuplicateKey`], and simple query predicates (field equality
//! plus `$eq`, `$ne`, `$in` and `$exists`). Every `update_one` call is
//! recorded so callers can inspect exactly what was attempted.

use crate::error::StoreError;
use crate::traits::{DocumentStore, DocumentStream};
use bson::oid::ObjectId;
use bson::{Bson, Document};
use fog_core::{Namespace, UpdatePayload, PATH_SEPARATOR};
use futures::stream::{self, StreamExt};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// One `update_one` call as received by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedUpdate {
    pub namespace: Namespace,
    pub id: Bson,
    pub payload: UpdatePayload,
    pub succeeded: bool,
}

#[derive(Debug, Default)]
struct MemoryState {
    collections: BTreeMap<Namespace, Vec<Document>>,
    unique_indexes: BTreeMap<Namespace, Vec<String>>,
    updates: Vec<RecordedUpdate>,
}

/// Thread-safe in-process [`DocumentStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert documents, assigning an `ObjectId` to those without `_id`.
    pub fn insert_many(&self, namespace: &Namespace, documents: impl IntoIterator<Item = Document>) {
        let mut state = self.state();
        let collection = state.collections.entry(namespace.clone()).or_default();
        for mut document in documents {
            if !document.contains_key("_id") {
                document.insert("_id", ObjectId::new());
            }
            collection.push(document);
        }
    }

    /// Declare a unique index on a (possibly dotted) field path.
    pub fn create_unique_index(&self, namespace: &Namespace, field: impl Into<String>) {
        let mut state = self.state();
        state.collections.entry(namespace.clone()).or_default();
        state
            .unique_indexes
            .entry(namespace.clone())
            .or_default()
            .push(field.into());
    }

    /// Snapshot of a collection in insertion order.
    pub fn documents(&self, namespace: &Namespace) -> Vec<Document> {
        self.state()
            .collections
            .get(namespace)
            .cloned()
            .unwrap_or_default()
    }

    /// Snapshot of the document with the given `_id`.
    pub fn document(&self, namespace: &Namespace, id: &Bson) -> Option<Document> {
        self.state()
            .collections
            .get(namespace)?
            .iter()
            .find(|document| document.get("_id") == Some(id))
            .cloned()
    }

    pub fn len(&self, namespace: &Namespace) -> usize {
        self.state().collections.get(namespace).map_or(0, Vec::len)
    }

    pub fn is_empty(&self, namespace: &Namespace) -> bool {
        self.len(namespace) == 0
    }

    /// Every `update_one` call received so far, in order.
    pub fn updates(&self) -> Vec<RecordedUpdate> {
        self.state().updates.clone()
    }

    /// `update_one` calls targeting one document.
    pub fn updates_for(&self, namespace: &Namespace, id: &Bson) -> Vec<RecordedUpdate> {
        self.state()
            .updates
            .iter()
            .filter(|update| &update.namespace == namespace && &update.id == id)
            .cloned()
            .collect()
    }

    fn matching(&self, namespace: &Namespace, filter: &Document) -> Vec<Document> {
        self.state()
            .collections
            .get(namespace)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|document| matches_filter(document, filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl DocumentStore for MemoryStore {
    async fn list_database_names(&self) -> Result<Vec<String>, StoreError> {
        let names: BTreeSet<String> = self
            .state()
            .collections
            .keys()
            .map(|namespace| namespace.database.clone())
            .collect();
        Ok(names.into_iter().collect())
    }

    async fn count_documents(
        &self,
        namespace: &Namespace,
        filter: Document,
    ) -> Result<u64, StoreError> {
        Ok(self.matching(namespace, &filter).len() as u64)
    }

    async fn find(
        &self,
        namespace: &Namespace,
        filter: Document,
    ) -> Result<DocumentStream, StoreError> {
        let documents = self.matching(namespace, &filter);
        Ok(stream::iter(documents.into_iter().map(Ok)).boxed())
    }

    async fn update_one(
        &self,
        namespace: &Namespace,
        id: &Bson,
        payload: &UpdatePayload,
    ) -> Result<(), StoreError> {
        let mut guard = self.state();
        let state = &mut *guard;

        let unique_fields = state
            .unique_indexes
            .get(namespace)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let outcome = match state.collections.get_mut(namespace) {
            Some(documents) => apply_update(documents, unique_fields, id, payload),
            None => Ok(()),
        };

        state.updates.push(RecordedUpdate {
            namespace: namespace.clone(),
            id: id.clone(),
            payload: payload.clone(),
            succeeded: outcome.is_ok(),
        });
        outcome
    }

    async fn delete_many(
        &self,
        namespace: &Namespace,
        filter: Document,
    ) -> Result<u64, StoreError> {
        let mut state = self.state();
        let Some(documents) = state.collections.get_mut(namespace) else {
            return Ok(0);
        };
        let before = documents.len();
        documents.retain(|document| !matches_filter(document, &filter));
        Ok((before - documents.len()) as u64)
    }
}

/// Apply one payload to the document with `_id == id`, all or nothing.
fn apply_update(
    documents: &mut [Document],
    unique_fields: &[String],
    id: &Bson,
    payload: &UpdatePayload,
) -> Result<(), StoreError> {
    let Some(position) = documents
        .iter()
        .position(|document| document.get("_id") == Some(id))
    else {
        // Matching nothing is not an error for update_one
        return Ok(());
    };

    let mut updated = documents[position].clone();
    for (path, value) in &payload.set {
        set_path(&mut updated, path, value.clone())?;
    }
    for (path, _) in &payload.unset {
        unset_path(&mut updated, path);
    }

    for field in unique_fields {
        let Some(value) = lookup_path(&updated, field) else {
            continue;
        };
        let collides = documents
            .iter()
            .enumerate()
            .any(|(other, document)| other != position && lookup_path(document, field) == Some(value));
        if collides {
            return Err(StoreError::DuplicateKey(format!(
                "E11000 duplicate key error index: {field}_1 dup key: {{ {field}: {value} }}"
            )));
        }
    }

    documents[position] = updated;
    Ok(())
}

/// Resolve a dotted path inside a document.
pub fn lookup_path<'a>(document: &'a Document, path: &str) -> Option<&'a Bson> {
    let mut segments = path.split(PATH_SEPARATOR);
    let first = segments.next()?;
    segments.try_fold(document.get(first)?, |current, segment| match current {
        Bson::Document(nested) => nested.get(segment),
        _ => None,
    })
}

fn set_path(document: &mut Document, path: &str, value: Bson) -> Result<(), StoreError> {
    match path.split_once(PATH_SEPARATOR) {
        None => {
            document.insert(path, value);
            Ok(())
        }
        Some((head, rest)) => {
            let child = document
                .entry(head.to_string())
                .or_insert_with(|| Bson::Document(Document::new()));
            match child {
                Bson::Document(nested) => set_path(nested, rest, value),
                other => Err(StoreError::Other(format!(
                    "cannot set `{path}`: `{head}` holds a {:?}",
                    other.element_type()
                ))),
            }
        }
    }
}

fn unset_path(document: &mut Document, path: &str) {
    match path.split_once(PATH_SEPARATOR) {
        None => {
            document.remove(path);
        }
        Some((head, rest)) => {
            if let Some(Bson::Document(nested)) = document.get_mut(head) {
                unset_path(nested, rest);
            }
        }
    }
}

/// Evaluate a query predicate against a document.
///
/// Supported: `{ field: value }` equality and operator documents using
/// `$eq`, `$ne`, `$in` and `$exists`. Unknown operators never match.
pub fn matches_filter(document: &Document, filter: &Document) -> bool {
    filter.iter().all(|(path, expected)| {
        let actual = lookup_path(document, path);
        match expected {
            Bson::Document(operators) if is_operator_document(operators) => operators
                .iter()
                .all(|(operator, operand)| matches_operator(actual, operator, operand)),
            _ => actual == Some(expected),
        }
    })
}

fn is_operator_document(document: &Document) -> bool {
    document.keys().next().is_some_and(|key| key.starts_with('$'))
}

fn matches_operator(actual: Option<&Bson>, operator: &str, operand: &Bson) -> bool {
    match operator {
        "$eq" => actual == Some(operand),
        "$ne" => actual != Some(operand),
        "$in" => match (actual, operand) {
            (Some(value), Bson::Array(candidates)) => candidates.contains(value),
            _ => false,
        },
        "$exists" => {
            let wanted = match operand {
                Bson::Boolean(b) => *b,
                Bson::Int32(i) => *i != 0,
                Bson::Int64(i) => *i != 0,
                _ => true,
            };
            actual.is_some() == wanted
        }
        _ => false,
    }
}
