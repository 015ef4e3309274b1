//! Per-document update payloads.

use crate::flatten::FlatMap;
use bson::Document;

/// Value written under each `$unset` path.
pub const UNSET_MARKER: i32 = 1;

/// The `$set` and `$unset` halves of one document update.
///
/// `set` only ever holds paths that already exist in the target document;
/// `unset` holds every path marked for deletion, present or not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdatePayload {
    pub set: FlatMap,
    pub unset: FlatMap,
}

impl UpdatePayload {
    pub fn new(set: FlatMap, unset: FlatMap) -> Self {
        Self { set, unset }
    }

    /// True when the update would not change anything.
    pub fn is_empty(&self) -> bool {
        self.set.is_empty() && self.unset.is_empty()
    }

    /// Render as a MongoDB update document, omitting empty operators.
    pub fn to_update_document(&self) -> Document {
        let mut update = Document::new();
        if !self.set.is_empty() {
            update.insert("$set", self.set.clone());
        }
        if !self.unset.is_empty() {
            update.insert("$unset", self.unset.clone());
        }
        update
    }
}
