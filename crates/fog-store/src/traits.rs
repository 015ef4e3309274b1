//! DocumentStore trait definition.

use crate::error::StoreError;
use bson::{Bson, Document};
use fog_core::{Namespace, UpdatePayload};
use futures::stream::BoxStream;

/// Lazily fetched documents of one `find` call.
pub type DocumentStream = BoxStream<'static, Result<Document, StoreError>>;

/// Trait for reading and rewriting documents.
///
/// Implementations resolve a [`Namespace`] to their own collection handle on
/// every call. The transformation engine is generic over this trait, so the
/// same code path drives MongoDB in production and [`crate::MemoryStore`] in
/// tests:
///
/// ```ignore
/// pub async fn vacate<S: DocumentStore>(store: &S, ns: &Namespace) -> Result<u64, StoreError> {
///     store.delete_many(ns, Document::new()).await
/// }
/// ```
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Names of every database visible to the connection.
    async fn list_database_names(&self) -> Result<Vec<String>, StoreError>;

    /// Count documents matching `filter`.
    async fn count_documents(&self, namespace: &Namespace, filter: Document)
        -> Result<u64, StoreError>;

    /// Iterate documents matching `filter` in store order.
    ///
    /// Each call starts a fresh iteration.
    async fn find(&self, namespace: &Namespace, filter: Document)
        -> Result<DocumentStream, StoreError>;

    /// Apply `$set`/`$unset` to the document whose `_id` equals `id`.
    ///
    /// A unique index violation must surface as [`StoreError::DuplicateKey`].
    async fn update_one(
        &self,
        namespace: &Namespace,
        id: &Bson,
        payload: &UpdatePayload,
    ) -> Result<(), StoreError>;

    /// Delete documents matching `filter`, returning how many were removed.
    async fn delete_many(&self, namespace: &Namespace, filter: Document)
        -> Result<u64, StoreError>;
}
