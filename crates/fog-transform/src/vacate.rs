//! Remove every document of a collection.

use crate::error::FogError;
use bson::Document;
use fog_core::Namespace;
use fog_store::DocumentStore;
use tracing::info;

/// Deletes all documents of a collection. Filters are never applied.
pub struct CollectionVacator<'a, S: DocumentStore> {
    store: &'a S,
    dry_run: bool,
}

impl<'a, S: DocumentStore> CollectionVacator<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            dry_run: false,
        }
    }

    /// In dry-run mode documents are counted but not deleted.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Delete every document in `namespace`, returning how many were removed.
    pub async fn vacate(&self, namespace: &Namespace) -> Result<u64, FogError> {
        let count = self
            .store
            .count_documents(namespace, Document::new())
            .await?;
        info!("-- Removing {} documents from {}...", count, namespace);

        if self.dry_run {
            info!("Dry-run mode: skipping delete of {}", namespace);
            return Ok(0);
        }

        let deleted = self.store.delete_many(namespace, Document::new()).await?;
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use fog_store::MemoryStore;

    fn sessions() -> Namespace {
        Namespace::new("mydb", "sessions")
    }

    #[tokio::test]
    async fn test_vacate_removes_everything() {
        let store = MemoryStore::new();
        store.insert_many(&sessions(), (0..5).map(|i| doc! { "_id": i, "token": "t" }));

        let deleted = CollectionVacator::new(&store).vacate(&sessions()).await.unwrap();

        assert_eq!(deleted, 5);
        assert!(store.is_empty(&sessions()));
    }

    #[tokio::test]
    async fn test_vacate_empty_collection() {
        let store = MemoryStore::new();
        let deleted = CollectionVacator::new(&store).vacate(&sessions()).await.unwrap();
        assert_eq!(deleted, 0);
    }

    #[tokio::test]
    async fn test_vacate_dry_run() {
        let store = MemoryStore::new();
        store.insert_many(&sessions(), [doc! { "_id": 1 }]);

        let deleted = CollectionVacator::new(&store)
            .with_dry_run(true)
            .vacate(&sessions())
            .await
            .unwrap();

        assert_eq!(deleted, 0);
        assert_eq!(store.len(&sessions()), 1);
    }
}
