//! Rewrite every document of a collection.

use crate::error::FogError;
use crate::operations::UpdateOperations;
use bson::{Bson, Document};
use fog_core::{flattened_keys, FlatKeys, Namespace};
use fog_store::{DocumentStore, StoreError};
use futures::TryStreamExt;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, trace, warn};

/// Update attempts per document, the first one included.
pub const MAX_UPDATE_ATTEMPTS: u32 = 10;

/// Metrics from transforming one collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformMetrics {
    /// Documents in the collection before filtering.
    pub documents_total: u64,
    /// Documents visited (matching the filter).
    pub documents_matched: u64,
    /// Documents successfully updated.
    pub documents_updated: u64,
    /// Update attempts rejected with a duplicate key and retried.
    pub conflict_retries: u64,
    /// Total time taken.
    pub total_duration: Duration,
}

impl TransformMetrics {
    /// Calculate documents per second.
    pub fn docs_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.documents_matched as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Applies [`UpdateOperations`] to the documents of a collection.
pub struct CollectionTransformer<'a, S: DocumentStore> {
    store: &'a S,
    max_attempts: u32,
    dry_run: bool,
}

impl<'a, S: DocumentStore> CollectionTransformer<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            max_attempts: MAX_UPDATE_ATTEMPTS,
            dry_run: false,
        }
    }

    /// Set the number of update attempts per document (at least 1).
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// In dry-run mode payloads are generated but never written.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Rewrite the documents of `namespace` matching `filter`.
    ///
    /// Each document gets freshly generated values, restricted to the fields
    /// it actually has. A duplicate key on update regenerates and retries, up
    /// to the configured number of attempts; exhausting them returns
    /// [`FogError::RetriesExhausted`], which callers must treat as fatal for
    /// the whole run. Any other store error is returned immediately.
    pub async fn transform(
        &self,
        namespace: &Namespace,
        operations: &mut UpdateOperations,
        filter: Option<&Document>,
    ) -> Result<TransformMetrics, FogError> {
        let start_time = Instant::now();
        let mut metrics = TransformMetrics {
            documents_total: self
                .store
                .count_documents(namespace, Document::new())
                .await?,
            ..Default::default()
        };

        info!(
            "-- Updating {} documents in {}...",
            metrics.documents_total, namespace
        );
        if let Some(filter) = filter {
            info!("   (filtering {})", filter);
        }

        let mut remaining = metrics.documents_total;
        let mut documents = self
            .store
            .find(namespace, filter.cloned().unwrap_or_default())
            .await?;

        while let Some(document) = documents.try_next().await? {
            metrics.documents_matched += 1;

            let id = document
                .get("_id")
                .cloned()
                .ok_or_else(|| StoreError::MissingId {
                    namespace: namespace.to_string(),
                })?;
            let existing = flattened_keys(&document);

            metrics.conflict_retries += self
                .update_document(namespace, &id, &existing, operations)
                .await?;
            if !self.dry_run {
                metrics.documents_updated += 1;
            }

            remaining = remaining.saturating_sub(1);
            debug!("Document {} in {} done, {} remaining", id, namespace, remaining);
        }

        metrics.total_duration = start_time.elapsed();
        info!(
            "Collection {} complete: {} documents updated, {} conflict retries in {:?} ({:.2} docs/sec)",
            namespace,
            metrics.documents_updated,
            metrics.conflict_retries,
            metrics.total_duration,
            metrics.docs_per_second()
        );

        Ok(metrics)
    }

    /// Update one document, returning how many duplicate-key retries it took.
    async fn update_document(
        &self,
        namespace: &Namespace,
        id: &Bson,
        existing: &FlatKeys,
        operations: &mut UpdateOperations,
    ) -> Result<u64, FogError> {
        let mut retries = 0;
        for attempt in 1..=self.max_attempts {
            let payload = operations.build_payload(existing)?;

            if self.dry_run {
                trace!("Dry-run mode: would update {} in {}: {:?}", id, namespace, payload);
                return Ok(retries);
            }

            match self.store.update_one(namespace, id, &payload).await {
                Ok(()) => return Ok(retries),
                Err(StoreError::DuplicateKey(reason)) => {
                    warn!(
                        "Duplicate key updating {} in {} (attempt {}/{}): {}",
                        id, namespace, attempt, self.max_attempts, reason
                    );
                    retries += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }

        error!(
            "Generator failed to produce a unique value after {} tries. Aborting.",
            self.max_attempts
        );
        Err(FogError::RetriesExhausted {
            namespace: namespace.to_string(),
            id: id.to_string(),
            attempts: self.max_attempts,
        })
    }
}
