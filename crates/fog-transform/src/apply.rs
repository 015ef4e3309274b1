//! Apply a whole fog configuration.

use crate::compile::compile_generators;
use crate::error::FogError;
use crate::operations::UpdateOperations;
use crate::transform::{CollectionTransformer, TransformMetrics, MAX_UPDATE_ATTEMPTS};
use crate::vacate::CollectionVacator;
use bson::Document;
use fog_core::{CollectionSpec, FogConfig, Namespace};
use fog_generator::GeneratorRegistry;
use fog_store::DocumentStore;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_yaml::Mapping;
use std::sync::Arc;
use tracing::{debug, info};

/// Options for a fog run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FogOptions {
    /// Generate and iterate, but never write or delete.
    pub dry_run: bool,
    /// Update attempts per document before a duplicate key aborts the run.
    pub max_attempts: u32,
    /// Seed for the run's RNG; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for FogOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            max_attempts: MAX_UPDATE_ATTEMPTS,
            seed: None,
        }
    }
}

/// What happened to one collection.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionOutcome {
    Vacated { deleted: u64 },
    Transformed(TransformMetrics),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollectionReport {
    pub namespace: Namespace,
    pub outcome: CollectionOutcome,
}

/// Per-collection results of a completed run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FogSummary {
    pub collections: Vec<CollectionReport>,
}

impl FogSummary {
    pub fn documents_updated(&self) -> u64 {
        self.collections
            .iter()
            .map(|report| match &report.outcome {
                CollectionOutcome::Transformed(metrics) => metrics.documents_updated,
                CollectionOutcome::Vacated { .. } => 0,
            })
            .sum()
    }

    pub fn documents_deleted(&self) -> u64 {
        self.collections
            .iter()
            .map(|report| match &report.outcome {
                CollectionOutcome::Vacated { deleted } => *deleted,
                CollectionOutcome::Transformed(_) => 0,
            })
            .sum()
    }

    pub fn get(&self, namespace: &Namespace) -> Option<&CollectionOutcome> {
        self.collections
            .iter()
            .find(|report| &report.namespace == namespace)
            .map(|report| &report.outcome)
    }
}

/// Drives a [`FogConfig`] against a store, one collection at a time.
pub struct ConfigApplier<'a, S: DocumentStore> {
    store: &'a S,
    registry: Arc<GeneratorRegistry>,
    options: FogOptions,
    rng: StdRng,
}

impl<'a, S: DocumentStore> ConfigApplier<'a, S> {
    pub fn new(store: &'a S, registry: Arc<GeneratorRegistry>, options: FogOptions) -> Self {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            store,
            registry,
            options,
            rng,
        }
    }

    /// Apply every configured collection.
    ///
    /// Collections are processed sequentially; the first error stops the
    /// run. Collections already processed are not rolled back.
    pub async fn apply(&mut self, config: &FogConfig) -> Result<FogSummary, FogError> {
        let mut summary = FogSummary::default();

        for database in &config.transform.databases {
            info!("db: {}", database.name);

            for entry in &database.collections {
                info!("- collection: {}", entry.name);
                let namespace = Namespace::new(&database.name, &entry.name);

                let outcome = match &entry.spec {
                    CollectionSpec::Vacate => CollectionOutcome::Vacated {
                        deleted: self.vacate_collection(&namespace).await?,
                    },
                    CollectionSpec::Fields(fields) => {
                        let filter = config.filters.get(&database.name, &entry.name);
                        CollectionOutcome::Transformed(
                            self.transform_collection(&namespace, fields, filter).await?,
                        )
                    }
                };

                summary.collections.push(CollectionReport { namespace, outcome });
            }
        }

        info!(
            "Fog complete: {} collections, {} documents updated, {} documents deleted",
            summary.collections.len(),
            summary.documents_updated(),
            summary.documents_deleted()
        );
        Ok(summary)
    }

    /// Remove every document of one collection.
    pub async fn vacate_collection(&self, namespace: &Namespace) -> Result<u64, FogError> {
        CollectionVacator::new(self.store)
            .with_dry_run(self.options.dry_run)
            .vacate(namespace)
            .await
    }

    /// Compile `fields` and rewrite the documents of one collection.
    pub async fn transform_collection(
        &mut self,
        namespace: &Namespace,
        fields: &Mapping,
        filter: Option<&Document>,
    ) -> Result<TransformMetrics, FogError> {
        let compiled = compile_generators(fields, &self.registry)?;
        debug!(
            "Compiled {} field generators for {}",
            compiled.len(),
            namespace
        );

        let rng = StdRng::seed_from_u64(self.rng.random());
        let mut operations = UpdateOperations::new(compiled, Arc::clone(&self.registry), rng);

        CollectionTransformer::new(self.store)
            .with_max_attempts(self.options.max_attempts)
            .with_dry_run(self.options.dry_run)
            .transform(namespace, &mut operations, filter)
            .await
    }
}
