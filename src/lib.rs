//! mongo-fog library
//!
//! Anonymizes ("fogs") MongoDB data by rewriting configured fields with
//! synthetic values, or emptying whole collections, as described by a YAML
//! fog config.
//!
//! # Crates
//!
//! - `fog_core` - config loading, flattening, compiled plans and payloads
//! - `fog_generator` - the named synthetic value generators
//! - `fog_store` - the `DocumentStore` trait with MongoDB and in-memory stores
//! - `fog_transform` - compile, transform, vacate and apply
//!
//! # CLI Usage
//!
//! ```bash
//! # Apply a fog config
//! mongo-fog --fog fog.yaml --mongodb-uri mongodb://localhost:27017
//!
//! # Same, reproducibly and without writing
//! mongo-fog --fog fog.yaml --seed 42 --dry-run
//!
//! # List databases
//! mongo-fog --list
//!
//! # Try a generator
//! mongo-fog --sample safe_image_url
//! ```

use anyhow::Context;
use bson::Bson;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use std::sync::Arc;

pub use fog_core::{FogConfig, Namespace};
pub use fog_generator::GeneratorRegistry;
pub use fog_store::{DocumentStore, MemoryStore, MongoStore};
pub use fog_transform::{ConfigApplier, FogArgs, FogError, FogOptions, FogSummary};

/// Load a fog config file.
pub fn load_config(path: &Path) -> anyhow::Result<FogConfig> {
    FogConfig::from_file(path)
        .with_context(|| format!("Failed to load fog config from {}", path.display()))
}

/// Apply a fog config to `store`.
pub async fn run_fog<S: DocumentStore>(
    store: &S,
    registry: Arc<GeneratorRegistry>,
    config: &FogConfig,
    options: FogOptions,
) -> Result<FogSummary, FogError> {
    tracing::info!(
        "Fogging {} collections{}",
        config.transform.collection_count(),
        if options.dry_run { " (dry run)" } else { "" }
    );
    ConfigApplier::new(store, registry, options)
        .apply(config)
        .await
}

/// Names of every database visible to the store.
pub async fn list_databases<S: DocumentStore>(store: &S) -> anyhow::Result<Vec<String>> {
    store
        .list_database_names()
        .await
        .context("Failed to list databases")
}

/// One value from the named generator.
pub fn sample_value(
    registry: &GeneratorRegistry,
    name: &str,
    seed: Option<u64>,
) -> anyhow::Result<Bson> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    registry
        .generate(name, &mut rng)
        .with_context(|| format!("Unknown generator '{name}' (see --list-generators)"))
}
