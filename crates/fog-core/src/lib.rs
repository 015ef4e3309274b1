//! Core types for the mongo-fog framework.
//!
//! This crate provides the foundational types shared by the generator
//! registry, the document stores and the transformation engine:
//!
//! - [`FogConfig`] - Fog configuration loaded from YAML (`transform` + `filters`)
//! - [`CompiledGeneratorMap`] - Flat field path to [`GeneratorRef`] plan
//! - [`UpdatePayload`] - The `$set`/`$unset` pair applied to one document
//! - [`flatten`] - Nested document to dot-joined path conversion
//!
//! # Architecture
//!
//! ```text
//! fog-core (this crate)
//!    │
//!    ├─── fog-generator   (named synthetic value generators)
//!    ├─── fog-store       (DocumentStore trait, MongoDB + in-memory stores)
//!    └─── fog-transform   (compile, transform, vacate, apply)
//! ```
//!
//! # Example
//!
//! ```rust
//! use fog_core::{CollectionSpec, FogConfig};
//!
//! let config = FogConfig::from_yaml(r#"
//! transform:
//!   mydb:
//!     users:
//!       email: safe_email
//!     sessions: delete
//! "#).unwrap();
//!
//! let db = &config.transform.databases[0];
//! assert_eq!(db.name, "mydb");
//! assert!(matches!(db.collections[1].spec, CollectionSpec::Vacate));
//! ```

pub mod compiled;
pub mod config;
pub mod flatten;
pub mod namespace;
pub mod payload;

// Re-exports for convenience
pub use compiled::{CompiledGeneratorMap, GeneratorRef};
pub use config::{
    CollectionEntry, CollectionSpec, ConfigError, DatabaseSpec, Filters, FogConfig,
    TransformSpec, DELETE_MARKER,
};
pub use flatten::{flatten, flattened_keys, FlatKeys, FlatMap, PATH_SEPARATOR};
pub use namespace::Namespace;
pub use payload::{UpdatePayload, UNSET_MARKER};
