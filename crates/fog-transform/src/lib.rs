//! Transformation engine for mongo-fog.
//!
//! The pipeline for one fog run:
//!
//! ```text
//! FogConfig ──► ConfigApplier
//!                 │
//!                 ├─ "delete" ──► CollectionVacator ──► delete_many
//!                 │
//!                 └─ fields ──► compile_generators ──► UpdateOperations
//!                                                         │
//!                                                         ▼
//!                                              CollectionTransformer
//!                                         (find → flatten → $set/$unset,
//!                                          retry on duplicate key)
//! ```
//!
//! All store access goes through [`fog_store::DocumentStore`], so the same
//! engine runs against MongoDB or the in-memory store.

pub mod apply;
pub mod args;
pub mod compile;
pub mod error;
pub mod operations;
pub mod transform;
pub mod vacate;

pub use apply::{CollectionOutcome, CollectionReport, ConfigApplier, FogOptions, FogSummary};
pub use args::FogArgs;
pub use compile::compile_generators;
pub use error::FogError;
pub use operations::{retain_existing, UpdateOperations};
pub use transform::{CollectionTransformer, TransformMetrics, MAX_UPDATE_ATTEMPTS};
pub use vacate::CollectionVacator;
