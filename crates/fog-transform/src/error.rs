//! Error types for the transformation engine.

use fog_core::ConfigError;
use fog_store::StoreError;
use thiserror::Error;

/// Errors that can occur while fogging.
#[derive(Error, Debug)]
pub enum FogError {
    /// The fog configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A field refers to a generator that is not registered.
    #[error("Unknown generator '{name}' for field '{path}'")]
    UnknownGenerator { path: String, name: String },

    /// A field spec value that cannot be compiled (e.g. a list).
    #[error("Unsupported spec for field '{path}': {reason}")]
    UnsupportedSpec { path: String, reason: String },

    /// Store error that is not retried.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Every update attempt for a document hit a unique index conflict.
    #[error(
        "Generator failed to produce a unique value after {attempts} tries \
         (document {id} in {namespace}). Aborting."
    )]
    RetriesExhausted {
        namespace: String,
        id: String,
        attempts: u32,
    },
}

impl FogError {
    /// True for the retry-exhaustion condition that must stop the whole run.
    pub fn is_retries_exhausted(&self) -> bool {
        matches!(self, FogError::RetriesExhausted { .. })
    }
}
