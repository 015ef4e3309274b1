//! Store error types.

use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;

/// Server error code reported when a write violates a unique index.
pub const DUPLICATE_KEY_CODE: i32 = 11000;

/// Errors returned by a [`crate::DocumentStore`].
#[derive(Error, Debug)]
pub enum StoreError {
    /// A write collided with an existing value on a unique index.
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// Any other MongoDB driver or server error.
    #[error("MongoDB error: {0}")]
    MongoDB(mongodb::error::Error),

    /// A document without an `_id` cannot be updated individually.
    #[error("Document in {namespace} has no _id")]
    MissingId { namespace: String },

    /// Error raised by a non-MongoDB store.
    #[error("Store error: {0}")]
    Other(String),
}

impl StoreError {
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, StoreError::DuplicateKey(_))
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        if is_duplicate_key(&err) {
            StoreError::DuplicateKey(err.to_string())
        } else {
            StoreError::MongoDB(err)
        }
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_duplicate_key() {
        assert!(StoreError::DuplicateKey("E11000".to_string()).is_duplicate_key());
        assert!(!StoreError::Other("boom".to_string()).is_duplicate_key());
        assert!(!StoreError::MissingId {
            namespace: "mydb.users".to_string()
        }
        .is_duplicate_key());
    }
}
