//! Document store abstraction for mongo-fog.
//!
//! This crate defines the `DocumentStore` trait that the transformation
//! engine reads and writes through, together with two implementations:
//!
//! - [`MongoStore`] - backed by the official `mongodb` driver
//! - [`memory::MemoryStore`] - in-process store used by the engine's tests
//!
//! The trait works on `bson::Document` values and `fog_core` payload types so
//! callers never touch driver types directly.

mod error;
pub mod memory;
mod mongo;
mod traits;

pub use error::{StoreError, DUPLICATE_KEY_CODE};
pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use traits::{DocumentStore, DocumentStream};
