//! Synthetic value generators for mongo-fog.
//!
//! This crate provides the [`GeneratorRegistry`], a statically populated map
//! from generator name to a function producing a fresh BSON value. Fog
//! configurations refer to generators by name (`email: safe_email`); the
//! transformation engine resolves those names here once per collection and
//! invokes them once per document.
//!
//! # Architecture
//!
//! ```text
//! "safe_email" ──► GeneratorRegistry ──► fn(&mut StdRng) -> Bson
//!                        │
//!                        └── built-ins (generators::BUILTINS) + custom registrations
//! ```
//!
//! # Example
//!
//! ```rust
//! use fog_generator::GeneratorRegistry;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let registry = GeneratorRegistry::with_builtins();
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! let email = registry.generate("safe_email", &mut rng).unwrap();
//! assert!(email.as_str().unwrap().contains('@'));
//! ```
//!
//! # Generators
//!
//! Names follow the conventions of common fake-data libraries:
//!
//! - person: `first_name`, `last_name`, `name`, `user_name`, `phone_number`
//! - internet: `email`, `safe_email`, `ascii_email`, `ascii_safe_email`,
//!   `free_email`, `domain_name`, `url`, `ipv4`, `image_url`, `safe_image_url`
//! - address: `street_name`, `street_address`, `city`, `postcode`, `country`, `address`
//! - text: `word`, `sentence`, `paragraph`, `text`
//! - misc: `uuid4`, `random_int`, `random_digit`, `boolean`, `date`, `date_time`, `null`

pub mod generators;
pub mod registry;

// Re-exports for convenience
pub use generators::image::{safe_image_url, IMAGE_PLACEHOLDER_SERVICES};
pub use registry::{GeneratorFn, GeneratorRegistry};
