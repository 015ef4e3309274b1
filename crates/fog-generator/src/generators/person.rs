//! Person name and contact generators.

use super::{digits, pick};
use bson::Bson;
use rand::Rng;

pub(crate) const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Alice", "Amara", "Ann", "Arjun", "Ben", "Bob", "Carla", "Chen", "Dana",
    "David", "Elena", "Emil", "Farah", "Grace", "Hana", "Hugo", "Ines", "Ivan", "Jonas", "Julia",
    "Kai", "Lara", "Leo", "Lina", "Marco", "Maya", "Nia", "Noah", "Omar", "Priya", "Quinn",
    "Rosa", "Sam", "Sara", "Tomas", "Uma", "Victor", "Wen", "Yara", "Zoe",
];

pub(crate) const LAST_NAMES: &[&str] = &[
    "Abbott", "Bauer", "Castillo", "Dubois", "Evans", "Fischer", "Garcia", "Hansen", "Ito",
    "Jensen", "Kowalski", "Larsen", "Moreau", "Nakamura", "Okafor", "Petrov", "Quintero",
    "Rossi", "Schmidt", "Tanaka", "Ueda", "Varga", "Weber", "Xu", "Yilmaz", "Zimmerman",
];

pub fn first_name<R: Rng>(rng: &mut R) -> Bson {
    Bson::String(pick(rng, FIRST_NAMES).to_string())
}

pub fn last_name<R: Rng>(rng: &mut R) -> Bson {
    Bson::String(pick(rng, LAST_NAMES).to_string())
}

pub fn name<R: Rng>(rng: &mut R) -> Bson {
    Bson::String(format!("{} {}", pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES)))
}

/// Lowercase login such as `ada.okafor` or `leo42`.
pub fn user_name<R: Rng>(rng: &mut R) -> Bson {
    Bson::String(random_user_name(rng))
}

pub(crate) fn random_user_name<R: Rng>(rng: &mut R) -> String {
    let first = pick(rng, FIRST_NAMES).to_lowercase();
    match rng.random_range(0..3) {
        0 => format!("{first}.{}", pick(rng, LAST_NAMES).to_lowercase()),
        1 => format!("{first}{}", rng.random_range(1..100)),
        _ => format!("{}{first}", pick(rng, LAST_NAMES).to_lowercase()),
    }
}

/// North-American style number using the fictional 555 exchange.
pub fn phone_number<R: Rng>(rng: &mut R) -> Bson {
    let area = rng.random_range(200..1000);
    Bson::String(format!("({area}) 555-{}", digits(rng, 4)))
}
