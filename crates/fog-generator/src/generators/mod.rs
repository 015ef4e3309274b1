//! Built-in value generators.
//!
//! Every generator is a plain function over the RNG so it can be registered
//! by function pointer. Word lists are small and ASCII-only; the goal is
//! realistic-looking filler, not statistical fidelity.

pub mod address;
pub mod image;
pub mod internet;
pub mod person;
pub mod text;
pub mod timestamp;
pub mod uuid;

use bson::Bson;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::Rng;

/// Signature shared by every built-in generator.
pub type BuiltinGenerator = fn(&mut StdRng) -> Bson;

/// Every built-in generator, by name.
pub const BUILTINS: &[(&str, BuiltinGenerator)] = &[
    // person
    ("first_name", person::first_name),
    ("last_name", person::last_name),
    ("name", person::name),
    ("user_name", person::user_name),
    ("phone_number", person::phone_number),
    // internet
    ("email", internet::email),
    ("safe_email", internet::safe_email),
    ("ascii_email", internet::email),
    ("ascii_safe_email", internet::safe_email),
    ("free_email", internet::free_email),
    ("domain_name", internet::domain_name),
    ("url", internet::url),
    ("ipv4", internet::ipv4),
    ("image_url", image::random_image_url),
    ("safe_image_url", image::random_image_url),
    // address
    ("street_name", address::street_name),
    ("street_address", address::street_address),
    ("city", address::city),
    ("postcode", address::postcode),
    ("country", address::country),
    ("address", address::address),
    // text
    ("word", text::word),
    ("sentence", text::sentence),
    ("paragraph", text::paragraph),
    ("text", text::text),
    // misc
    ("uuid4", uuid::uuid4),
    ("random_int", random_int),
    ("random_digit", random_digit),
    ("boolean", boolean),
    ("date", timestamp::date),
    ("date_time", timestamp::date_time),
    ("null", null),
];

/// Pick one element of a non-empty word list.
pub(crate) fn pick<R: Rng>(rng: &mut R, words: &'static [&'static str]) -> &'static str {
    words.choose(rng).copied().unwrap_or_default()
}

/// A string of `count` random decimal digits.
pub(crate) fn digits<R: Rng>(rng: &mut R, count: usize) -> String {
    (0..count)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

/// Random integer in `0..=9999`.
pub fn random_int<R: Rng>(rng: &mut R) -> Bson {
    Bson::Int64(rng.random_range(0..=9999))
}

/// Random integer in `0..=9`.
pub fn random_digit<R: Rng>(rng: &mut R) -> Bson {
    Bson::Int32(rng.random_range(0..=9))
}

pub fn boolean<R: Rng>(rng: &mut R) -> Bson {
    Bson::Boolean(rng.random_bool(0.5))
}

/// Always `null`; keeps the field but blanks its value.
pub fn null<R: Rng>(_rng: &mut R) -> Bson {
    Bson::Null
}
