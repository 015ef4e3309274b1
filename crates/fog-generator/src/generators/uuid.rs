//! UUID value generator.

use bson::Bson;
use rand::Rng;
use uuid::Uuid;

/// Random UUID v4 drawn from the provided RNG, as its hyphenated string form.
pub fn uuid4<R: Rng>(rng: &mut R) -> Bson {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);

    // Set version (4) and variant (RFC 4122) bits
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    Bson::String(Uuid::from_bytes(bytes).to_string())
}
