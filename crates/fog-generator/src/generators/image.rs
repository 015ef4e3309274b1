//! Placeholder image URL generator.

use bson::Bson;
use rand::seq::IndexedRandom;
use rand::Rng;

/// URL templates of public placeholder image services.
pub const IMAGE_PLACEHOLDER_SERVICES: &[&str] = &[
    "https://picsum.photos/{width}/{height}",
    "https://dummyimage.com/{width}x{height}",
    "https://placekitten.com/{width}/{height}",
    "https://placeimg.com/{width}/{height}/any",
];

/// Largest dimension picked when none is given.
pub const MAX_IMAGE_DIMENSION: u32 = 1024;

/// URL of a placeholder image.
///
/// Missing (or zero) dimensions are drawn from `0..=1024`; the service is
/// picked at random.
pub fn safe_image_url<R: Rng>(rng: &mut R, width: Option<u32>, height: Option<u32>) -> String {
    let width = width
        .filter(|w| *w > 0)
        .unwrap_or_else(|| rng.random_range(0..=MAX_IMAGE_DIMENSION));
    let height = height
        .filter(|h| *h > 0)
        .unwrap_or_else(|| rng.random_range(0..=MAX_IMAGE_DIMENSION));
    let template = IMAGE_PLACEHOLDER_SERVICES
        .choose(rng)
        .copied()
        .unwrap_or(IMAGE_PLACEHOLDER_SERVICES[0]);

    template
        .replace("{width}", &width.to_string())
        .replace("{height}", &height.to_string())
}

/// Registry entry: placeholder image URL with random dimensions.
pub fn random_image_url<R: Rng>(rng: &mut R) -> Bson {
    Bson::String(safe_image_url(rng, None, None))
}
