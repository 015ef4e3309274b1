//! Lorem-style filler text generators.

use super::pick;
use bson::Bson;
use rand::Rng;

pub(crate) const WORDS: &[&str] = &[
    "alias", "amet", "aperiam", "beatae", "commodi", "culpa", "dolor", "dolore", "eaque",
    "enim", "error", "esse", "fugit", "harum", "illum", "ipsam", "ipsum", "labore", "laborum",
    "magnam", "minima", "modi", "nemo", "nihil", "nobis", "odio", "omnis", "optio", "quasi",
    "quia", "quidem", "ratione", "rerum", "saepe", "sint", "sunt", "tempora", "ullam", "velit",
    "vero", "vitae", "voluptas",
];

pub fn word<R: Rng>(rng: &mut R) -> Bson {
    Bson::String(pick(rng, WORDS).to_string())
}

pub fn sentence<R: Rng>(rng: &mut R) -> Bson {
    Bson::String(random_sentence(rng))
}

/// Capitalized sentence of 4 to 12 words ending in a period.
fn random_sentence<R: Rng>(rng: &mut R) -> String {
    let count = rng.random_range(4..=12);
    let words: Vec<&str> = (0..count).map(|_| pick(rng, WORDS)).collect();
    let mut sentence = words.join(" ");
    if let Some(first) = sentence.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    sentence.push('.');
    sentence
}

fn random_paragraph<R: Rng>(rng: &mut R) -> String {
    let count = rng.random_range(3..=6);
    (0..count)
        .map(|_| random_sentence(rng))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn paragraph<R: Rng>(rng: &mut R) -> Bson {
    Bson::String(random_paragraph(rng))
}

/// A few paragraphs separated by newlines.
pub fn text<R: Rng>(rng: &mut R) -> Bson {
    let count = rng.random_range(2..=4);
    let paragraphs: Vec<String> = (0..count).map(|_| random_paragraph(rng)).collect();
    Bson::String(paragraphs.join("\n"))
}
