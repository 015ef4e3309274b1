//! Nested document flattening.
//!
//! A nested document such as `{ address: { city: "Oslo" } }` flattens to
//! `{ "address.city": "Oslo" }`. Only non-empty sub-documents are descended
//! into; empty sub-documents and arrays are kept as leaves.

use bson::{Bson, Document};
use std::collections::HashSet;

/// Single-level document keyed by joined key paths.
pub type FlatMap = Document;

/// The set of flattened key paths present in a document.
pub type FlatKeys = HashSet<String>;

/// Separator used for MongoDB dotted field paths.
pub const PATH_SEPARATOR: &str = ".";

/// Flatten a nested document, joining path components with `separator`.
pub fn flatten(doc: &Document, separator: &str) -> FlatMap {
    let mut flat = FlatMap::new();
    flatten_into(doc, separator, None, &mut flat);
    flat
}

fn flatten_into(doc: &Document, separator: &str, prefix: Option<&str>, out: &mut FlatMap) {
    for (key, value) in doc {
        let path = match prefix {
            Some(parent) => format!("{parent}{separator}{key}"),
            None => key.clone(),
        };
        match value {
            Bson::Document(nested) if !nested.is_empty() => {
                flatten_into(nested, separator, Some(&path), out)
            }
            leaf => {
                out.insert(path, leaf.clone());
            }
        }
    }
}

/// Collect the dotted key paths of a document.
pub fn flattened_keys(doc: &Document) -> FlatKeys {
    flatten(doc, PATH_SEPARATOR).keys().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn test_flatten_nested() {
        let doc = doc! {
            "_id": 1,
            "name": "Bob",
            "address": { "city": "Oslo", "geo": { "lat": 59.9, "lon": 10.7 } },
        };

        let flat = flatten(&doc, ".");

        assert_eq!(flat.len(), 5);
        assert_eq!(flat.get_str("address.city").unwrap(), "Oslo");
        assert_eq!(flat.get_f64("address.geo.lat").unwrap(), 59.9);
        assert_eq!(flat.get_i32("_id").unwrap(), 1);
        assert!(!flat.contains_key("address"));
    }

    #[test]
    fn test_flatten_custom_separator() {
        let doc = doc! { "a": { "b": { "c": true } } };
        let flat = flatten(&doc, "_");
        assert_eq!(flat, doc! { "a_b_c": true });
    }

    #[test]
    fn test_empty_subdocument_is_leaf() {
        let doc = doc! { "profile": {}, "tags": ["x", "y"] };
        let flat = flatten(&doc, ".");

        assert_eq!(flat.get_document("profile").unwrap(), &Document::new());
        assert_eq!(flat.get_array("tags").unwrap().len(), 2);
    }

    #[test]
    fn test_arrays_of_documents_are_not_descended() {
        let doc = doc! { "items": [{ "sku": "a" }] };
        let keys = flattened_keys(&doc);
        assert_eq!(keys, FlatKeys::from(["items".to_string()]));
    }

    #[test]
    fn test_flatten_is_idempotent() {
        let doc = doc! {
            "email": "a@x.com",
            "address": { "city": "Oslo", "zip": "0150", "extra": {} },
            "nulls": null,
        };

        let once = flatten(&doc, ".");
        let twice = flatten(&once, ".");

        let once_keys: FlatKeys = once.keys().cloned().collect();
        let twice_keys: FlatKeys = twice.keys().cloned().collect();
        assert_eq!(once_keys, twice_keys);
    }

    #[test]
    fn test_flatten_empty_document() {
        assert!(flatten(&Document::new(), ".").is_empty());
    }
}
