//! Compile a nested field spec into a flat generator plan.

use crate::error::FogError;
use fog_core::config::{mapping_key, value_kind};
use fog_core::{CompiledGeneratorMap, GeneratorRef, DELETE_MARKER};
use fog_generator::GeneratorRegistry;
use serde_yaml::{Mapping, Value};

/// Compile a collection's field spec against `registry`.
///
/// Nested mappings become dotted paths (`address: { city: city }` compiles to
/// `address.city → Call("city")`). `"delete"` or `false` mark a field for
/// removal. List values are rejected: lists of generators, and especially
/// lists of nested mappings, are not supported yet.
///
/// A path may not also be the parent of another path (`address` next to
/// `address.zip`): the resulting `$set` and `$unset` would conflict.
///
/// Either the whole spec compiles or an error is returned; there is no
/// partially compiled result.
pub fn compile_generators(
    fields: &Mapping,
    registry: &GeneratorRegistry,
) -> Result<CompiledGeneratorMap, FogError> {
    let mut compiled = CompiledGeneratorMap::new();
    compile_into(fields, registry, None, &mut compiled)?;
    check_overlapping_paths(&compiled)?;
    Ok(compiled)
}

fn check_overlapping_paths(compiled: &CompiledGeneratorMap) -> Result<(), FogError> {
    for (path, _) in compiled {
        for (index, _) in path.match_indices('.') {
            let parent = &path[..index];
            if compiled.get(parent).is_some() {
                return Err(FogError::UnsupportedSpec {
                    path: path.clone(),
                    reason: format!("parent field \"{parent}\" is also specified"),
                });
            }
        }
    }
    Ok(())
}

fn compile_into(
    fields: &Mapping,
    registry: &GeneratorRegistry,
    prefix: Option<&str>,
    compiled: &mut CompiledGeneratorMap,
) -> Result<(), FogError> {
    for (key, value) in fields {
        let field = mapping_key(key, prefix.unwrap_or("field spec")).map_err(|err| {
            FogError::UnsupportedSpec {
                path: prefix.unwrap_or_default().to_string(),
                reason: err.to_string(),
            }
        })?;
        let path = match prefix {
            Some(parent) => format!("{parent}.{field}"),
            None => field,
        };

        let generator = match value {
            Value::Mapping(nested) => {
                compile_into(nested, registry, Some(&path), compiled)?;
                continue;
            }
            Value::String(name) if name == DELETE_MARKER => GeneratorRef::Delete,
            Value::Bool(false) => GeneratorRef::Delete,
            Value::String(name) => {
                if !registry.contains(name) {
                    return Err(FogError::UnknownGenerator {
                        path,
                        name: name.clone(),
                    });
                }
                GeneratorRef::Call(name.clone())
            }
            Value::Sequence(_) => {
                return Err(FogError::UnsupportedSpec {
                    path,
                    reason: "lists are not supported yet".to_string(),
                })
            }
            other => {
                return Err(FogError::UnsupportedSpec {
                    path,
                    reason: format!(
                        "expected a generator name or \"{DELETE_MARKER}\", found {}",
                        value_kind(other)
                    ),
                })
            }
        };

        if compiled.insert(path.clone(), generator).is_some() {
            return Err(FogError::UnsupportedSpec {
                path,
                reason: "field is specified more than once".to_string(),
            });
        }
    }
    Ok(())
}
