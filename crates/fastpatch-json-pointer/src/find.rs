use serde_json::Value;

use crate::types::{Reference, ReferenceKey};
use crate::util::is_integer;
use crate::JsonPointerError;

/// Resolve a path against a document, producing a [`Reference`].
///
/// An empty path resolves to the root. Otherwise the walk descends through
/// objects and arrays; the `-` token on an array resolves to the append
/// position (one past the last index). A key missing at the *final* step
/// yields `val: None`; a key missing at an interior step, or an interior
/// value that is not a container, is `NotFound`.
pub fn find<'a>(doc: &'a Value, path: &[String]) -> Result<Reference<'a>, JsonPointerError> {
    if path.is_empty() {
        return Ok(Reference {
            val: Some(doc),
            parent: None,
            key: None,
        });
    }

    let mut current = doc;
    for (step, token) in path.iter().enumerate() {
        let last = step + 1 == path.len();
        match current {
            Value::Array(arr) => {
                let idx = if token == "-" {
                    arr.len()
                } else {
                    if !is_integer(token) {
                        return Err(JsonPointerError::InvalidIndex);
                    }
                    token
                        .parse()
                        .map_err(|_| JsonPointerError::InvalidIndex)?
                };
                match arr.get(idx) {
                    Some(v) if !last => current = v,
                    val => {
                        if !last {
                            return Err(JsonPointerError::NotFound);
                        }
                        return Ok(Reference {
                            val,
                            parent: Some(current),
                            key: Some(ReferenceKey::Index(idx)),
                        });
                    }
                }
            }
            Value::Object(map) => match map.get(token) {
                Some(v) if !last => current = v,
                val => {
                    if !last {
                        return Err(JsonPointerError::NotFound);
                    }
                    return Ok(Reference {
                        val,
                        parent: Some(current),
                        key: Some(ReferenceKey::Key(token.clone())),
                    });
                }
            },
            _ => return Err(JsonPointerError::NotFound),
        }
    }

    unreachable!("loop returns at the final step")
}
