use serde_json::Value;

use crate::util::{escape_component, is_integer};
use crate::JsonPointerError;

/// Resolve a path against a document, returning the value if it exists.
///
/// Unlike [`crate::find`] this never distinguishes why resolution failed;
/// any miss is `None`. The `-` array token is one past the end and
/// therefore always `None`.
pub fn get<'a>(doc: &'a Value, path: &[String]) -> Option<&'a Value> {
    let mut current = doc;
    for token in path {
        match current {
            Value::Object(map) => current = map.get(token)?,
            Value::Array(arr) => {
                if !is_integer(token) {
                    return None;
                }
                current = arr.get(token.parse::<usize>().ok()?)?;
            }
            _ => return None,
        }
    }
    Some(current)
}

/// Reverse lookup: the JSON Pointer of `node` within `root`, by identity.
///
/// `node` must be a reference into `root` itself; a structurally equal
/// value borrowed from elsewhere is `NotFound`. Returns `"/"` when `node`
/// *is* `root` — existing JSON Patch tooling reports the root this way
/// rather than as the empty pointer, and that is kept for compatibility.
pub fn get_path(root: &Value, node: &Value) -> Result<String, JsonPointerError> {
    if std::ptr::eq(root, node) {
        return Ok("/".to_string());
    }
    let mut pointer = String::new();
    if locate(root, node, &mut pointer) {
        Ok(pointer)
    } else {
        Err(JsonPointerError::NotFound)
    }
}

fn locate(current: &Value, node: &Value, pointer: &mut String) -> bool {
    if std::ptr::eq(current, node) {
        return true;
    }
    match current {
        Value::Object(map) => {
            for (key, child) in map {
                let len = pointer.len();
                pointer.push('/');
                pointer.push_str(&escape_component(key));
                if locate(child, node, pointer) {
                    return true;
                }
                pointer.truncate(len);
            }
            false
        }
        Value::Array(arr) => {
            for (idx, child) in arr.iter().enumerate() {
                let len = pointer.len();
                pointer.push('/');
                pointer.push_str(&idx.to_string());
                if locate(child, node, pointer) {
                    return true;
                }
                pointer.truncate(len);
            }
            false
        }
        _ => false,
    }
}
