//! Type definitions for JSON Pointer.

use serde_json::Value;

/// A step in a JSON Pointer path, unescaped.
pub type PathStep = String;

/// A JSON Pointer path.
pub type Path = Vec<PathStep>;

/// The key under which a referenced value lives in its parent container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceKey {
    /// Object property name.
    Key(String),
    /// Array index; for the `-` token this is the array length.
    Index(usize),
}

/// A resolved reference into a JSON document.
///
/// Produced by [`crate::find`]: either the root itself (`parent` and `key`
/// are `None`), or a parent container plus the final key. `val` is `None`
/// when the final key does not exist in the parent (including the `-`
/// append position of an array).
#[derive(Debug, Clone, PartialEq)]
pub struct Reference<'a> {
    /// The referenced value, if present.
    pub val: Option<&'a Value>,
    /// The container holding the referenced value.
    pub parent: Option<&'a Value>,
    /// The key within `parent`.
    pub key: Option<ReferenceKey>,
}

impl<'a> Reference<'a> {
    /// True if this reference is the document root.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// True if the parent container is an array.
    pub fn is_array_reference(&self) -> bool {
        matches!(self.parent, Some(Value::Array(_)))
    }

    /// True if the parent container is an object.
    pub fn is_object_reference(&self) -> bool {
        matches!(self.parent, Some(Value::Object(_)))
    }

    /// The numeric index, if the reference is into an array.
    pub fn index(&self) -> Option<usize> {
        match self.key {
            Some(ReferenceKey::Index(idx)) => Some(idx),
            _ => None,
        }
    }

    /// True if the reference points one past the last element of an array
    /// (the `add` append position).
    pub fn is_array_end(&self) -> bool {
        if let (Some(Value::Array(arr)), Some(idx)) = (self.parent, self.index()) {
            return idx == arr.len();
        }
        false
    }
}
