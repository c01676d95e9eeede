//! JSON codec for patch operations.
//!
//! Converts operations to/from `serde_json::Value` in the RFC 6902 wire
//! format. Decode errors reuse the validator's machine codes so callers
//! see one error vocabulary for malformed input.

use serde_json::{json, Map, Value};

use fastpatch_json_pointer::{format_json_pointer, parse_json_pointer, validate_json_pointer, Path};

use crate::json_patch::types::{ErrorName, Op, PatchError};

// ── Serialization ─────────────────────────────────────────────────────────

fn encode_path(path: &[String]) -> Value {
    Value::String(format_json_pointer(path))
}

/// Serialize an `Op` to a `serde_json::Value` in the JSON Patch format.
///
/// The internal `_get` pseudo-operation serializes (it shows up in error
/// reports) but is rejected by [`from_json`].
pub fn to_json(op: &Op) -> Value {
    match op {
        Op::Add { path, value } => json!({
            "op": "add",
            "path": encode_path(path),
            "value": value
        }),
        Op::Remove { path } => json!({
            "op": "remove",
            "path": encode_path(path)
        }),
        Op::Replace { path, value } => json!({
            "op": "replace",
            "path": encode_path(path),
            "value": value
        }),
        Op::Move { path, from } => json!({
            "op": "move",
            "path": encode_path(path),
            "from": encode_path(from)
        }),
        Op::Copy { path, from } => json!({
            "op": "copy",
            "path": encode_path(path),
            "from": encode_path(from)
        }),
        Op::Test { path, value } => json!({
            "op": "test",
            "path": encode_path(path),
            "value": value
        }),
        Op::Get { path } => json!({
            "op": "_get",
            "path": encode_path(path)
        }),
    }
}

/// Serialize a sequence of operations to a JSON Patch array.
pub fn to_json_patch(ops: &[Op]) -> Value {
    Value::Array(ops.iter().map(to_json).collect())
}

// ── Deserialization ───────────────────────────────────────────────────────

fn decode_path(map: &Map<String, Value>, key: &str, missing: ErrorName) -> Result<Path, PatchError> {
    let s = map
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| PatchError::from(missing))?;
    validate_json_pointer(s).map_err(|_| PatchError::from(missing))?;
    Ok(parse_json_pointer(s))
}

fn require_value(map: &Map<String, Value>) -> Result<Value, PatchError> {
    map.get("value")
        .cloned()
        .ok_or_else(|| ErrorName::OperationValueRequired.into())
}

/// Deserialize a `serde_json::Value` into an `Op`.
///
/// Only the six external RFC 6902 operations decode; `_get` is internal
/// and rejected like any unknown op.
pub fn from_json(v: &Value) -> Result<Op, PatchError> {
    let map = v
        .as_object()
        .ok_or_else(|| PatchError::from(ErrorName::OperationNotAnObject))?;
    let op_name = map
        .get("op")
        .and_then(Value::as_str)
        .ok_or_else(|| PatchError::from(ErrorName::OperationOpInvalid))?;
    let path = decode_path(map, "path", ErrorName::OperationPathInvalid)?;

    match op_name {
        "add" => Ok(Op::Add {
            path,
            value: require_value(map)?,
        }),
        "remove" => Ok(Op::Remove { path }),
        "replace" => Ok(Op::Replace {
            path,
            value: require_value(map)?,
        }),
        "move" => Ok(Op::Move {
            path,
            from: decode_path(map, "from", ErrorName::OperationFromRequired)?,
        }),
        "copy" => Ok(Op::Copy {
            path,
            from: decode_path(map, "from", ErrorName::OperationFromRequired)?,
        }),
        "test" => Ok(Op::Test {
            path,
            value: require_value(map)?,
        }),
        _ => Err(ErrorName::OperationOpInvalid.into()),
    }
}

/// Deserialize a JSON Patch array into a sequence of operations.
pub fn from_json_patch(v: &Value) -> Result<Vec<Op>, PatchError> {
    let arr = v
        .as_array()
        .ok_or_else(|| PatchError::from(ErrorName::SequenceNotAnArray))?;
    arr.iter()
        .enumerate()
        .map(|(index, op)| {
            from_json(op).map_err(|err| match err {
                PatchError::Operation(e) if e.index.is_none() => {
                    PatchError::Operation(e.with_index(index).with_operation(op.clone()))
                }
                other => other,
            })
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────
