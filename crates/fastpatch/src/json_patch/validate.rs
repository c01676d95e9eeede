//! JSON Patch operation and sequence validation.
//!
//! Validates raw operations (as `serde_json::Value` maps), so untrusted
//! input can be checked before decoding. Document-aware validation
//! trial-applies the sequence on clones, which lets later operations see
//! the effects of earlier ones.

use serde_json::Value;

use fastpatch_json_pointer::{find, parse_json_pointer, validate_json_pointer};
use fastpatch_util::deep_clone;

use super::apply::apply_op;
use super::codec::json::from_json;
use super::types::{ApplyOptions, ErrorName, JsonPatchError, Op, PatchError};

const KNOWN_OPS: [&str; 7] = ["add", "remove", "replace", "move", "copy", "test", "_get"];

/// Validate a single raw operation.
///
/// Static checks always run; the document-aware checks run when `document`
/// is provided. `existing_path_fragment` is the deepest existing prefix of
/// the operation's path, as resolved by the caller.
pub fn validator(
    op: &Value,
    index: usize,
    document: Option<&Value>,
    existing_path_fragment: Option<&str>,
) -> Result<(), PatchError> {
    let map = match op {
        Value::Object(map) => map,
        _ => return Err(op_error(ErrorName::OperationNotAnObject, index, op)),
    };

    let op_name = map.get("op").and_then(Value::as_str).unwrap_or("");
    if !KNOWN_OPS.contains(&op_name) {
        return Err(op_error(ErrorName::OperationOpInvalid, index, op));
    }

    // Leading-slash form plus the pointer length bound.
    let path = match map.get("path").and_then(Value::as_str) {
        Some(path) => path,
        None => return Err(op_error(ErrorName::OperationPathInvalid, index, op)),
    };
    if validate_json_pointer(path).is_err() {
        return Err(op_error(ErrorName::OperationPathInvalid, index, op));
    }

    if matches!(op_name, "move" | "copy") {
        match map.get("from").and_then(Value::as_str) {
            Some(from) if validate_json_pointer(from).is_ok() => {}
            _ => return Err(op_error(ErrorName::OperationFromRequired, index, op)),
        }
    }

    if matches!(op_name, "add" | "replace" | "test") && !map.contains_key("value") {
        return Err(op_error(ErrorName::OperationValueRequired, index, op));
    }
    // OPERATION_VALUE_CANNOT_CONTAIN_UNDEFINED: parsed JSON cannot carry an
    // undefined value, so there is nothing to scan for here. The code is
    // kept in `ErrorName` for wire parity.

    if let Some(document) = document {
        match op_name {
            "add" => {
                if let Some(fragment) = existing_path_fragment {
                    let path_len = path.split('/').count();
                    let fragment_len = fragment.split('/').count();
                    if path_len != fragment_len && path_len != fragment_len + 1 {
                        return Err(op_error(ErrorName::OperationPathCannotAdd, index, op));
                    }
                }
            }
            "replace" | "remove" | "_get" => {
                if let Some(fragment) = existing_path_fragment {
                    if path != fragment {
                        return Err(op_error(ErrorName::OperationPathUnresolvable, index, op));
                    }
                }
            }
            "move" | "copy" => {
                let from = map.get("from").and_then(Value::as_str).unwrap_or("");
                let from_path = parse_json_pointer(from);
                let resolvable = match find(document, &from_path) {
                    Ok(reference) => reference.val.is_some(),
                    Err(_) => false,
                };
                if !resolvable {
                    return Err(op_error(ErrorName::OperationFromUnresolvable, index, op));
                }
            }
            _ => {}
        }
    }

    Ok(())
}

/// Validate a sequence of raw operations, optionally against a document.
///
/// Without a document only the static per-operation checks run. With a
/// document, the sequence is trial-applied to clones of both the document
/// and the operations; the first failure is returned. Prototype-guard
/// violations surface as [`PatchError::PrototypePollution`], everything
/// else as the operation error taxon.
pub fn validate(sequence: &Value, document: Option<&Value>) -> Result<(), PatchError> {
    let ops = match sequence.as_array() {
        Some(ops) => ops,
        None => return Err(ErrorName::SequenceNotAnArray.into()),
    };

    match document {
        Some(document) => {
            let mut trial = deep_clone(document);
            let opts = ApplyOptions {
                validate: true,
                ban_prototype: true,
            };
            for (i, raw) in ops.iter().enumerate() {
                validator(raw, i, None, None)?;
                let op = decode_for_trial(raw, i)?;
                match apply_op(&mut trial, &op, &opts, i) {
                    Ok(_) => {}
                    Err(PatchError::Operation(e)) => {
                        return Err(PatchError::Operation(e.with_document(deep_clone(document))))
                    }
                    Err(err) => return Err(err),
                }
            }
            Ok(())
        }
        None => {
            for (i, raw) in ops.iter().enumerate() {
                validator(raw, i, None, None)?;
            }
            Ok(())
        }
    }
}

/// The trial-apply accepts the internal `_get` pseudo-operation, which the
/// external codec rejects.
fn decode_for_trial(raw: &Value, index: usize) -> Result<Op, PatchError> {
    if raw.get("op").and_then(Value::as_str) == Some("_get") {
        let path = parse_json_pointer(raw.get("path").and_then(Value::as_str).unwrap_or(""));
        return Ok(Op::Get { path });
    }
    from_json(raw).map_err(|err| match err {
        PatchError::Operation(e) if e.index.is_none() => {
            PatchError::Operation(e.with_index(index))
        }
        other => other,
    })
}

fn op_error(name: ErrorName, index: usize, op: &Value) -> PatchError {
    PatchError::Operation(
        JsonPatchError::new(name)
            .with_index(index)
            .with_operation(op.clone()),
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────
