//! JSON Patch apply logic: root-level dispatch, pointer walk with the
//! prototype guard, and per-container operation dispatch.

use serde_json::Value;

use fastpatch_json_pointer::{
    find, get as pointer_get, is_integer, is_valid_index, parse_json_pointer, validate_path, Path,
};
use fastpatch_util::{are_equals, deep_clone};

use super::codec::json::to_json;
use super::types::{ApplyOptions, ErrorName, Op, OpResult, PatchError, PatchResult};

// ── Prototype guard ───────────────────────────────────────────────────────

/// Rejects paths that would reach `__proto__`, or `prototype` directly
/// beneath `constructor`. The attack surface does not exist without a
/// prototype chain, but the keys are rejected anyway so patches behave the
/// same across implementations.
fn check_prototype_guard(tokens: &[String]) -> Result<(), PatchError> {
    for (i, token) in tokens.iter().enumerate() {
        if token == "__proto__" || (token == "prototype" && i > 0 && tokens[i - 1] == "constructor")
        {
            return Err(PatchError::PrototypePollution);
        }
    }
    Ok(())
}

// ── Single-operation applier ──────────────────────────────────────────────

/// Apply a single operation to the document, mutating it in place.
///
/// `index` is the operation's position in its patch sequence and is only
/// used for error reporting. Root replacement (an empty `path`) swaps the
/// value behind `doc`.
pub fn apply_op(
    doc: &mut Value,
    op: &Op,
    opts: &ApplyOptions,
    index: usize,
) -> Result<OpResult, PatchError> {
    apply_op_inner(doc, op, opts, index).map_err(|err| match err {
        PatchError::Operation(mut e) => {
            if e.index.is_none() {
                e = e.with_index(index);
            }
            if e.operation.is_none() {
                e = e.with_operation(to_json(op));
            }
            PatchError::Operation(e)
        }
        other => other,
    })
}

fn apply_op_inner(
    doc: &mut Value,
    op: &Op,
    opts: &ApplyOptions,
    index: usize,
) -> Result<OpResult, PatchError> {
    if opts.ban_prototype {
        check_prototype_guard(op.path())?;
        if let Some(from) = op.from() {
            check_prototype_guard(from)?;
        }
    }
    validate_path(op.path()).map_err(|_| PatchError::from(ErrorName::OperationPathInvalid))?;
    if let Some(from) = op.from() {
        validate_path(from).map_err(|_| PatchError::from(ErrorName::OperationPathInvalid))?;
    }
    if op.path().is_empty() {
        return apply_root(doc, op);
    }
    match op {
        Op::Move { path, from } => apply_move(doc, path, from, opts, index),
        Op::Copy { path, from } => apply_copy(doc, path, from, opts, index),
        _ => apply_at_path(doc, op, opts),
    }
}

// ── Root-level operations ─────────────────────────────────────────────────

fn apply_root(doc: &mut Value, op: &Op) -> Result<OpResult, PatchError> {
    match op {
        Op::Add { value, .. } => {
            *doc = value.clone();
            Ok(OpResult::default())
        }
        Op::Replace { value, .. } => {
            let removed = std::mem::replace(doc, value.clone());
            Ok(OpResult {
                removed: Some(removed),
                ..Default::default()
            })
        }
        Op::Remove { .. } => {
            let removed = std::mem::replace(doc, Value::Null);
            Ok(OpResult {
                removed: Some(removed),
                ..Default::default()
            })
        }
        Op::Move { from, .. } => {
            // Compatibility quirk: the moved subtree replaces the whole
            // root but is not also detached from its old position.
            let src = resolve_from(doc, from)?.clone();
            let removed = std::mem::replace(doc, src);
            Ok(OpResult {
                removed: Some(removed),
                ..Default::default()
            })
        }
        Op::Copy { from, .. } => {
            let src = deep_clone(resolve_from(doc, from)?);
            *doc = src;
            Ok(OpResult::default())
        }
        Op::Test { value, .. } => {
            if !are_equals(doc, value) {
                return Err(ErrorName::TestOperationFailed.into());
            }
            Ok(OpResult {
                test: Some(true),
                ..Default::default()
            })
        }
        Op::Get { .. } => Ok(OpResult {
            value: Some(doc.clone()),
            ..Default::default()
        }),
    }
}

// ── move / copy ───────────────────────────────────────────────────────────

fn resolve_from<'a>(doc: &'a Value, from: &[String]) -> Result<&'a Value, PatchError> {
    match find(doc, from) {
        Ok(reference) => reference
            .val
            .ok_or_else(|| ErrorName::OperationFromUnresolvable.into()),
        Err(_) => Err(ErrorName::OperationFromUnresolvable.into()),
    }
}

fn apply_move(
    doc: &mut Value,
    path: &Path,
    from: &Path,
    opts: &ApplyOptions,
    index: usize,
) -> Result<OpResult, PatchError> {
    if opts.validate {
        resolve_from(doc, from)?;
    }
    // The displaced target must be captured before the document changes;
    // the moved-from value is not reported as `removed`.
    let removed = pointer_get(doc, path).map(deep_clone);
    let moved = apply_op(doc, &Op::Remove { path: from.clone() }, opts, index)?
        .removed
        .ok_or_else(|| PatchError::from(ErrorName::OperationFromUnresolvable))?;
    apply_op(
        doc,
        &Op::Add {
            path: path.clone(),
            value: moved,
        },
        opts,
        index,
    )?;
    Ok(OpResult {
        removed,
        ..Default::default()
    })
}

fn apply_copy(
    doc: &mut Value,
    path: &Path,
    from: &Path,
    opts: &ApplyOptions,
    index: usize,
) -> Result<OpResult, PatchError> {
    let value = deep_clone(resolve_from(doc, from)?);
    apply_op(
        doc,
        &Op::Add {
            path: path.clone(),
            value,
        },
        opts,
        index,
    )?;
    Ok(OpResult::default())
}

// ── Pointer walk + per-container dispatch ─────────────────────────────────

fn missing_interior(op: &Op) -> PatchError {
    match op {
        Op::Add { .. } => ErrorName::OperationPathCannotAdd.into(),
        _ => ErrorName::OperationPathUnresolvable.into(),
    }
}

fn array_index(token: &str, len: usize) -> Result<usize, PatchError> {
    if token == "-" {
        return Ok(len);
    }
    if !is_integer(token) {
        return Err(ErrorName::OperationPathIllegalArrayIndex.into());
    }
    token
        .parse()
        .map_err(|_| ErrorName::OperationPathIllegalArrayIndex.into())
}

fn apply_at_path(doc: &mut Value, op: &Op, opts: &ApplyOptions) -> Result<OpResult, PatchError> {
    let tokens = op.path();
    let last = tokens.len() - 1;

    let mut current: &mut Value = doc;
    for token in &tokens[..last] {
        current = match current {
            Value::Object(map) => match map.get_mut(token) {
                Some(next) => next,
                None => return Err(missing_interior(op)),
            },
            Value::Array(arr) => {
                let len = arr.len();
                let idx = array_index(token, len)?;
                match arr.get_mut(idx) {
                    Some(next) => next,
                    None => return Err(missing_interior(op)),
                }
            }
            _ => return Err(ErrorName::OperationPathUnresolvable.into()),
        };
    }

    let token = tokens[last].as_str();
    match current {
        Value::Object(map) => match op {
            Op::Add { value, .. } => {
                // RFC 6902 permits add on an existing key; the prior value
                // is overwritten and not reported.
                map.insert(token.to_string(), value.clone());
                Ok(OpResult::default())
            }
            Op::Remove { .. } => match map.shift_remove(token) {
                Some(removed) => Ok(OpResult {
                    removed: Some(removed),
                    ..Default::default()
                }),
                None => Err(ErrorName::OperationPathUnresolvable.into()),
            },
            Op::Replace { value, .. } => match map.get_mut(token) {
                Some(slot) => {
                    let removed = std::mem::replace(slot, value.clone());
                    Ok(OpResult {
                        removed: Some(removed),
                        ..Default::default()
                    })
                }
                None => Err(ErrorName::OperationPathUnresolvable.into()),
            },
            Op::Test { value, .. } => match map.get(token) {
                Some(actual) if are_equals(actual, value) => Ok(OpResult {
                    test: Some(true),
                    ..Default::default()
                }),
                _ => Err(ErrorName::TestOperationFailed.into()),
            },
            Op::Get { .. } => Ok(OpResult {
                value: map.get(token).cloned(),
                ..Default::default()
            }),
            Op::Move { .. } | Op::Copy { .. } => {
                unreachable!("move and copy are rewritten before dispatch")
            }
        },
        Value::Array(arr) => {
            let len = arr.len();
            match op {
                Op::Add { value, .. } => {
                    if opts.validate && token != "-" && !is_valid_index(token) {
                        return Err(ErrorName::OperationPathIllegalArrayIndex.into());
                    }
                    let idx = array_index(token, len)?;
                    if idx > len {
                        return Err(ErrorName::OperationValueOutOfBounds.into());
                    }
                    arr.insert(idx, value.clone());
                    Ok(OpResult {
                        index: Some(idx),
                        ..Default::default()
                    })
                }
                Op::Remove { .. } => {
                    let idx = array_index(token, len)?;
                    if idx >= len {
                        return Err(ErrorName::OperationPathUnresolvable.into());
                    }
                    Ok(OpResult {
                        removed: Some(arr.remove(idx)),
                        ..Default::default()
                    })
                }
                Op::Replace { value, .. } => {
                    let idx = array_index(token, len)?;
                    if idx >= len {
                        return Err(ErrorName::OperationPathUnresolvable.into());
                    }
                    let removed = std::mem::replace(&mut arr[idx], value.clone());
                    Ok(OpResult {
                        removed: Some(removed),
                        ..Default::default()
                    })
                }
                Op::Test { value, .. } => {
                    let idx = array_index(token, len)?;
                    match arr.get(idx) {
                        Some(actual) if are_equals(actual, value) => Ok(OpResult {
                            test: Some(true),
                            ..Default::default()
                        }),
                        _ => Err(ErrorName::TestOperationFailed.into()),
                    }
                }
                Op::Get { .. } => {
                    let idx = array_index(token, len)?;
                    Ok(OpResult {
                        value: arr.get(idx).cloned(),
                        ..Default::default()
                    })
                }
                Op::Move { .. } | Op::Copy { .. } => {
                    unreachable!("move and copy are rewritten before dispatch")
                }
            }
        }
        _ => Err(ErrorName::OperationPathUnresolvable.into()),
    }
}

// ── Patch applier ─────────────────────────────────────────────────────────

/// Apply a sequence of operations, threading the (possibly replaced) root
/// through the sequence.
///
/// An error aborts the sequence and carries the failing index, the encoded
/// operation, and the document as patched so far; earlier operations are
/// not rolled back. Callers that need atomicity clone the document first.
pub fn apply_patch(
    mut doc: Value,
    patch: &[Op],
    opts: &ApplyOptions,
) -> Result<PatchResult, PatchError> {
    let mut res = Vec::with_capacity(patch.len());
    for (i, op) in patch.iter().enumerate() {
        match apply_op(&mut doc, op, opts, i) {
            Ok(result) => res.push(result),
            Err(PatchError::Operation(e)) => {
                return Err(PatchError::Operation(e.with_document(doc)))
            }
            Err(err) => return Err(err),
        }
    }
    Ok(PatchResult { doc, res })
}

/// Fold step: apply one operation and return the new document, erroring on
/// a failed `test`.
pub fn apply_reducer(mut doc: Value, op: &Op, index: usize) -> Result<Value, PatchError> {
    apply_op(&mut doc, op, &ApplyOptions::default(), index)?;
    Ok(doc)
}

/// Retrieve the value a JSON Pointer refers to, with the prototype guard
/// applied.
///
/// A pointer whose final token does not exist resolves to `Ok(None)`; a
/// pointer that cannot be walked (missing interior key, non-container
/// interior node, malformed array index) is an error.
pub fn get_value_by_pointer<'a>(
    doc: &'a Value,
    pointer: &str,
) -> Result<Option<&'a Value>, PatchError> {
    let path = parse_json_pointer(pointer);
    check_prototype_guard(&path)?;
    if path.is_empty() {
        return Ok(Some(doc));
    }
    match find(doc, &path) {
        Ok(reference) => Ok(reference.val),
        Err(_) => Err(ErrorName::OperationPathUnresolvable.into()),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
