//! Core types for the JSON Patch module: operations, results, options and
//! the patch error taxon.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

pub use fastpatch_json_pointer::Path;

// ── Op enum ───────────────────────────────────────────────────────────────

/// A JSON Patch operation (RFC 6902).
///
/// Paths are stored as parsed, unescaped pointer tokens. The `Get` variant
/// is the internal `_get` pseudo-operation backing pointer reads; it is
/// never decoded from an external patch.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Add { path: Path, value: Value },
    Remove { path: Path },
    Replace { path: Path, value: Value },
    Move { path: Path, from: Path },
    Copy { path: Path, from: Path },
    Test { path: Path, value: Value },
    Get { path: Path },
}

impl Op {
    /// Returns the operation name string used on the wire.
    pub fn op_name(&self) -> &'static str {
        match self {
            Op::Add { .. } => "add",
            Op::Remove { .. } => "remove",
            Op::Replace { .. } => "replace",
            Op::Move { .. } => "move",
            Op::Copy { .. } => "copy",
            Op::Test { .. } => "test",
            Op::Get { .. } => "_get",
        }
    }

    /// Returns the target path of the operation.
    pub fn path(&self) -> &Path {
        match self {
            Op::Add { path, .. } => path,
            Op::Remove { path } => path,
            Op::Replace { path, .. } => path,
            Op::Move { path, .. } => path,
            Op::Copy { path, .. } => path,
            Op::Test { path, .. } => path,
            Op::Get { path } => path,
        }
    }

    /// Returns the source path for `move`/`copy`.
    pub fn from(&self) -> Option<&Path> {
        match self {
            Op::Move { from, .. } | Op::Copy { from, .. } => Some(from),
            _ => None,
        }
    }
}

// ── Result types ──────────────────────────────────────────────────────────

/// Result of applying a single operation.
///
/// The document itself is threaded separately (mutated in place, or
/// returned by [`crate::json_patch::apply_patch`]); this record carries
/// the side channels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpResult {
    /// The prior value displaced by `remove`, `replace`, `move`, or a
    /// root-level `add`. Object-level `add` overwrites without reporting.
    pub removed: Option<Value>,
    /// Outcome of a `test` operation.
    pub test: Option<bool>,
    /// The resolved insertion index of an array `add`.
    pub index: Option<usize>,
    /// The value read by the internal `_get` operation.
    pub value: Option<Value>,
}

/// Result of applying a full patch.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchResult {
    pub doc: Value,
    pub res: Vec<OpResult>,
}

/// Options for the appliers.
///
/// There is no mutate-in-place flag; ownership covers it. `apply_op`
/// mutates through `&mut`, `apply_patch` consumes and returns the
/// document, and callers that want to keep the original clone it first.
#[derive(Debug, Clone)]
pub struct ApplyOptions {
    /// Run document-aware validation during application.
    pub validate: bool,
    /// Reject paths that reach `__proto__`, or `prototype` directly
    /// beneath `constructor`.
    pub ban_prototype: bool,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            validate: false,
            ban_prototype: true,
        }
    }
}

// ── Errors ────────────────────────────────────────────────────────────────

/// Machine codes carried by [`JsonPatchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorName {
    SequenceNotAnArray,
    OperationNotAnObject,
    OperationOpInvalid,
    OperationPathInvalid,
    OperationFromRequired,
    OperationValueRequired,
    OperationValueCannotContainUndefined,
    OperationPathCannotAdd,
    OperationPathUnresolvable,
    OperationFromUnresolvable,
    OperationPathIllegalArrayIndex,
    OperationValueOutOfBounds,
    TestOperationFailed,
}

impl ErrorName {
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorName::SequenceNotAnArray => "SEQUENCE_NOT_AN_ARRAY",
            ErrorName::OperationNotAnObject => "OPERATION_NOT_AN_OBJECT",
            ErrorName::OperationOpInvalid => "OPERATION_OP_INVALID",
            ErrorName::OperationPathInvalid => "OPERATION_PATH_INVALID",
            ErrorName::OperationFromRequired => "OPERATION_FROM_REQUIRED",
            ErrorName::OperationValueRequired => "OPERATION_VALUE_REQUIRED",
            ErrorName::OperationValueCannotContainUndefined => {
                "OPERATION_VALUE_CANNOT_CONTAIN_UNDEFINED"
            }
            ErrorName::OperationPathCannotAdd => "OPERATION_PATH_CANNOT_ADD",
            ErrorName::OperationPathUnresolvable => "OPERATION_PATH_UNRESOLVABLE",
            ErrorName::OperationFromUnresolvable => "OPERATION_FROM_UNRESOLVABLE",
            ErrorName::OperationPathIllegalArrayIndex => "OPERATION_PATH_ILLEGAL_ARRAY_INDEX",
            ErrorName::OperationValueOutOfBounds => "OPERATION_VALUE_OUT_OF_BOUNDS",
            ErrorName::TestOperationFailed => "TEST_OPERATION_FAILED",
        }
    }

    const fn message(self) -> &'static str {
        match self {
            ErrorName::SequenceNotAnArray => "Patch sequence must be an array",
            ErrorName::OperationNotAnObject => "Operation is not an object",
            ErrorName::OperationOpInvalid => {
                "Operation `op` property is not one of operations defined in RFC 6902"
            }
            ErrorName::OperationPathInvalid => "Operation `path` property is not a valid string",
            ErrorName::OperationFromRequired => {
                "Operation `from` property is not present (applicable in `move` and `copy` operations)"
            }
            ErrorName::OperationValueRequired => {
                "Operation `value` property is not present (applicable in `add`, `replace` and `test` operations)"
            }
            ErrorName::OperationValueCannotContainUndefined => {
                "Operation `value` property cannot contain an undefined value"
            }
            ErrorName::OperationPathCannotAdd => {
                "Cannot perform an `add` operation at the desired path"
            }
            ErrorName::OperationPathUnresolvable => {
                "Cannot perform the operation at a path that does not exist"
            }
            ErrorName::OperationFromUnresolvable => {
                "Cannot perform the operation from a path that does not exist"
            }
            ErrorName::OperationPathIllegalArrayIndex => {
                "Expected an unsigned base-10 integer value, making the new referenced value the array element with the zero-based index"
            }
            ErrorName::OperationValueOutOfBounds => {
                "The specified index MUST NOT be greater than the number of elements in the array"
            }
            ErrorName::TestOperationFailed => "Test operation failed",
        }
    }
}

impl fmt::Display for ErrorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The JSON Patch error taxon: a machine code plus the position in the
/// patch sequence, the offending operation and the document at the time
/// of failure, where known.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonPatchError {
    pub name: ErrorName,
    pub index: Option<usize>,
    pub operation: Option<Value>,
    pub document: Option<Value>,
}

impl JsonPatchError {
    pub fn new(name: ErrorName) -> Self {
        Self {
            name,
            index: None,
            operation: None,
            document: None,
        }
    }

    pub(crate) fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub(crate) fn with_operation(mut self, operation: Value) -> Self {
        self.operation = Some(operation);
        self
    }

    pub(crate) fn with_document(mut self, document: Value) -> Self {
        self.document = Some(document);
        self
    }
}

impl fmt::Display for JsonPatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.name.message())?;
        if let Some(index) = self.index {
            write!(f, " (operation index {index})")?;
        }
        Ok(())
    }
}

impl std::error::Error for JsonPatchError {}

/// Top-level error for all fallible patch functions.
///
/// The prototype-pollution guard is a distinct variant, deliberately kept
/// outside the [`JsonPatchError`] taxon: a guard violation is a security
/// rejection, not a malformed or unsatisfiable patch.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PatchError {
    #[error(transparent)]
    Operation(#[from] JsonPatchError),
    #[error("JSON-Patch: modifying `__proto__` or `constructor/prototype` prop is banned for security reasons")]
    PrototypePollution,
}

impl PatchError {
    /// The machine code, when this is an operation error.
    pub fn name(&self) -> Option<ErrorName> {
        match self {
            PatchError::Operation(e) => Some(e.name),
            PatchError::PrototypePollution => None,
        }
    }
}

impl From<ErrorName> for PatchError {
    fn from(name: ErrorName) -> Self {
        PatchError::Operation(JsonPatchError::new(name))
    }
}
