//! fastpatch — RFC 6902 (JSON Patch) over in-memory JSON documents.
//!
//! Four tightly related capabilities: apply a patch sequence to a
//! document, apply a single operation, validate a patch sequence
//! (optionally against a document), and diff two documents into a
//! replayable patch. Pointer handling (RFC 6901) lives in the
//! `fastpatch-json-pointer` crate; value utilities (deep clone,
//! structural equality) in `fastpatch-util`.

pub mod json_patch;
pub mod json_patch_diff;

pub use json_patch::{
    apply_op, apply_patch, apply_reducer, from_json, from_json_patch, get_value_by_pointer,
    to_json, to_json_patch, validate, validator, ApplyOptions, ErrorName, JsonPatchError, Op,
    OpResult, PatchError, PatchResult, Path,
};
pub use json_patch_diff::compare;

// The pointer token codec is part of the public surface.
pub use fastpatch_json_pointer::{
    escape_component, get_path, parse_json_pointer, unescape_component,
};
pub use fastpatch_util::{are_equals, deep_clone};
