//! JSON Patch implementation (RFC 6902).
//!
//! # Operations
//!
//! All standard RFC 6902 operations are supported:
//! `add`, `remove`, `replace`, `copy`, `move`, `test`;
//! plus the internal `_get` pseudo-operation backing pointer reads.
//!
//! The module family:
//! - [`types`] — operations, results, options and the error taxon.
//! - [`apply`] — single-operation and sequence appliers.
//! - [`validate`] — static and document-aware validation of raw patches.
//! - [`codec`] — RFC 6902 wire format.

pub mod apply;
pub mod codec;
pub mod types;
pub mod validate;

pub use apply::{apply_op, apply_patch, apply_reducer, get_value_by_pointer};
pub use codec::json::{from_json, from_json_patch, to_json, to_json_patch};
pub use types::{
    ApplyOptions, ErrorName, JsonPatchError, Op, OpResult, PatchError, PatchResult, Path,
};
pub use validate::{validate, validator};
