//! JSON Pointer (RFC 6901) utilities.
//!
//! A pointer is either the empty string (the document root) or a sequence
//! of `/`-separated tokens, with `~0` and `~1` escaping `~` and `/`.
//! This crate provides the token codec ([`escape_component`],
//! [`unescape_component`]), pointer parsing and formatting, traversal
//! ([`find`] producing a [`Reference`]), value lookup ([`get`]),
//! identity-based reverse lookup ([`get_path`]), and pointer-string
//! validation.

use thiserror::Error;

mod find;
mod get;
pub mod types;
mod util;
mod validate;

pub use find::find;
pub use get::{get, get_path};
pub use types::{Path, PathStep, Reference, ReferenceKey};
pub use util::{
    escape_component, format_json_pointer, is_integer, is_root, is_valid_index, parent,
    parse_json_pointer, unescape_component,
};
pub use validate::{validate_json_pointer, validate_path};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JsonPointerError {
    #[error("NOT_FOUND")]
    NotFound,
    #[error("INVALID_INDEX")]
    InvalidIndex,
    #[error("NO_PARENT")]
    NoParent,
    #[error("POINTER_INVALID")]
    PointerInvalid,
    #[error("POINTER_TOO_LONG")]
    PointerTooLong,
    #[error("PATH_TOO_LONG")]
    PathTooLong,
}
