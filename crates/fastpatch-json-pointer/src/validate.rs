//! Validation of JSON Pointer strings and paths.

use crate::JsonPointerError;

/// Maximum allowed pointer string length.
const MAX_POINTER_LENGTH: usize = 1024;

/// Maximum allowed path depth.
const MAX_PATH_LENGTH: usize = 256;

/// Validate a JSON Pointer string.
///
/// # Errors
///
/// Returns an error if:
/// - The pointer is non-empty but doesn't start with `/`
/// - The pointer exceeds the maximum length (1024 characters)
///
/// # Example
///
/// ```
/// use fastpatch_json_pointer::validate_json_pointer;
///
/// validate_json_pointer("").unwrap(); // Root is valid
/// validate_json_pointer("/foo/bar").unwrap();
/// validate_json_pointer("foo").unwrap_err(); // Missing leading /
/// ```
pub fn validate_json_pointer(pointer: &str) -> Result<(), JsonPointerError> {
    if pointer.is_empty() {
        return Ok(());
    }
    if !pointer.starts_with('/') {
        return Err(JsonPointerError::PointerInvalid);
    }
    if pointer.len() > MAX_POINTER_LENGTH {
        return Err(JsonPointerError::PointerTooLong);
    }
    Ok(())
}

/// Validate a path (array of path steps) against the depth limit.
pub fn validate_path(path: &[String]) -> Result<(), JsonPointerError> {
    if path.len() > MAX_PATH_LENGTH {
        return Err(JsonPointerError::PathTooLong);
    }
    Ok(())
}
