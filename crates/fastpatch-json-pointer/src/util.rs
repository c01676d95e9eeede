use crate::JsonPointerError;

/// Unescapes a JSON Pointer path component: `~1` -> `/`, then `~0` -> `~`.
///
/// The two passes must run in this order and must not be fused into one;
/// `~01` has to come out as `~1`, not `/`.
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes a JSON Pointer path component: `~` -> `~0`, then `/` -> `~1`.
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

/// Parse a JSON Pointer string into unescaped path components.
///
/// The empty pointer is the document root and parses to an empty path.
/// Splitting happens before unescaping, per RFC 6901.
pub fn parse_json_pointer(pointer: &str) -> Vec<String> {
    if pointer.is_empty() {
        return Vec::new();
    }
    pointer[1..].split('/').map(unescape_component).collect()
}

/// Format path components into a JSON Pointer string.
pub fn format_json_pointer(path: &[String]) -> String {
    if path.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    for component in path {
        out.push('/');
        out.push_str(&escape_component(component));
    }
    out
}

/// Check if a path points to the root value.
pub fn is_root(path: &[String]) -> bool {
    path.is_empty()
}

/// Get the parent path of a given path.
pub fn parent(path: &[String]) -> Result<Vec<String>, JsonPointerError> {
    if path.is_empty() {
        return Err(JsonPointerError::NoParent);
    }
    Ok(path[..path.len() - 1].to_vec())
}

/// Check if a string is a canonical non-negative integer array index:
/// base-10 digits, no sign, no leading zeros.
pub fn is_valid_index(index: &str) -> bool {
    if index.is_empty() {
        return false;
    }
    let bytes = index.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|&b| b.is_ascii_digit())
}

/// Check if a string consists only of ASCII digits.
///
/// Unlike [`is_valid_index`] this accepts leading zeros; pointer
/// resolution is lenient, only validation of `add` targets is strict.
pub fn is_integer(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    s.bytes().all(|b| b.is_ascii_digit())
}
