//! Object key parsing
//!
//! Object keys are flat strings; the delimiter only implies hierarchy.
//! Splitting preserves empty segments verbatim (consecutive delimiters)
//! so path reconstruction stays exact; policy decisions about empty
//! segments belong to the callers.

/// Delimiter character separating key segments
pub const DELIMITER: char = '/';

/// Split an object key into its ordered segments
///
/// An empty key yields no segments; the object is degenerate and
/// skippable, not an error.
pub fn split_key(key: &str) -> Vec<&str> {
    if key.is_empty() {
        return Vec::new();
    }
    key.split(DELIMITER).collect()
}
