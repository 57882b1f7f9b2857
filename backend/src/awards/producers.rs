//! Producer name splitting.

/// Split a `producers` field into individual names.
///
/// Names are separated by commas and trimmed; empty pieces are skipped.
/// A conjunction is not a separator: `"A, B and C"` yields `"A"` and
/// `"B and C"`.
pub fn split_producers(producers: &str) -> impl Iterator<Item = &str> {
    producers
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
}
