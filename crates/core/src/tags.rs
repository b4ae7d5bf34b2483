//! Tag and category normalization.

/// Deduplicate a tag/category list, preserving first-seen order.
///
/// Entries are trimmed; empty entries are dropped. Display order is
/// stable across reloads, so dedup must not reorder.
pub fn dedup_preserving_order(values: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut result = Vec::with_capacity(values.len());
    for value in values {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_string()) {
            result.push(trimmed.to_string());
        }
    }
    result
}
