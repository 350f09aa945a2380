//! Rules for project metadata entries (icon + description pairs).
//!
//! An entry with both fields empty carries no information and is dropped
//! before it reaches the database. Either field alone may be empty.
//! Whitespace counts as content.

/// Access to the two free-text fields of a metadata entry.
pub trait MetadataFields {
    fn icon(&self) -> &str;
    fn description(&self) -> &str;
}

/// True when both the icon and the description are empty strings.
pub fn is_blank(icon: &str, description: &str) -> bool {
    icon.is_empty() && description.is_empty()
}

/// Keep only entries with at least one non-blank field, preserving order.
pub fn retain_filled<T: MetadataFields>(items: &[T]) -> Vec<&T> {
    items
        .iter()
        .filter(|item| !is_blank(item.icon(), item.description()))
        .collect()
}
