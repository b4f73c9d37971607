//! String conversion utilities.

/// Trims a string and converts a blank result to `None`.
///
/// Comments and other optional free-text fields arrive from chat commands as
/// plain strings; an empty or whitespace-only value means "no value".
///
/// # Examples
///
/// ```
/// use sheetkeeper_domain::common::some_if_not_blank;
///
/// assert_eq!(some_if_not_blank(" hello ".to_string()), Some("hello".to_string()));
/// assert_eq!(some_if_not_blank("   ".to_string()), None);
/// ```
pub fn some_if_not_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_string())
    }
}

/// Case-insensitive name comparison used for counter and character lookups.
pub fn names_match(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
