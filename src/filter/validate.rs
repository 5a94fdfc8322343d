/// Longest value accepted for a filter parameter, in characters
pub const MAX_FILTER_LENGTH: usize = 256;

/// Check a filter value against `^[a-zA-Z0-9_-]+$` with a length cap.
///
/// Only ASCII letters, digits, underscore and hyphen are accepted, so
/// whitespace, punctuation and quote characters never reach the store.
pub fn validate(value: &str) -> bool {
    if value.is_empty() || value.chars().count() > MAX_FILTER_LENGTH {
        return false;
    }
    value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
