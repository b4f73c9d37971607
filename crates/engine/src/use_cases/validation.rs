//! Input checks applied before user text reaches the domain.

use sheetkeeper_domain::common::escape_markdown;

use super::error::SheetError;

/// Reject text longer than `max` characters.
pub fn require_max_length(value: &str, max: usize, field: &'static str) -> Result<(), SheetError> {
    if value.trim().chars().count() > max {
        return Err(SheetError::TooLong { field, max });
    }
    Ok(())
}

/// Form a typed name takes when stored, used to find existing records.
pub fn lookup_key(value: &str) -> String {
    escape_markdown(value.trim())
}

/// Length-check a user-supplied name and escape it for storage.
pub fn stored_name(value: &str, max: usize, field: &'static str) -> Result<String, SheetError> {
    require_max_length(value, max, field)?;
    Ok(lookup_key(value))
}

/// Length-check an optional comment and escape it for storage.
pub fn stored_comment(value: Option<&str>, max: usize) -> Result<Option<String>, SheetError> {
    value
        .map(|comment| {
            require_max_length(comment, max, "Comment")?;
            Ok(escape_markdown(comment.trim()))
        })
        .transpose()
}
