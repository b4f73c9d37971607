//! Chat-markdown escaping for user-supplied text.
//!
//! Names and comments are stored escaped so they never break the formatting of
//! a rendered sheet. Renderers take an `unescape` callback and usually pass
//! [`unescape_markdown`] when the output is shown outside of chat markdown.

const SPECIAL: [char; 7] = ['\\', '*', '_', '~', '`', '|', '>'];

/// Escapes every chat-markdown control character with a backslash.
///
/// # Examples
///
/// ```
/// use sheetkeeper_domain::common::escape_markdown;
///
/// assert_eq!(escape_markdown("*Blood* Pool"), "\\*Blood\\* Pool");
/// ```
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if SPECIAL.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Reverses [`escape_markdown`].
///
/// A backslash followed by a control character yields the character; any other
/// backslash is kept as written.
pub fn unescape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                if SPECIAL.contains(&next) {
                    out.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

/// Identity filter for callers that want stored text verbatim.
pub fn keep_escaped(text: &str) -> String {
    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_marks_control_characters() {
        assert_eq!(escape_markdown("a_b|c"), "a\\_b\\|c");
        assert_eq!(escape_markdown("> quote"), "\\> quote");
    }

    #[test]
    fn escape_leaves_plain_text_alone() {
        assert_eq!(escape_markdown("Willpower"), "Willpower");
    }

    #[test]
    fn unescape_restores_original() {
        let raw = "**Gnosis** ~ `rites` \\ done";
        assert_eq!(unescape_markdown(&escape_markdown(raw)), raw);
    }

    #[test]
    fn unescape_keeps_stray_backslash() {
        assert_eq!(unescape_markdown("C:\\path"), "C:\\path");
        assert_eq!(unescape_markdown("trailing\\"), "trailing\\");
    }
}
