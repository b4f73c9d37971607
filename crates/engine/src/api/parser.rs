//! Slash-command line parsing.
//!
//! Accepts `/group name key:value key:"quoted value"`. Option keys are
//! case-insensitive; values keep their case. Inside quotes `\"` and `\\`
//! escape a quote and a backslash.

use regex_lite::Regex;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::LazyLock;

static HEAD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*/([A-Za-z_]+)(?:\s+([A-Za-z_]+))?(?:\s+|$)").expect("valid regex")
});
static OPTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_]+):(?:"((?:[^"\\]|\\.)*)"|(\S+))"#).expect("valid regex")
});

/// Errors raised while reading a command line or its options.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Commands start with '/'")]
    NotACommand,

    #[error("Could not read '{0}'; options look like key:value or key:\"a value\"")]
    Malformed(String),

    #[error("Option '{0}' was given more than once")]
    DuplicateOption(String),

    #[error("Missing required option '{0}'")]
    MissingOption(String),

    #[error("Option '{option}' must be a whole number (got '{value}')")]
    InvalidNumber { option: String, value: String },

    #[error("Invalid value for '{option}': {message}")]
    InvalidValue { option: String, message: String },
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub group: String,
    /// Empty for single-word commands such as `/help`
    pub name: String,
    options: HashMap<String, String>,
}

impl Invocation {
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            options: HashMap::new(),
        }
    }

    pub fn with_option(mut self, key: &str, value: impl Into<String>) -> Self {
        self.options.insert(key.to_lowercase(), value.into());
        self
    }

    pub fn option_keys(&self) -> impl Iterator<Item = &str> {
        self.options.keys().map(String::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    pub fn require(&self, key: &str) -> Result<&str, ParseError> {
        self.get(key)
            .ok_or_else(|| ParseError::MissingOption(key.to_string()))
    }

    pub fn int(&self, key: &str) -> Result<Option<i64>, ParseError> {
        self.get(key)
            .map(|value| {
                value.trim().parse::<i64>().map_err(|_| ParseError::InvalidNumber {
                    option: key.to_string(),
                    value: value.to_string(),
                })
            })
            .transpose()
    }

    pub fn require_int(&self, key: &str) -> Result<i64, ParseError> {
        self.int(key)?
            .ok_or_else(|| ParseError::MissingOption(key.to_string()))
    }

    /// Parse an optional value with its `FromStr` impl.
    pub fn parsed<T>(&self, key: &str) -> Result<Option<T>, ParseError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.get(key)
            .map(|value| {
                value.parse::<T>().map_err(|e| ParseError::InvalidValue {
                    option: key.to_string(),
                    message: e.to_string(),
                })
            })
            .transpose()
    }

    pub fn require_parsed<T>(&self, key: &str) -> Result<T, ParseError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.parsed(key)?
            .ok_or_else(|| ParseError::MissingOption(key.to_string()))
    }
}

/// Parse one command line.
pub fn parse_invocation(line: &str) -> Result<Invocation, ParseError> {
    let head = HEAD_RE.captures(line).ok_or(ParseError::NotACommand)?;
    let group = head.get(1).map_or("", |m| m.as_str()).to_lowercase();
    let name = head.get(2).map_or("", |m| m.as_str()).to_lowercase();
    let rest_start = head.get(0).map_or(line.len(), |m| m.end());
    let rest = &line[rest_start..];

    let mut invocation = Invocation::new(group, name);
    let mut cursor = 0;
    for caps in OPTION_RE.captures_iter(rest) {
        let Some(whole) = caps.get(0) else { continue };
        let gap = &rest[cursor..whole.start()];
        if !gap.trim().is_empty() {
            return Err(ParseError::Malformed(gap.trim().to_string()));
        }
        cursor = whole.end();

        let key = caps.get(1).map_or("", |m| m.as_str()).to_lowercase();
        let value = match (caps.get(2), caps.get(3)) {
            (Some(quoted), _) => unescape_quoted(quoted.as_str()),
            (None, Some(bare)) => bare.as_str().to_string(),
            (None, None) => String::new(),
        };
        if invocation.options.insert(key.clone(), value).is_some() {
            return Err(ParseError::DuplicateOption(key));
        }
    }

    let tail = rest[cursor..].trim();
    if !tail.is_empty() {
        return Err(ParseError::Malformed(tail.to_string()));
    }
    Ok(invocation)
}

fn unescape_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(next @ ('"' | '\\')) => out.push(next),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            },
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_group_name_and_options() {
        let inv = parse_invocation(r#"/counter add character:Nadia name:"Blood Pool" perm:10"#)
            .unwrap();

        assert_eq!(inv.group, "counter");
        assert_eq!(inv.name, "add");
        assert_eq!(inv.get("character"), Some("Nadia"));
        assert_eq!(inv.get("name"), Some("Blood Pool"));
        assert_eq!(inv.require_int("perm"), Ok(10));
    }

    #[test]
    fn single_word_commands_have_empty_name() {
        let inv = parse_invocation("/help").unwrap();
        assert_eq!(inv.group, "help");
        assert_eq!(inv.name, "");
    }

    #[test]
    fn option_directly_after_group_is_not_a_name() {
        let inv = parse_invocation("/help topic:counter").unwrap();
        assert_eq!(inv.name, "");
        assert_eq!(inv.get("topic"), Some("counter"));
    }

    #[test]
    fn keys_are_case_insensitive() {
        let inv = parse_invocation("/Character Show Character:Nadia").unwrap();
        assert_eq!(inv.group, "character");
        assert_eq!(inv.name, "show");
        assert_eq!(inv.get("character"), Some("Nadia"));
    }

    #[test]
    fn quoted_values_keep_escaped_quotes() {
        let inv = parse_invocation(r#"/counter comment text:"the \"old\" wand""#).unwrap();
        assert_eq!(inv.get("text"), Some(r#"the "old" wand"#));
    }

    #[test]
    fn empty_quotes_give_empty_value() {
        let inv = parse_invocation(r#"/counter comment text:"""#).unwrap();
        assert_eq!(inv.get("text"), Some(""));
    }

    #[test]
    fn stray_words_are_rejected() {
        assert_eq!(
            parse_invocation("/counter add Nadia perm:3"),
            Err(ParseError::Malformed("Nadia".to_string()))
        );
        assert_eq!(
            parse_invocation("/counter add perm:3 extra"),
            Err(ParseError::Malformed("extra".to_string()))
        );
    }

    #[test]
    fn duplicate_options_are_rejected() {
        assert_eq!(
            parse_invocation("/counter temp value:1 value:2"),
            Err(ParseError::DuplicateOption("value".to_string()))
        );
    }

    #[test]
    fn lines_without_slash_are_not_commands() {
        assert_eq!(parse_invocation("counter add"), Err(ParseError::NotACommand));
        assert_eq!(parse_invocation(""), Err(ParseError::NotACommand));
    }

    #[test]
    fn numbers_are_validated() {
        let inv = parse_invocation("/counter temp value:lots").unwrap();
        assert!(matches!(
            inv.int("value"),
            Err(ParseError::InvalidNumber { .. })
        ));
        assert_eq!(inv.int("missing"), Ok(None));
        assert_eq!(
            inv.require_int("missing"),
            Err(ParseError::MissingOption("missing".to_string()))
        );
    }

    #[test]
    fn negative_numbers_parse() {
        let inv = parse_invocation("/counter temp value:-2").unwrap();
        assert_eq!(inv.int("value"), Ok(Some(-2)));
    }

    #[test]
    fn typed_values_use_from_str() {
        let inv = parse_invocation("/health damage severity:agg").unwrap();
        let severity: sheetkeeper_domain::DamageSeverity = inv.require_parsed("severity").unwrap();
        assert_eq!(severity, sheetkeeper_domain::DamageSeverity::Aggravated);

        let inv = parse_invocation("/health damage severity:fire").unwrap();
        assert!(matches!(
            inv.parsed::<sheetkeeper_domain::DamageSeverity>("severity"),
            Err(ParseError::InvalidValue { .. })
        ));
    }
}
