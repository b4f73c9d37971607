//! Option value suggestions while a command is being typed.

use std::sync::Arc;

use sheetkeeper_domain::{
    common::unescape_markdown, Archetype, CharacterTemplate, CounterCategory, CounterVariant,
    UserId,
};

use crate::app::App;
use crate::use_cases::SheetError;

use super::commands::{CommandRegistry, Suggest};
use super::parser::{parse_invocation, Invocation};

/// Most suggestions returned for one option.
pub const MAX_SUGGESTIONS: usize = 25;

pub struct Autocomplete {
    app: Arc<App>,
}

impl Autocomplete {
    pub fn new(app: Arc<App>) -> Self {
        Self { app }
    }

    /// Suggestions for an option of kind `source`, given what is typed so far.
    ///
    /// Storage failures produce no suggestions.
    pub async fn suggest(
        &self,
        user_id: &UserId,
        source: Suggest,
        partial: &Invocation,
        prefix: &str,
    ) -> Vec<String> {
        let result = match source {
            Suggest::Character => self.characters(user_id, prefix).await,
            Suggest::Counter => match partial.get("character") {
                Some(character) => self.counters(user_id, character, prefix).await,
                None => Ok(Vec::new()),
            },
            Suggest::Archetype => Ok(filter(Archetype::ALL.iter().map(|a| a.as_str()), prefix)),
            Suggest::Category => Ok(filter(
                CounterCategory::CANONICAL_ORDER.iter().map(|c| c.as_str()),
                prefix,
            )),
            Suggest::Variant => Ok(filter(CounterVariant::ALL.iter().map(|v| v.as_str()), prefix)),
            Suggest::Template => Ok(filter(
                CharacterTemplate::ALL.iter().map(|t| t.as_str()),
                prefix,
            )),
            Suggest::HealthKind => Ok(filter(["normal", "chimerical"], prefix)),
            Suggest::Severity => Ok(filter(["bashing", "lethal", "aggravated"], prefix)),
        };

        result.unwrap_or_else(|e| {
            tracing::debug!(user_id = %user_id, error = %e, "Autocomplete lookup failed");
            Vec::new()
        })
    }

    /// Suggestions for the option being typed at the end of `line`.
    ///
    /// `line` is a partial command whose last token is `key:prefix`, for
    /// example `/counter temp character:Nadia counter:gl`.
    pub async fn complete_line(
        &self,
        user_id: &UserId,
        registry: &CommandRegistry,
        line: &str,
    ) -> Vec<String> {
        let Some((head, key, prefix)) = split_last_option(line) else {
            return Vec::new();
        };
        let Ok(partial) = parse_invocation(head) else {
            return Vec::new();
        };
        let source = registry
            .find(&partial.group, &partial.name)
            .and_then(|spec| spec.find_option(&key))
            .and_then(|option| option.suggest);

        match source {
            Some(source) => self.suggest(user_id, source, &partial, prefix).await,
            None => Vec::new(),
        }
    }

    /// The user's character names starting with `prefix`, ignoring case.
    pub async fn characters(
        &self,
        user_id: &UserId,
        prefix: &str,
    ) -> Result<Vec<String>, SheetError> {
        let names = self.app.use_cases.character.names(user_id).await?;
        Ok(filter_owned(names, prefix))
    }

    /// Counter names on `character` starting with `prefix`, ignoring case.
    pub async fn counters(
        &self,
        user_id: &UserId,
        character: &str,
        prefix: &str,
    ) -> Result<Vec<String>, SheetError> {
        let names = self.app.use_cases.counter.names(user_id, character).await?;
        Ok(filter_owned(names, prefix))
    }
}

/// Split `line` into everything before its last token plus that token's
/// lowercased key and value prefix.
fn split_last_option(line: &str) -> Option<(&str, String, &str)> {
    let start = line
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, c)| i + c.len_utf8())?;
    let (key, prefix) = line[start..].split_once(':')?;
    Some((&line[..start], key.to_lowercase(), prefix.trim_start_matches('"')))
}

fn matches_prefix(candidate: &str, prefix: &str) -> bool {
    candidate
        .to_lowercase()
        .starts_with(&prefix.trim().to_lowercase())
}

fn filter<'a>(candidates: impl IntoIterator<Item = &'a str>, prefix: &str) -> Vec<String> {
    candidates
        .into_iter()
        .filter(|c| matches_prefix(c, prefix))
        .take(MAX_SUGGESTIONS)
        .map(str::to_string)
        .collect()
}

/// Stored names are escaped; suggestions show them as typed.
fn filter_owned(stored: Vec<String>, prefix: &str) -> Vec<String> {
    stored
        .iter()
        .map(String::as_str)
        .map(unescape_markdown)
        .filter(|name| matches_prefix(name, prefix))
        .take(MAX_SUGGESTIONS)
        .collect()
}
