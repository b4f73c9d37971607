//! Engine configuration read from the environment.
//!
//! Every value has a default. A value that is set but cannot be parsed is
//! ignored with a warning rather than failing startup.

use sheetkeeper_domain::{UserId, DEFAULT_PRETTY_MAX_PERM};

pub const DEFAULT_DATABASE_PATH: &str = "sheetkeeper.db";
pub const DEFAULT_MAX_CHARACTERS_PER_USER: usize = 10;
pub const DEFAULT_MAX_COUNTERS_PER_CHARACTER: usize = 50;
pub const DEFAULT_MAX_NAME_LENGTH: usize = 100;
pub const DEFAULT_MAX_COMMENT_LENGTH: usize = 300;
pub const DEFAULT_LOCAL_USER_ID: &str = "local";

/// Limits enforced by the use cases before anything reaches the domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_characters_per_user: usize,
    pub max_counters_per_character: usize,
    pub max_name_length: usize,
    pub max_comment_length: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_characters_per_user: DEFAULT_MAX_CHARACTERS_PER_USER,
            max_counters_per_character: DEFAULT_MAX_COUNTERS_PER_CHARACTER,
            max_name_length: DEFAULT_MAX_NAME_LENGTH,
            max_comment_length: DEFAULT_MAX_COMMENT_LENGTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub database_path: String,
    pub limits: Limits,
    /// Largest perm drawn with glyphs in pretty output
    pub pretty_max_perm: u32,
    /// Identity the stdin driver acts as
    pub local_user_id: UserId,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            limits: Limits::default(),
            pretty_max_perm: DEFAULT_PRETTY_MAX_PERM,
            local_user_id: UserId::new(DEFAULT_LOCAL_USER_ID),
        }
    }
}

impl EngineConfig {
    /// Read configuration from process environment variables.
    ///
    /// Supported variables:
    /// - `DATABASE_PATH`
    /// - `MAX_CHARACTERS_PER_USER`, `MAX_COUNTERS_PER_CHARACTER`
    /// - `MAX_NAME_LENGTH`, `MAX_COMMENT_LENGTH`
    /// - `PRETTY_MAX_PERM`
    /// - `LOCAL_USER_ID`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let text = |key: &str, default: String| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
        };

        Self {
            database_path: text("DATABASE_PATH", defaults.database_path),
            limits: Limits {
                max_characters_per_user: parse_or(
                    &lookup,
                    "MAX_CHARACTERS_PER_USER",
                    defaults.limits.max_characters_per_user,
                ),
                max_counters_per_character: parse_or(
                    &lookup,
                    "MAX_COUNTERS_PER_CHARACTER",
                    defaults.limits.max_counters_per_character,
                ),
                max_name_length: parse_or(
                    &lookup,
                    "MAX_NAME_LENGTH",
                    defaults.limits.max_name_length,
                ),
                max_comment_length: parse_or(
                    &lookup,
                    "MAX_COMMENT_LENGTH",
                    defaults.limits.max_comment_length,
                ),
            },
            pretty_max_perm: parse_or(&lookup, "PRETTY_MAX_PERM", defaults.pretty_max_perm),
            local_user_id: UserId::new(text(
                "LOCAL_USER_ID",
                defaults.local_user_id.as_str().to_string(),
            )),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + std::fmt::Display + Copy,
{
    let Some(val) = lookup(key) else {
        return default;
    };
    match val.trim().parse::<T>() {
        Ok(parsed) => {
            tracing::info!(key, value = %parsed, "Applied environment override");
            parsed
        }
        Err(_) => {
            tracing::warn!(key, val = %val, default = %default, "Invalid value, using default");
            default
        }
    }
}
