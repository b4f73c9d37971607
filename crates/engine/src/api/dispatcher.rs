//! Routes parsed slash commands to the use cases.

use std::sync::Arc;

use sheetkeeper_domain::{
    Archetype, CharacterTemplate, CounterCategory, CounterVariant, DamageSeverity, HealthKind,
    UserId,
};

use crate::app::App;
use crate::use_cases::{MutationOutcome, NewCounter, SheetError};

use super::commands::{CommandKind, CommandRegistry, CommandSpec};
use super::error_sanitizer::sanitize_sheet_error;
use super::parser::{parse_invocation, Invocation, ParseError};

/// Reply to a command.
///
/// Ephemeral replies are shown only to the user who ran the command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResponse {
    pub content: String,
    pub ephemeral: bool,
}

impl CommandResponse {
    pub fn public(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: false,
        }
    }

    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: true,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("Unknown command {0}; try /help")]
    UnknownCommand(String),

    #[error("{command} has no option '{option}'")]
    UnknownOption { command: String, option: String },

    #[error("{0}")]
    Sheet(#[from] SheetError),
}

pub struct Dispatcher {
    app: Arc<App>,
    registry: CommandRegistry,
}

impl Dispatcher {
    pub fn new(app: Arc<App>, registry: CommandRegistry) -> Self {
        Self { app, registry }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Parse and run one command line.
    pub async fn dispatch_line(&self, user_id: &UserId, line: &str) -> CommandResponse {
        match parse_invocation(line) {
            Ok(invocation) => self.dispatch(user_id, &invocation).await,
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "Rejected command line");
                CommandResponse::ephemeral(e.to_string())
            }
        }
    }

    pub async fn dispatch(&self, user_id: &UserId, invocation: &Invocation) -> CommandResponse {
        let result = match self.lookup(invocation) {
            Ok(spec) => self.run(user_id, spec.kind, invocation).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(response) => response,
            Err(DispatchError::Sheet(e)) if e.is_internal() => {
                CommandResponse::ephemeral(sanitize_sheet_error(&e, &invocation.group))
            }
            Err(e) => {
                tracing::warn!(
                    user_id = %user_id,
                    group = %invocation.group,
                    command = %invocation.name,
                    error = %e,
                    "Rejected command"
                );
                CommandResponse::ephemeral(e.to_string())
            }
        }
    }

    fn lookup(&self, invocation: &Invocation) -> Result<&CommandSpec, DispatchError> {
        let label = format!("/{} {}", invocation.group, invocation.name)
            .trim_end()
            .to_string();
        let spec = self
            .registry
            .find(&invocation.group, &invocation.name)
            .ok_or_else(|| DispatchError::UnknownCommand(label.clone()))?;

        if let Some(option) = invocation
            .option_keys()
            .find(|key| spec.find_option(key).is_none())
        {
            return Err(DispatchError::UnknownOption {
                command: label,
                option: option.to_string(),
            });
        }
        if let Some(missing) = spec
            .options
            .iter()
            .find(|o| o.required && invocation.get(o.name).is_none())
        {
            return Err(ParseError::MissingOption(missing.name.to_string()).into());
        }
        Ok(spec)
    }

    async fn run(
        &self,
        user_id: &UserId,
        kind: CommandKind,
        inv: &Invocation,
    ) -> Result<CommandResponse, DispatchError> {
        let uc = &self.app.use_cases;

        let outcome: MutationOutcome = match kind {
            CommandKind::Help => {
                let help = self.registry.help_text(inv.get("topic"));
                return Ok(CommandResponse::ephemeral(if help.is_empty() {
                    format!("No commands in group {}", inv.get("topic").unwrap_or_default())
                } else {
                    help
                }));
            }

            // === Characters ===
            CommandKind::CharacterCreate => {
                let template = inv.parsed::<CharacterTemplate>("template")?;
                uc.character
                    .create(user_id, inv.require("name")?, template)
                    .await?
            }
            CommandKind::CharacterDelete => {
                uc.character
                    .delete(user_id, inv.require("character")?)
                    .await?
            }
            CommandKind::CharacterList => {
                let outcome = uc.character.list(user_id).await?;
                return Ok(CommandResponse::ephemeral(outcome.to_text()));
            }
            CommandKind::CharacterShow => {
                let pretty = inv.parsed::<bool>("pretty")?.unwrap_or(false);
                uc.character
                    .show(user_id, inv.require("character")?, pretty)
                    .await?
            }

            // === Counters ===
            CommandKind::CounterAdd => {
                let perm = inv.require_int("perm")?;
                let temp = inv.int("temp")?.unwrap_or(perm);
                let mut new = NewCounter::new(inv.require("name")?, temp, perm);
                new.category = inv
                    .parsed::<CounterCategory>("category")?
                    .unwrap_or(new.category);
                new.variant = inv.parsed::<CounterVariant>("type")?.unwrap_or(new.variant);
                new.comment = inv.get("comment").map(str::to_string);
                uc.counter
                    .add_custom(user_id, inv.require("character")?, new)
                    .await?
            }
            CommandKind::CounterAddPredefined => {
                uc.counter
                    .add_predefined(
                        user_id,
                        inv.require("character")?,
                        inv.require_parsed::<Archetype>("type")?,
                        inv.require_int("perm")?,
                        inv.get("name"),
                        inv.get("comment"),
                    )
                    .await?
            }
            CommandKind::CounterTemp => {
                let (character, counter) = counter_target(inv)?;
                uc.counter
                    .set_temp(user_id, character, counter, inv.require_int("value")?)
                    .await?
            }
            CommandKind::CounterPerm => {
                let (character, counter) = counter_target(inv)?;
                uc.counter
                    .set_perm(user_id, character, counter, inv.require_int("value")?)
                    .await?
            }
            CommandKind::CounterBedlam => {
                let (character, counter) = counter_target(inv)?;
                uc.counter
                    .set_bedlam(user_id, character, counter, inv.require_int("value")?)
                    .await?
            }
            CommandKind::CounterSpend => {
                let (character, counter) = counter_target(inv)?;
                let amount = amount(inv)?;
                uc.counter
                    .adjust_temp(user_id, character, counter, -amount)
                    .await?
            }
            CommandKind::CounterGain => {
                let (character, counter) = counter_target(inv)?;
                let amount = amount(inv)?;
                uc.counter
                    .adjust_temp(user_id, character, counter, amount)
                    .await?
            }
            CommandKind::CounterComment => {
                let (character, counter) = counter_target(inv)?;
                uc.counter
                    .set_comment(user_id, character, counter, inv.get("text"))
                    .await?
            }
            CommandKind::CounterRename => {
                let (character, counter) = counter_target(inv)?;
                uc.counter
                    .rename(user_id, character, counter, inv.require("name")?)
                    .await?
            }
            CommandKind::CounterDelete => {
                let (character, counter) = counter_target(inv)?;
                uc.counter.delete(user_id, character, counter).await?
            }

            // === Health ===
            CommandKind::HealthAdd => {
                uc.health
                    .add_track(user_id, inv.require("character")?, health_kind(inv)?, None)
                    .await?
            }
            CommandKind::HealthRemove => {
                uc.health
                    .remove_track(user_id, inv.require("character")?, health_kind(inv)?)
                    .await?
            }
            CommandKind::HealthDamage => {
                uc.health
                    .damage(
                        user_id,
                        inv.require("character")?,
                        health_kind(inv)?,
                        inv.require_int("levels")?,
                        inv.require_parsed::<DamageSeverity>("severity")?,
                    )
                    .await?
            }
            CommandKind::HealthHeal => {
                uc.health
                    .heal(
                        user_id,
                        inv.require("character")?,
                        health_kind(inv)?,
                        inv.require_int("levels")?,
                    )
                    .await?
            }
            CommandKind::HealthShow => uc.health.show(user_id, inv.require("character")?).await?,
        };

        Ok(CommandResponse::public(outcome.to_text()))
    }
}

fn counter_target(inv: &Invocation) -> Result<(&str, &str), ParseError> {
    Ok((inv.require("character")?, inv.require("counter")?))
}

fn health_kind(inv: &Invocation) -> Result<HealthKind, ParseError> {
    Ok(inv.parsed::<HealthKind>("kind")?.unwrap_or_default())
}

fn amount(inv: &Invocation) -> Result<i64, ParseError> {
    let amount = inv.int("amount")?.unwrap_or(1);
    if amount < 0 {
        return Err(ParseError::InvalidValue {
            option: "amount".to_string(),
            message: "must not be negative".to_string(),
        });
    }
    Ok(amount)
}
