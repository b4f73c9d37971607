//! Slash-command registry.
//!
//! Built once at startup by [`CommandRegistry::standard`]; nothing registers
//! itself implicitly.

use std::fmt::Write as _;

/// Every command the dispatcher knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Help,
    CharacterCreate,
    CharacterDelete,
    CharacterList,
    CharacterShow,
    CounterAdd,
    CounterAddPredefined,
    CounterTemp,
    CounterPerm,
    CounterBedlam,
    CounterSpend,
    CounterGain,
    CounterComment,
    CounterRename,
    CounterDelete,
    HealthAdd,
    HealthRemove,
    HealthDamage,
    HealthHeal,
    HealthShow,
}

/// Where suggestions for an option's value come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suggest {
    Character,
    /// Counters of the character named by the `character` option
    Counter,
    Archetype,
    Category,
    Variant,
    Template,
    HealthKind,
    Severity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
    pub suggest: Option<Suggest>,
}

impl OptionSpec {
    fn required(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            required: true,
            suggest: None,
        }
    }

    fn optional(name: &'static str, description: &'static str) -> Self {
        Self {
            required: false,
            ..Self::required(name, description)
        }
    }

    fn suggest(mut self, source: Suggest) -> Self {
        self.suggest = Some(source);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub group: &'static str,
    /// Empty for single-word commands
    pub name: &'static str,
    pub description: &'static str,
    pub kind: CommandKind,
    pub options: Vec<OptionSpec>,
}

impl CommandSpec {
    fn new(
        group: &'static str,
        name: &'static str,
        kind: CommandKind,
        description: &'static str,
    ) -> Self {
        Self {
            group,
            name,
            description,
            kind,
            options: Vec::new(),
        }
    }

    fn option(mut self, option: OptionSpec) -> Self {
        self.options.push(option);
        self
    }

    pub fn find_option(&self, name: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.name == name)
    }

    /// `/group name` as typed by a user.
    pub fn usage(&self) -> String {
        let mut usage = format!("/{}", self.group);
        if !self.name.is_empty() {
            let _ = write!(usage, " {}", self.name);
        }
        for option in &self.options {
            if option.required {
                let _ = write!(usage, " {}:…", option.name);
            } else {
                let _ = write!(usage, " [{}:…]", option.name);
            }
        }
        usage
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Command /{group} {name} is registered twice")]
    Duplicate {
        group: &'static str,
        name: &'static str,
    },
}

/// Table of `(group, name)` to command.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: Vec<CommandSpec>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, spec: CommandSpec) -> Result<(), RegistryError> {
        if self.find(spec.group, spec.name).is_some() {
            return Err(RegistryError::Duplicate {
                group: spec.group,
                name: spec.name,
            });
        }
        self.commands.push(spec);
        Ok(())
    }

    pub fn find(&self, group: &str, name: &str) -> Option<&CommandSpec> {
        self.commands
            .iter()
            .find(|c| c.group == group && c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandSpec> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Usage line and description of every command in `group`, or of all
    /// commands when `group` is `None`.
    pub fn help_text(&self, group: Option<&str>) -> String {
        self.commands
            .iter()
            .filter(|c| group.map_or(true, |g| c.group == g))
            .map(|c| format!("`{}` {}", c.usage(), c.description))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The full command set.
    pub fn standard() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for spec in standard_commands() {
            registry.register(spec)?;
        }
        Ok(registry)
    }
}

fn character() -> OptionSpec {
    OptionSpec::required("character", "Character name").suggest(Suggest::Character)
}

fn counter() -> OptionSpec {
    OptionSpec::required("counter", "Counter name").suggest(Suggest::Counter)
}

fn value(description: &'static str) -> OptionSpec {
    OptionSpec::required("value", description)
}

fn health_kind() -> OptionSpec {
    OptionSpec::optional("kind", "Health track (normal or chimerical; default normal)")
        .suggest(Suggest::HealthKind)
}

fn standard_commands() -> Vec<CommandSpec> {
    use CommandKind as K;

    vec![
        CommandSpec::new("help", "", K::Help, "List commands")
            .option(OptionSpec::optional("topic", "Only show one command group")),
        // Characters
        CommandSpec::new("character", "create", K::CharacterCreate, "Create a character")
            .option(OptionSpec::required("name", "Character name"))
            .option(
                OptionSpec::optional("template", "Seed counters for a game line")
                    .suggest(Suggest::Template),
            ),
        CommandSpec::new("character", "delete", K::CharacterDelete, "Delete a character")
            .option(character()),
        CommandSpec::new("character", "list", K::CharacterList, "List your characters"),
        CommandSpec::new("character", "show", K::CharacterShow, "Show a character sheet")
            .option(character())
            .option(OptionSpec::optional(
                "pretty",
                "Draw counters as glyph rows (true or false)",
            )),
        // Counters
        CommandSpec::new("counter", "add", K::CounterAdd, "Add a custom counter")
            .option(character())
            .option(OptionSpec::required("name", "Counter name"))
            .option(OptionSpec::required("perm", "Permanent value"))
            .option(OptionSpec::optional("temp", "Temporary value (default perm)"))
            .option(
                OptionSpec::optional("category", "Group shown on the sheet")
                    .suggest(Suggest::Category),
            )
            .option(
                OptionSpec::optional("type", "How temp and perm relate")
                    .suggest(Suggest::Variant),
            )
            .option(OptionSpec::optional("comment", "Note shown under the counter")),
        CommandSpec::new(
            "counter",
            "predefined",
            K::CounterAddPredefined,
            "Add a counter from the catalog",
        )
        .option(character())
        .option(OptionSpec::required("type", "Catalog entry").suggest(Suggest::Archetype))
        .option(OptionSpec::required("perm", "Permanent value"))
        .option(OptionSpec::optional("name", "Counter name (required for items and projects)"))
        .option(OptionSpec::optional("comment", "Note shown under the counter")),
        CommandSpec::new("counter", "temp", K::CounterTemp, "Set a counter's temporary value")
            .option(character())
            .option(counter())
            .option(value("New temporary value")),
        CommandSpec::new("counter", "perm", K::CounterPerm, "Set a counter's permanent value")
            .option(character())
            .option(counter())
            .option(value("New permanent value")),
        CommandSpec::new("counter", "bedlam", K::CounterBedlam, "Set a counter's bedlam")
            .option(character())
            .option(counter())
            .option(value("New bedlam value")),
        CommandSpec::new("counter", "spend", K::CounterSpend, "Spend temporary points")
            .option(character())
            .option(counter())
            .option(OptionSpec::optional("amount", "Points to spend (default 1)")),
        CommandSpec::new("counter", "gain", K::CounterGain, "Regain temporary points")
            .option(character())
            .option(counter())
            .option(OptionSpec::optional("amount", "Points to regain (default 1)")),
        CommandSpec::new("counter", "comment", K::CounterComment, "Set or clear a counter's note")
            .option(character())
            .option(counter())
            .option(OptionSpec::optional("text", "New note; omit to clear")),
        CommandSpec::new("counter", "rename", K::CounterRename, "Rename a counter")
            .option(character())
            .option(counter())
            .option(OptionSpec::required("name", "New counter name")),
        CommandSpec::new("counter", "delete", K::CounterDelete, "Delete a counter")
            .option(character())
            .option(counter()),
        // Health
        CommandSpec::new("health", "add", K::HealthAdd, "Add a health track")
            .option(character())
            .option(health_kind()),
        CommandSpec::new("health", "remove", K::HealthRemove, "Remove a health track")
            .option(character())
            .option(health_kind()),
        CommandSpec::new("health", "damage", K::HealthDamage, "Take damage")
            .option(character())
            .option(OptionSpec::required("levels", "Levels of damage"))
            .option(
                OptionSpec::required("severity", "bashing, lethal or aggravated")
                    .suggest(Suggest::Severity),
            )
            .option(health_kind()),
        CommandSpec::new("health", "heal", K::HealthHeal, "Heal damage")
            .option(character())
            .option(OptionSpec::required("levels", "Levels to heal"))
            .option(health_kind()),
        CommandSpec::new("health", "show", K::HealthShow, "Show health tracks")
            .option(character()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_has_unique_commands() {
        let registry = CommandRegistry::standard().unwrap();
        assert_eq!(registry.len(), 20);
        assert_eq!(
            registry.find("counter", "temp").map(|c| c.kind),
            Some(CommandKind::CounterTemp)
        );
        assert_eq!(registry.find("help", "").map(|c| c.kind), Some(CommandKind::Help));
        assert!(registry.find("counter", "explode").is_none());
    }

    #[test]
    fn duplicates_are_rejected() {
        let mut registry = CommandRegistry::new();
        registry
            .register(CommandSpec::new("health", "show", CommandKind::HealthShow, "a"))
            .unwrap();
        let err = registry
            .register(CommandSpec::new("health", "show", CommandKind::HealthShow, "b"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Command /health show is registered twice");
    }

    #[test]
    fn usage_marks_optional_options() {
        let registry = CommandRegistry::standard().unwrap();
        let spec = registry.find("counter", "comment").unwrap();
        assert_eq!(spec.usage(), "/counter comment character:… counter:… [text:…]");
    }

    #[test]
    fn help_filters_by_group() {
        let registry = CommandRegistry::standard().unwrap();
        let help = registry.help_text(Some("health"));
        assert_eq!(help.lines().count(), 5);
        assert!(help.lines().all(|l| l.starts_with("`/health ")));
    }

    #[test]
    fn counter_options_suggest_from_the_named_character() {
        let registry = CommandRegistry::standard().unwrap();
        let spec = registry.find("counter", "spend").unwrap();
        assert_eq!(
            spec.find_option("counter").and_then(|o| o.suggest),
            Some(Suggest::Counter)
        );
        assert_eq!(
            spec.find_option("character").and_then(|o| o.suggest),
            Some(Suggest::Character)
        );
    }
}
