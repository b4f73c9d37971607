//! Result of a successful sheet command.

/// What a command reports back: a one-line summary plus optional rendered detail.
///
/// A failed command is an `Err(SheetError)` instead; nothing was persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationOutcome {
    pub message: String,
    pub details: Option<String>,
}

impl MutationOutcome {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into()).filter(|d: &String| !d.is_empty());
        self
    }

    /// Message and details joined for display.
    pub fn to_text(&self) -> String {
        match &self.details {
            Some(details) => format!("{}\n{}", self.message, details),
            None => self.message.clone(),
        }
    }
}
