//! Error sanitization for user-facing replies.
//!
//! Storage failures can carry paths and driver messages. They are logged in
//! full and replaced with a generic reply.

use crate::use_cases::SheetError;

/// Common error messages for user consumption.
pub mod messages {
    pub const STORAGE_UNAVAILABLE: &str = "Your sheets could not be reached - please try again";
}

/// Reply text for an internal error raised while running a `context` command.
pub fn sanitize_sheet_error(error: &SheetError, context: &str) -> String {
    tracing::error!(
        error = %error,
        context = context,
        "Internal error while running command"
    );

    messages::STORAGE_UNAVAILABLE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::RepoError;

    #[test]
    fn repo_details_do_not_leak() {
        let error = SheetError::Repo(RepoError::Database {
            operation: "character.save",
            message: "database is locked".to_string(),
        });

        let reply = sanitize_sheet_error(&error, "counter");
        assert_eq!(reply, messages::STORAGE_UNAVAILABLE);
        assert!(!reply.contains("locked"));
    }
}
