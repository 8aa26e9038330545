//! Author identity for comments and roster changes.
//!
//! Resolution order:
//! 1) CLI --author (explicit)
//! 2) TASKFLOW_AUTHOR environment variable
//! 3) Config default (author.default)

use crate::config::Config;

pub const AUTHOR_ENV: &str = "TASKFLOW_AUTHOR";

/// Resolve the current author using CLI, environment, and config.
pub fn resolve_author(config: &Config, cli_author: Option<&str>) -> String {
    if let Some(author) = non_empty(cli_author) {
        return author.to_string();
    }

    if let Ok(env_author) = std::env::var(AUTHOR_ENV) {
        if let Some(author) = non_empty(Some(env_author.as_str())) {
            return author.to_string();
        }
    }

    config.author.default.clone()
}

fn non_empty(input: Option<&str>) -> Option<&str> {
    input.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    })
}
