//! Draft builders that turn raw field input into well-formed records.
//!
//! Every user-entered value passes through here before it reaches a store.
//! Builders trim, normalize, and reject; they never write to a store
//! themselves.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::model::{Comment, Priority, Task, TaskStatus};

/// Raw task fields as they arrive from input events.
///
/// `id` and `comments` are only supplied on the seed/import path; interactive
/// creation leaves both at their defaults.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
    /// Calendar date as `YYYY-MM-DD`; empty or absent means no due date.
    pub due_date: Option<String>,
    /// Comma-separated tag list, exactly as typed.
    pub tags: String,
    pub assignee: String,
    pub comments: Vec<Comment>,
}

impl TaskDraft {
    /// Validate and normalize into a [`Task`].
    pub fn build(self) -> Result<Task> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(Error::Validation("title cannot be empty".to_string()));
        }

        Ok(Task {
            id: self.id.unwrap_or_else(new_id),
            title: title.to_string(),
            description: self.description,
            status: self.status,
            priority: self.priority,
            due_date: parse_due_date(self.due_date.as_deref())?,
            tags: parse_tags(&self.tags),
            assignee: non_empty(&self.assignee),
            comments: self.comments,
        })
    }
}

/// Raw comment fields. The author comes from the caller; id and timestamp
/// are assigned here at build time.
#[derive(Debug, Clone, Default)]
pub struct CommentDraft {
    pub text: String,
    pub author: String,
}

impl CommentDraft {
    pub fn build(self) -> Result<Comment> {
        let text = self.text.trim();
        if text.is_empty() {
            return Err(Error::Validation("comment text cannot be empty".to_string()));
        }

        Ok(Comment {
            id: new_id(),
            text: text.to_string(),
            author: self.author,
            created_at: Utc::now(),
        })
    }
}

/// Split a raw comma-separated string into tags: entries are trimmed, empty
/// entries dropped, order and duplicates kept.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_due_date(raw: Option<&str>) -> Result<Option<NaiveDate>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| {
            Error::Validation(format!(
                "invalid due date '{trimmed}' (expected YYYY-MM-DD)"
            ))
        })
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Fresh globally-unique identifier for tasks, comments, and roster entries.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_title_is_rejected() {
        let err = TaskDraft {
            title: "   ".to_string(),
            ..TaskDraft::default()
        }
        .build()
        .expect_err("empty title");
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn tags_are_split_trimmed_and_empty_filtered() {
        let task = TaskDraft {
            title: "Fix bug".to_string(),
            tags: "bug, frontend ,".to_string(),
            ..TaskDraft::default()
        }
        .build()
        .expect("valid draft");

        assert_eq!(task.tags, ["bug", "frontend"]);
    }

    #[test]
    fn duplicate_tags_survive_in_order() {
        assert_eq!(parse_tags("a, b, a"), ["a", "b", "a"]);
        assert_eq!(parse_tags(""), Vec::<String>::new());
    }

    #[test]
    fn due_date_normalizes_to_calendar_date() {
        let task = TaskDraft {
            title: "Dated".to_string(),
            due_date: Some("2025-05-15".to_string()),
            ..TaskDraft::default()
        }
        .build()
        .expect("valid draft");

        assert_eq!(
            task.due_date,
            Some(NaiveDate::from_ymd_opt(2025, 5, 15).unwrap())
        );
    }

    #[test]
    fn malformed_due_date_is_rejected() {
        let err = TaskDraft {
            title: "Dated".to_string(),
            due_date: Some("15/05/2025".to_string()),
            ..TaskDraft::default()
        }
        .build()
        .expect_err("bad date");
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn blank_due_date_and_assignee_normalize_to_absent() {
        let task = TaskDraft {
            title: "Bare".to_string(),
            due_date: Some("  ".to_string()),
            assignee: "  ".to_string(),
            ..TaskDraft::default()
        }
        .build()
        .expect("valid draft");

        assert_eq!(task.due_date, None);
        assert_eq!(task.assignee, None);
    }

    #[test]
    fn new_tasks_get_fresh_ids_and_empty_comments() {
        let a = TaskDraft {
            title: "A".to_string(),
            ..TaskDraft::default()
        }
        .build()
        .expect("a");
        let b = TaskDraft {
            title: "B".to_string(),
            ..TaskDraft::default()
        }
        .build()
        .expect("b");

        assert_ne!(a.id, b.id);
        assert!(a.comments.is_empty());
    }

    #[test]
    fn seed_drafts_may_carry_ids_and_comments() {
        let comment = CommentDraft {
            text: "Seeded note".to_string(),
            author: "Pat Smith".to_string(),
        }
        .build()
        .expect("comment");

        let task = TaskDraft {
            id: Some("fixed-id".to_string()),
            title: "Seeded".to_string(),
            comments: vec![comment],
            ..TaskDraft::default()
        }
        .build()
        .expect("valid draft");

        assert_eq!(task.id, "fixed-id");
        assert_eq!(task.comments.len(), 1);
    }

    #[test]
    fn comment_text_is_trimmed_and_required() {
        let comment = CommentDraft {
            text: "  lgtm  ".to_string(),
            author: "Bob".to_string(),
        }
        .build()
        .expect("comment");
        assert_eq!(comment.text, "lgtm");

        let err = CommentDraft {
            text: " ".to_string(),
            author: "Bob".to_string(),
        }
        .build()
        .expect_err("empty text");
        assert!(matches!(err, Error::Validation(_)));
    }
}
