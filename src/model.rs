//! Task board entities.
//!
//! Statuses and priorities are closed enumerations; filters, stats, and
//! display ordering all rely on the fixed order in [`TaskStatus::ALL`] and
//! [`Priority::rank`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Workflow stage of a task. Exactly one value at any time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Review,
    Completed,
    Blocked,
}

impl TaskStatus {
    /// All statuses in their fixed display and stats order.
    pub const ALL: [TaskStatus; 5] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Review,
        TaskStatus::Completed,
        TaskStatus::Blocked,
    ];

    /// Wire name, as stored and accepted on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "inprogress",
            TaskStatus::Review => "review",
            TaskStatus::Completed => "completed",
            TaskStatus::Blocked => "blocked",
        }
    }

    /// Human-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Review => "Review",
            TaskStatus::Completed => "Completed",
            TaskStatus::Blocked => "Blocked",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        TaskStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                Error::Validation(format!(
                    "unknown task status '{trimmed}' (expected todo|inprogress|review|completed|blocked)"
                ))
            })
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Ordering rank: low sorts before medium before high.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Low => 0,
            Priority::Medium => 1,
            Priority::High => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Priority::ALL
            .into_iter()
            .find(|priority| priority.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                Error::Validation(format!(
                    "unknown priority '{trimmed}' (expected low|medium|high)"
                ))
            })
    }
}

/// A work item on the board.
///
/// `id` is assigned at creation and immutable. `comments` is append-only;
/// edits replace the whole record but carry the comment list over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// A comment on a task. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub text: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// Derived per-status aggregate. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskStat {
    pub status: TaskStatus,
    pub count: usize,
    pub percentage: u8,
}

/// True when the task has a due date strictly before the calendar day of
/// `now`. The time component of `now` is discarded before comparing.
pub fn is_overdue(task: &Task, now: DateTime<Utc>) -> bool {
    match task.due_date {
        Some(due) => due < now.date_naive(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn task_due(due: Option<NaiveDate>) -> Task {
        Task {
            id: "task-1".to_string(),
            title: "Test".to_string(),
            description: String::new(),
            status: TaskStatus::Todo,
            priority: Priority::Medium,
            due_date: due,
            tags: Vec::new(),
            assignee: None,
            comments: Vec::new(),
        }
    }

    #[test]
    fn priority_rank_orders_low_medium_high() {
        assert!(Priority::Low.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::High.rank());
    }

    #[test]
    fn status_round_trips_through_wire_names() {
        for status in TaskStatus::ALL {
            assert_eq!(status.as_str().parse::<TaskStatus>().expect("parse"), status);
        }
        assert!("urgent".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn status_parse_ignores_case_and_whitespace() {
        assert_eq!(
            " InProgress ".parse::<TaskStatus>().expect("parse"),
            TaskStatus::InProgress
        );
    }

    #[test]
    fn status_serializes_as_lowercase_wire_name() {
        let json = serde_json::to_string(&TaskStatus::InProgress).expect("json");
        assert_eq!(json, "\"inprogress\"");
    }

    #[test]
    fn overdue_compares_calendar_days_only() {
        let now = Utc.with_ymd_and_hms(2025, 5, 10, 23, 59, 0).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2025, 5, 9).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 5, 10).unwrap();

        assert!(is_overdue(&task_due(Some(yesterday)), now));
        // Due today is not overdue regardless of the time of day.
        assert!(!is_overdue(&task_due(Some(today)), now));
        assert!(!is_overdue(&task_due(None), now));
    }
}
