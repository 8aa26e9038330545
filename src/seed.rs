//! The sample board and roster a fresh session starts from.
//!
//! Six tasks spanning all five statuses plus a small user roster, built
//! through the draft builders so seeds obey the same invariants as
//! interactive input. Sessions start from this data unless configured or
//! asked to start empty.

use chrono::{DateTime, Utc};

use crate::draft::{new_id, TaskDraft};
use crate::error::{Error, Result};
use crate::model::{Comment, Priority, Task, TaskStatus};
use crate::roster::{GroupDraft, RosterStore, User, UserDraft, UserRole};
use crate::store::TaskStore;

/// A task store seeded with the sample tasks in their authored order.
pub fn sample_board() -> Result<TaskStore> {
    Ok(TaskStore::with_tasks(sample_tasks()?))
}

pub fn sample_tasks() -> Result<Vec<Task>> {
    Ok(vec![
        TaskDraft {
            title: "Redesign the landing page".to_string(),
            description: "Update the landing page with new branding guidelines and improve the user journey.".to_string(),
            status: TaskStatus::InProgress,
            priority: Priority::High,
            due_date: Some("2025-05-15".to_string()),
            tags: "design, website, branding".to_string(),
            assignee: "Sarah Johnson".to_string(),
            comments: vec![
                seed_comment(
                    "I've started working on the wireframes, will share them by tomorrow.",
                    "Sarah Johnson",
                    "2025-05-08T14:22:00Z",
                )?,
                seed_comment(
                    "Great progress so far! Let me know if you need any design assets.",
                    "Mike Chen",
                    "2025-05-09T09:15:00Z",
                )?,
            ],
            ..TaskDraft::default()
        }
        .build()?,
        TaskDraft {
            title: "Fix navigation menu bug".to_string(),
            description: "The dropdown menu is not working correctly on mobile devices.".to_string(),
            status: TaskStatus::Todo,
            priority: Priority::Medium,
            due_date: Some("2025-05-10".to_string()),
            tags: "bug, frontend, mobile".to_string(),
            assignee: "Mike Chen".to_string(),
            ..TaskDraft::default()
        }
        .build()?,
        TaskDraft {
            title: "Implement authentication system".to_string(),
            description: "Add user login, registration, and password reset functionality.".to_string(),
            status: TaskStatus::Review,
            priority: Priority::High,
            due_date: Some("2025-05-05".to_string()),
            tags: "security, backend, user".to_string(),
            assignee: "Alex Rodriguez".to_string(),
            comments: vec![seed_comment(
                "The basic authentication flow is complete. Waiting for security review.",
                "Alex Rodriguez",
                "2025-05-04T16:30:00Z",
            )?],
            ..TaskDraft::default()
        }
        .build()?,
        TaskDraft {
            title: "Optimize database queries".to_string(),
            description: "Improve the performance of the main dashboard queries.".to_string(),
            status: TaskStatus::Completed,
            priority: Priority::Medium,
            due_date: Some("2025-04-30".to_string()),
            tags: "performance, database, optimization".to_string(),
            assignee: "Jamie Taylor".to_string(),
            comments: vec![
                seed_comment(
                    "I've added indexes to the most frequently accessed columns.",
                    "Jamie Taylor",
                    "2025-04-28T10:45:00Z",
                )?,
                seed_comment(
                    "The dashboard loads 40% faster now. Great job!",
                    "Pat Smith",
                    "2025-04-30T11:20:00Z",
                )?,
            ],
            ..TaskDraft::default()
        }
        .build()?,
        TaskDraft {
            title: "Write API documentation".to_string(),
            description: "Create comprehensive documentation for the new API endpoints.".to_string(),
            status: TaskStatus::Blocked,
            priority: Priority::Low,
            due_date: Some("2025-05-20".to_string()),
            tags: "documentation, api".to_string(),
            assignee: "Pat Smith".to_string(),
            comments: vec![seed_comment(
                "Blocked until the API spec is finalized.",
                "Pat Smith",
                "2025-05-05T09:10:00Z",
            )?],
            ..TaskDraft::default()
        }
        .build()?,
        TaskDraft {
            title: "Integrate payment gateway".to_string(),
            description: "Connect and test the new payment processing system.".to_string(),
            status: TaskStatus::Todo,
            priority: Priority::High,
            due_date: Some("2025-05-25".to_string()),
            tags: "payments, integration, testing".to_string(),
            assignee: "Robin Lee".to_string(),
            ..TaskDraft::default()
        }
        .build()?,
    ])
}

/// A roster seeded with the sample users and groups.
pub fn sample_roster() -> Result<RosterStore> {
    let mut roster = RosterStore::new();

    let admin = roster
        .create_user(seed_user("admin@example.com", "Admin", "User", UserRole::SuperUser)?)
        .id
        .clone();
    let manager = roster
        .create_user(seed_user("manager@example.com", "Manager", "User", UserRole::Manager)?)
        .id
        .clone();
    let executive = roster
        .create_user(seed_user(
            "executive@example.com",
            "Executive",
            "User",
            UserRole::Executive,
        )?)
        .id
        .clone();

    roster.create_group(
        GroupDraft {
            name: "Leadership".to_string(),
            description: "Leadership team including executives and management".to_string(),
            members: vec![admin, executive.clone()],
        }
        .build()?,
    )?;
    roster.create_group(
        GroupDraft {
            name: "Operations".to_string(),
            description: "Team responsible for day-to-day operations".to_string(),
            members: vec![manager, executive],
        }
        .build()?,
    )?;

    Ok(roster)
}

fn seed_user(email: &str, first: &str, last: &str, role: UserRole) -> Result<User> {
    UserDraft {
        email: email.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        role,
        active: true,
    }
    .build()
}

fn seed_comment(text: &str, author: &str, created_at: &str) -> Result<Comment> {
    let created_at = created_at.parse::<DateTime<Utc>>().map_err(|err| {
        Error::Validation(format!("invalid seed timestamp '{created_at}': {err}"))
    })?;
    Ok(Comment {
        id: new_id(),
        text: text.to_string(),
        author: author.to_string(),
        created_at,
    })
}
