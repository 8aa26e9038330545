//! taskflow task command implementations.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cli::{emit_event, load_board_session, open_event_sink, CommonOptions};
use crate::draft::{CommentDraft, TaskDraft};
use crate::error::Result;
use crate::events::EventKind;
use crate::model::{is_overdue, Task, TaskStat};
use crate::output::{emit_success, HumanOutput};
use crate::view::{compute_stats, filter_by_status, search_filter, StatusFilter};

pub struct ListOptions {
    pub status: String,
    pub search: Option<String>,
    pub common: CommonOptions,
}

pub struct StatsOptions {
    pub common: CommonOptions,
}

pub struct ShowOptions {
    pub reference: String,
    pub common: CommonOptions,
}

pub struct NewOptions {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due: Option<String>,
    pub tags: Option<String>,
    pub assignee: Option<String>,
    pub common: CommonOptions,
}

pub struct EditOptions {
    pub reference: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due: Option<String>,
    pub no_due: bool,
    pub tags: Option<String>,
    pub assignee: Option<String>,
    pub common: CommonOptions,
}

pub struct DeleteOptions {
    pub reference: String,
    pub common: CommonOptions,
}

pub struct CommentOptions {
    pub reference: String,
    pub text: String,
    pub common: CommonOptions,
}

#[derive(Serialize)]
struct TaskListOutput {
    total: usize,
    tasks: Vec<Task>,
}

#[derive(Serialize)]
struct StatsOutput {
    total: usize,
    stats: Vec<TaskStat>,
}

#[derive(Serialize)]
struct TaskOutput {
    task: Task,
}

#[derive(Serialize)]
struct TaskDeletedOutput {
    id: String,
    title: String,
}

pub fn run_list(options: ListOptions) -> Result<()> {
    let session = load_board_session(&options.common)?;
    let filter: StatusFilter = options.status.parse()?;

    let snapshot = session.store.snapshot();
    let filtered = filter_by_status(&snapshot, filter);
    let tasks = search_filter(&filtered, options.search.as_deref().unwrap_or(""));

    let mut human = HumanOutput::new("Tasks");
    human.push_summary("Total", tasks.len().to_string());
    if let StatusFilter::Only(status) = filter {
        human.push_summary("Status", status.label());
    }
    if let Some(query) = options.search.as_deref().filter(|query| !query.is_empty()) {
        human.push_summary("Search", query);
    }
    let now = Utc::now();
    for task in &tasks {
        human.push_detail(task_line(task, now));
    }

    let output = TaskListOutput {
        total: tasks.len(),
        tasks,
    };
    emit_success(options.common.output(false), "list", &output, Some(&human))
}

pub fn run_stats(options: StatsOptions) -> Result<()> {
    let session = load_board_session(&options.common)?;
    let snapshot = session.store.snapshot();
    let stats = compute_stats(&snapshot);

    let mut human = HumanOutput::new("Task overview");
    human.push_summary("Total", snapshot.len().to_string());
    for stat in &stats {
        human.push_summary(
            stat.status.label(),
            format!("{} ({}%)", stat.count, stat.percentage),
        );
    }

    let output = StatsOutput {
        total: snapshot.len(),
        stats,
    };
    emit_success(options.common.output(false), "stats", &output, Some(&human))
}

pub fn run_show(options: ShowOptions) -> Result<()> {
    let session = load_board_session(&options.common)?;
    let task_id = session.store.resolve(&options.reference)?;
    let task = session.store.get(&task_id)?.clone();

    let mut human = HumanOutput::new(task.title.clone());
    human.push_summary("ID", task.id.clone());
    human.push_summary("Status", task.status.label());
    human.push_summary("Priority", task.priority.label());
    if let Some(due) = task.due_date {
        if is_overdue(&task, Utc::now()) {
            human.push_summary("Due", format!("{due} (overdue)"));
        } else {
            human.push_summary("Due", due.to_string());
        }
    }
    if let Some(assignee) = &task.assignee {
        human.push_summary("Assignee", assignee.clone());
    }
    if !task.tags.is_empty() {
        human.push_summary("Tags", task.tags.join(", "));
    }
    if !task.description.is_empty() {
        human.push_detail(task.description.clone());
    }
    for comment in &task.comments {
        human.push_detail(comment_line(comment));
    }

    let output = TaskOutput { task };
    emit_success(options.common.output(false), "show", &output, Some(&human))
}

pub fn run_new(options: NewOptions) -> Result<()> {
    let mut session = load_board_session(&options.common)?;
    let (mut sink, events_to_stdout) = open_event_sink(options.common.events.as_deref())?;

    let status = match options.status.as_deref() {
        Some(raw) => raw.parse()?,
        None => session.config.tasks.default_status,
    };
    let priority = match options.priority.as_deref() {
        Some(raw) => raw.parse()?,
        None => session.config.tasks.default_priority,
    };

    let task = TaskDraft {
        title: options.title,
        description: options.description.unwrap_or_default(),
        status,
        priority,
        due_date: options.due,
        tags: options.tags.unwrap_or_default(),
        assignee: options.assignee.unwrap_or_default(),
        ..TaskDraft::default()
    }
    .build()?;

    let stored = session.store.create(task).clone();
    let warning = emit_event(
        &mut sink,
        EventKind::TaskCreated,
        &session.author,
        serde_json::json!({ "id": stored.id, "title": stored.title }),
    );

    let mut human = HumanOutput::new("Task created");
    if let Some(warning) = warning {
        human.push_warning(warning);
    }
    human.push_summary("ID", stored.id.clone());
    human.push_summary("Title", stored.title.clone());
    human.push_summary("Status", stored.status.label());
    human.push_summary("Priority", stored.priority.label());
    if let Some(due) = stored.due_date {
        human.push_summary("Due", due.to_string());
    }
    if !stored.tags.is_empty() {
        human.push_summary("Tags", stored.tags.join(", "));
    }

    let output = TaskOutput { task: stored };
    emit_success(
        options.common.output(events_to_stdout),
        "new",
        &output,
        Some(&human),
    )
}

pub fn run_edit(options: EditOptions) -> Result<()> {
    let mut session = load_board_session(&options.common)?;
    let (mut sink, events_to_stdout) = open_event_sink(options.common.events.as_deref())?;

    let task_id = session.store.resolve(&options.reference)?;
    let existing = session.store.get(&task_id)?.clone();

    let status = match options.status.as_deref() {
        Some(raw) => raw.parse()?,
        None => existing.status,
    };
    let priority = match options.priority.as_deref() {
        Some(raw) => raw.parse()?,
        None => existing.priority,
    };
    let due_date = if options.no_due {
        None
    } else {
        options
            .due
            .or_else(|| existing.due_date.map(|date| date.to_string()))
    };
    let tags = options.tags.unwrap_or_else(|| existing.tags.join(", "));
    let assignee = options
        .assignee
        .unwrap_or_else(|| existing.assignee.clone().unwrap_or_default());

    // Full-record replace; comments are carried over untouched.
    let replacement = TaskDraft {
        id: Some(existing.id.clone()),
        title: options.title.unwrap_or_else(|| existing.title.clone()),
        description: options
            .description
            .unwrap_or_else(|| existing.description.clone()),
        status,
        priority,
        due_date,
        tags,
        assignee,
        comments: existing.comments,
    }
    .build()?;

    let stored = session.store.update(&task_id, replacement)?.clone();
    let warning = emit_event(
        &mut sink,
        EventKind::TaskUpdated,
        &session.author,
        serde_json::json!({ "id": stored.id, "title": stored.title }),
    );

    let mut human = HumanOutput::new("Task updated");
    if let Some(warning) = warning {
        human.push_warning(warning);
    }
    human.push_summary("ID", stored.id.clone());
    human.push_summary("Title", stored.title.clone());
    human.push_summary("Status", stored.status.label());
    human.push_summary("Priority", stored.priority.label());

    let output = TaskOutput { task: stored };
    emit_success(
        options.common.output(events_to_stdout),
        "edit",
        &output,
        Some(&human),
    )
}

pub fn run_delete(options: DeleteOptions) -> Result<()> {
    let mut session = load_board_session(&options.common)?;
    let (mut sink, events_to_stdout) = open_event_sink(options.common.events.as_deref())?;

    let task_id = session.store.resolve(&options.reference)?;
    let removed = session.store.delete(&task_id)?;
    let warning = emit_event(
        &mut sink,
        EventKind::TaskDeleted,
        &session.author,
        serde_json::json!({ "id": removed.id, "title": removed.title }),
    );

    let mut human = HumanOutput::new("Task deleted");
    if let Some(warning) = warning {
        human.push_warning(warning);
    }
    human.push_summary("Title", removed.title.clone());
    human.push_summary("Remaining", session.store.len().to_string());

    let output = TaskDeletedOutput {
        id: removed.id,
        title: removed.title,
    };
    emit_success(
        options.common.output(events_to_stdout),
        "delete",
        &output,
        Some(&human),
    )
}

pub fn run_comment(options: CommentOptions) -> Result<()> {
    let mut session = load_board_session(&options.common)?;
    let (mut sink, events_to_stdout) = open_event_sink(options.common.events.as_deref())?;

    let task_id = session.store.resolve(&options.reference)?;
    let comment = CommentDraft {
        text: options.text,
        author: session.author.clone(),
    }
    .build()?;
    let updated = session.store.add_comment(&task_id, comment)?.clone();
    let warning = emit_event(
        &mut sink,
        EventKind::TaskCommented,
        &session.author,
        serde_json::json!({
            "id": updated.id,
            "title": updated.title,
            "comments": updated.comments.len(),
        }),
    );

    let mut human = HumanOutput::new("Comment added");
    if let Some(warning) = warning {
        human.push_warning(warning);
    }
    human.push_summary("Task", updated.title.clone());
    human.push_summary("Author", session.author.clone());
    human.push_summary("Comments", updated.comments.len().to_string());

    let output = TaskOutput { task: updated };
    emit_success(
        options.common.output(events_to_stdout),
        "comment",
        &output,
        Some(&human),
    )
}

/// One-line rendering of a task for list views.
pub(crate) fn task_line(task: &Task, now: DateTime<Utc>) -> String {
    let mut line = format!("[{}/{}] {}", task.status, task.priority, task.title);
    if let Some(assignee) = &task.assignee {
        line.push_str(" - ");
        line.push_str(assignee);
    }
    if let Some(due) = task.due_date {
        if is_overdue(task, now) {
            line.push_str(&format!(" (due {due}, overdue)"));
        } else {
            line.push_str(&format!(" (due {due})"));
        }
    }
    if !task.tags.is_empty() {
        line.push_str(&format!(" [{}]", task.tags.join(", ")));
    }
    line
}

fn comment_line(comment: &crate::model::Comment) -> String {
    format!(
        "{} ({}): {}",
        comment.author,
        comment.created_at.format("%Y-%m-%d %H:%M"),
        comment.text
    )
}
