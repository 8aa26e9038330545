//! In-memory task collection for one session scope.
//!
//! The store owns the authoritative ordered sequence of tasks and applies
//! mutations synchronously. Records reaching the store have already passed
//! the draft builders; the store checks identity, never field contents.

use crate::error::{Error, Result};
use crate::model::{Comment, Task};

/// Owns the task collection for a session. Constructed per scope and passed
/// explicitly; there is no ambient global board.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    /// An empty board.
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Start a session from pre-built records, preserving the given order.
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Insert a new task at the front of the collection (most recent first)
    /// and return the stored record.
    pub fn create(&mut self, task: Task) -> &Task {
        self.tasks.insert(0, task);
        &self.tasks[0]
    }

    /// Replace the task whose id matches `task_id`, keeping its position.
    ///
    /// This is a full-record replace, not a patch: callers carry over any
    /// field they do not mean to change, comments included.
    pub fn update(&mut self, task_id: &str, task: Task) -> Result<&Task> {
        let slot = self.position(task_id)?;
        self.tasks[slot] = task;
        Ok(&self.tasks[slot])
    }

    /// Remove the task whose id matches and return the removed record, so
    /// the caller still has its title for a confirmation message.
    pub fn delete(&mut self, task_id: &str) -> Result<Task> {
        let slot = self.position(task_id)?;
        Ok(self.tasks.remove(slot))
    }

    /// Append a comment to the task's comment sequence and return the
    /// updated task. Comment id and timestamp are assigned by the draft
    /// builder before this call, never here.
    pub fn add_comment(&mut self, task_id: &str, comment: Comment) -> Result<&Task> {
        let slot = self.position(task_id)?;
        self.tasks[slot].comments.push(comment);
        Ok(&self.tasks[slot])
    }

    /// Look up a single task by exact id.
    pub fn get(&self, task_id: &str) -> Result<&Task> {
        self.tasks
            .iter()
            .find(|task| task.id == task_id)
            .ok_or_else(|| Error::TaskNotFound(task_id.to_string()))
    }

    /// Resolve a user-supplied reference to a task id.
    ///
    /// An exact id match wins; otherwise the reference is matched as a
    /// case-insensitive substring of task titles and must identify exactly
    /// one task. Ambiguous references fail listing the candidates.
    pub fn resolve(&self, reference: &str) -> Result<String> {
        let trimmed = reference.trim();
        if trimmed.is_empty() {
            return Err(Error::Validation("task reference cannot be empty".to_string()));
        }

        if let Some(task) = self.tasks.iter().find(|task| task.id == trimmed) {
            return Ok(task.id.clone());
        }

        let needle = trimmed.to_lowercase();
        let matches: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|task| task.title.to_lowercase().contains(&needle))
            .collect();

        match matches.as_slice() {
            [] => Err(Error::TaskNotFound(trimmed.to_string())),
            [task] => Ok(task.id.clone()),
            many => Err(Error::Validation(format!(
                "ambiguous task reference '{}': {}",
                trimmed,
                many.iter()
                    .map(|task| task.title.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }

    /// Stable copy of the collection as of this call. The returned sequence
    /// does not alias internal storage.
    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn position(&self, task_id: &str) -> Result<usize> {
        self.tasks
            .iter()
            .position(|task| task.id == task_id)
            .ok_or_else(|| Error::TaskNotFound(task_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::TaskDraft;
    use crate::model::{Priority, TaskStatus};

    fn build_task(title: &str) -> Task {
        TaskDraft {
            title: title.to_string(),
            ..TaskDraft::default()
        }
        .build()
        .expect("valid draft")
    }

    #[test]
    fn create_prepends_most_recent_first() {
        let mut store = TaskStore::new();
        let first = build_task("First");
        let second = build_task("Second");
        store.create(first.clone());
        store.create(second.clone());

        let snapshot = store.snapshot();
        assert_eq!(snapshot[0].id, second.id);
        assert_eq!(snapshot[1].id, first.id);
    }

    #[test]
    fn snapshot_length_tracks_creates_minus_deletes() {
        let mut store = TaskStore::new();
        let a = build_task("A");
        let b = build_task("B");
        let c = build_task("C");
        let b_id = b.id.clone();
        store.create(a);
        store.create(b);
        store.create(c);
        store.delete(&b_id).expect("delete");

        assert_eq!(store.snapshot().len(), 2);
    }

    #[test]
    fn update_replaces_in_place() {
        let mut store = TaskStore::new();
        store.create(build_task("Old title"));
        store.create(build_task("Other"));
        let target_id = store.snapshot()[1].id.clone();

        let mut replacement = store.get(&target_id).expect("get").clone();
        replacement.title = "New title".to_string();
        replacement.priority = Priority::High;
        store.update(&target_id, replacement).expect("update");

        let snapshot = store.snapshot();
        assert_eq!(snapshot[1].id, target_id);
        assert_eq!(snapshot[1].title, "New title");
        assert_eq!(snapshot[1].priority, Priority::High);
    }

    #[test]
    fn update_missing_id_fails_and_leaves_store_unchanged() {
        let mut store = TaskStore::new();
        store.create(build_task("Only"));
        let before = store.snapshot();

        let err = store
            .update("missing-id", build_task("Replacement"))
            .expect_err("missing id");
        assert!(matches!(err, Error::TaskNotFound(_)));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn delete_missing_id_is_an_error_not_a_no_op() {
        let mut store = TaskStore::new();
        let err = store.delete("missing-id").expect_err("missing id");
        assert!(matches!(err, Error::TaskNotFound(_)));
    }

    #[test]
    fn first_comment_lands_last_in_order() {
        let mut store = TaskStore::new();
        let task = build_task("Commented");
        let id = task.id.clone();
        store.create(task);

        let comment = crate::draft::CommentDraft {
            text: "lgtm".to_string(),
            author: "Bob".to_string(),
        }
        .build()
        .expect("comment");
        let updated = store.add_comment(&id, comment).expect("add comment");

        assert_eq!(updated.comments.len(), 1);
        assert_eq!(updated.comments.last().map(|c| c.text.as_str()), Some("lgtm"));
    }

    #[test]
    fn snapshot_is_stable_between_mutations() {
        let mut store = TaskStore::new();
        store.create(build_task("One"));
        assert_eq!(store.snapshot(), store.snapshot());

        // Mutating a snapshot must not leak back into the store.
        let mut snapshot = store.snapshot();
        snapshot[0].status = TaskStatus::Blocked;
        assert_eq!(store.snapshot()[0].status, TaskStatus::Todo);
    }

    #[test]
    fn resolve_accepts_id_and_unique_title_fragment() {
        let mut store = TaskStore::new();
        store.create(build_task("Fix navigation menu bug"));
        store.create(build_task("Write API documentation"));
        let nav_id = store.snapshot()[1].id.clone();

        assert_eq!(store.resolve(&nav_id).expect("by id"), nav_id);
        assert_eq!(store.resolve("navigation").expect("by fragment"), nav_id);
        assert!(matches!(
            store.resolve("payment"),
            Err(Error::TaskNotFound(_))
        ));
    }

    #[test]
    fn resolve_rejects_ambiguous_fragments() {
        let mut store = TaskStore::new();
        store.create(build_task("Fix login bug"));
        store.create(build_task("Fix logout bug"));

        let err = store.resolve("bug").expect_err("ambiguous");
        assert!(matches!(err, Error::Validation(_)));
    }
}
