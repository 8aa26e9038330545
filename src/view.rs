//! Derived read-only views over a task snapshot.
//!
//! Everything here is a pure function of its input: filters return
//! order-preserving subsequences, stats are recomputed on demand, and the
//! snapshot is never mutated.

use std::str::FromStr;

use crate::error::Error;
use crate::model::{Task, TaskStat, TaskStatus};

/// Status selection for list views. `All` is the identity filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(TaskStatus),
}

impl FromStr for StatusFilter {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        trimmed.parse().map(StatusFilter::Only)
    }
}

/// Keep tasks matching the status filter, preserving relative order.
pub fn filter_by_status(tasks: &[Task], filter: StatusFilter) -> Vec<Task> {
    match filter {
        StatusFilter::All => tasks.to_vec(),
        StatusFilter::Only(status) => tasks
            .iter()
            .filter(|task| task.status == status)
            .cloned()
            .collect(),
    }
}

/// Case-insensitive substring match against title, description, or any tag.
/// The empty query matches everything. Composes with [`filter_by_status`] by
/// intersection; the two can be applied in either order.
pub fn search_filter(tasks: &[Task], query: &str) -> Vec<Task> {
    if query.is_empty() {
        return tasks.to_vec();
    }
    let needle = query.to_lowercase();
    tasks
        .iter()
        .filter(|task| matches_query(task, &needle))
        .cloned()
        .collect()
}

fn matches_query(task: &Task, needle: &str) -> bool {
    task.title.to_lowercase().contains(needle)
        || task.description.to_lowercase().contains(needle)
        || task.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
}

/// Per-status counts and percentages, one entry per status in the fixed
/// enumeration order, zero counts included.
///
/// Percentages round half away from zero and are computed independently per
/// status; their sum may differ from 100.
pub fn compute_stats(tasks: &[Task]) -> Vec<TaskStat> {
    let total = tasks.len();
    TaskStatus::ALL
        .into_iter()
        .map(|status| {
            let count = tasks.iter().filter(|task| task.status == status).count();
            TaskStat {
                status,
                count,
                percentage: percentage_of(count, total),
            }
        })
        .collect()
}

fn percentage_of(count: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((count as f64 / total as f64) * 100.0).round() as u8
}
