//! taskflow board command: the dashboard view.

use chrono::Utc;
use serde::Serialize;

use crate::cli::{load_board_session, CommonOptions};
use crate::error::Result;
use crate::model::{Task, TaskStat};
use crate::output::{emit_success, HumanOutput};
use crate::view::{compute_stats, filter_by_status, search_filter, StatusFilter};

pub struct BoardOptions {
    pub status: String,
    pub search: Option<String>,
    pub common: CommonOptions,
}

#[derive(Serialize)]
struct BoardOutput {
    board: String,
    total: usize,
    stats: Vec<TaskStat>,
    tasks: Vec<Task>,
}

pub fn run_board(options: BoardOptions) -> Result<()> {
    let session = load_board_session(&options.common)?;
    let filter: StatusFilter = options.status.parse()?;

    let snapshot = session.store.snapshot();
    // Stats always cover the whole board; the filters only shape the list.
    let stats = compute_stats(&snapshot);
    let filtered = filter_by_status(&snapshot, filter);
    let tasks = search_filter(&filtered, options.search.as_deref().unwrap_or(""));

    let mut human = HumanOutput::new(format!("{} board", session.config.board.name));
    human.push_summary("Total", snapshot.len().to_string());
    for stat in &stats {
        human.push_summary(
            stat.status.label(),
            format!("{} ({}%)", stat.count, stat.percentage),
        );
    }
    let now = Utc::now();
    for task in &tasks {
        human.push_detail(super::task::task_line(task, now));
    }
    if tasks.is_empty() {
        human.push_detail("No tasks found".to_string());
    }

    let output = BoardOutput {
        board: session.config.board.name.clone(),
        total: snapshot.len(),
        stats,
        tasks,
    };
    emit_success(options.common.output(false), "board", &output, Some(&human))
}
