use assert_cmd::Command;
use serde_json::Value;

fn taskflow() -> Command {
    let mut cmd = Command::cargo_bin("taskflow").expect("binary");
    cmd.env_remove("TASKFLOW_AUTHOR");
    cmd.env_remove("TASKFLOW_CONFIG");
    cmd
}

fn json_output(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("json envelope")
}

fn stat_entry<'a>(stats: &'a Value, status: &str) -> &'a Value {
    stats
        .as_array()
        .expect("stats array")
        .iter()
        .find(|entry| entry["status"].as_str() == Some(status))
        .expect("status entry")
}

#[test]
fn stats_reports_the_seeded_board_spread() {
    let value = json_output(taskflow().args(["stats", "--json"]));

    assert_eq!(value["schema_version"].as_str(), Some("taskflow.v1"));
    assert_eq!(value["command"].as_str(), Some("stats"));
    assert_eq!(value["status"].as_str(), Some("success"));

    let data = &value["data"];
    assert_eq!(data["total"].as_u64(), Some(6));

    let stats = &data["stats"];
    assert_eq!(stats.as_array().map(|entries| entries.len()), Some(5));
    assert_eq!(stat_entry(stats, "todo")["count"].as_u64(), Some(2));
    assert_eq!(stat_entry(stats, "todo")["percentage"].as_u64(), Some(33));
    assert_eq!(stat_entry(stats, "inprogress")["count"].as_u64(), Some(1));
    assert_eq!(
        stat_entry(stats, "inprogress")["percentage"].as_u64(),
        Some(17)
    );
    assert_eq!(stat_entry(stats, "review")["count"].as_u64(), Some(1));
    assert_eq!(stat_entry(stats, "completed")["count"].as_u64(), Some(1));
    assert_eq!(stat_entry(stats, "blocked")["count"].as_u64(), Some(1));
}

#[test]
fn empty_board_stats_are_all_zero() {
    let value = json_output(taskflow().args(["--empty", "stats", "--json"]));
    let data = &value["data"];

    assert_eq!(data["total"].as_u64(), Some(0));
    for entry in data["stats"].as_array().expect("stats array") {
        assert_eq!(entry["count"].as_u64(), Some(0));
        assert_eq!(entry["percentage"].as_u64(), Some(0));
    }
}

#[test]
fn new_task_normalizes_tags_and_optional_fields() {
    let value = json_output(taskflow().args([
        "--empty",
        "new",
        "Fix bug",
        "--tags",
        "bug, frontend ,",
        "--assignee",
        "  ",
        "--json",
    ]));

    let task = &value["data"]["task"];
    assert_eq!(task["title"].as_str(), Some("Fix bug"));
    assert_eq!(task["status"].as_str(), Some("todo"));
    assert_eq!(task["priority"].as_str(), Some("medium"));
    let tags: Vec<&str> = task["tags"]
        .as_array()
        .expect("tags")
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(tags, ["bug", "frontend"]);
    assert!(task.get("assignee").is_none() || task["assignee"].is_null());
    assert!(task.get("due_date").is_none() || task["due_date"].is_null());
    assert_eq!(task["comments"].as_array().map(|c| c.len()), Some(0));
}

#[test]
fn new_task_rejects_malformed_due_date() {
    taskflow()
        .args(["--empty", "new", "Dated", "--due", "15/05/2025"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn list_filters_by_status_and_search() {
    let value = json_output(taskflow().args(["list", "--status", "todo", "--json"]));
    assert_eq!(value["data"]["total"].as_u64(), Some(2));

    let value = json_output(taskflow().args(["list", "--search", "API", "--json"]));
    assert_eq!(value["data"]["total"].as_u64(), Some(1));
    assert_eq!(
        value["data"]["tasks"][0]["title"].as_str(),
        Some("Write API documentation")
    );

    // Both filters intersect.
    let value = json_output(taskflow().args([
        "list", "--status", "completed", "--search", "API", "--json",
    ]));
    assert_eq!(value["data"]["total"].as_u64(), Some(0));
}

#[test]
fn edit_replaces_fields_and_keeps_comments() {
    let value = json_output(taskflow().args([
        "edit",
        "landing page",
        "--status",
        "review",
        "--priority",
        "low",
        "--json",
    ]));

    let task = &value["data"]["task"];
    assert_eq!(task["title"].as_str(), Some("Redesign the landing page"));
    assert_eq!(task["status"].as_str(), Some("review"));
    assert_eq!(task["priority"].as_str(), Some("low"));
    // The seeded task carries two comments; an edit must not lose them.
    assert_eq!(task["comments"].as_array().map(|c| c.len()), Some(2));
}

#[test]
fn delete_resolves_title_fragments() {
    let value = json_output(taskflow().args(["delete", "payment", "--json"]));
    assert_eq!(
        value["data"]["title"].as_str(),
        Some("Integrate payment gateway")
    );
}

#[test]
fn ambiguous_reference_is_a_validation_error() {
    // "the" appears in several seeded titles.
    taskflow()
        .args(["delete", "the"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn comment_uses_the_configured_author() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        dir.path().join(".taskflow.toml"),
        "[author]\ndefault = \"Pat Smith\"\n",
    )
    .expect("write config");

    let value = json_output(
        taskflow()
            .current_dir(dir.path())
            .args(["comment", "payment", "Looks good to me", "--json"]),
    );

    let task = &value["data"]["task"];
    let comments = task["comments"].as_array().expect("comments");
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["author"].as_str(), Some("Pat Smith"));
    assert_eq!(comments[0]["text"].as_str(), Some("Looks good to me"));
}

#[test]
fn explicit_author_flag_wins_over_config() {
    let value = json_output(taskflow().args([
        "--author",
        "Robin Lee",
        "comment",
        "navigation",
        "On it",
        "--json",
    ]));

    let comments = value["data"]["task"]["comments"].as_array().expect("comments");
    assert_eq!(comments[0]["author"].as_str(), Some("Robin Lee"));
}

#[test]
fn mutations_append_events_to_a_file_sink() {
    let dir = tempfile::tempdir().expect("tempdir");
    let events_path = dir.path().join("events.jsonl");
    let events_arg = events_path.to_string_lossy().to_string();

    taskflow()
        .args(["--events", &events_arg, "delete", "payment"])
        .assert()
        .success();
    taskflow()
        .args(["--events", &events_arg, "comment", "navigation", "lgtm"])
        .assert()
        .success();

    let contents = std::fs::read_to_string(&events_path).expect("events file");
    let lines: Vec<Value> = contents
        .lines()
        .map(|line| serde_json::from_str(line).expect("event line"))
        .collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["schema_version"].as_str(), Some("taskflow.event.v1"));
    assert_eq!(lines[0]["event"].as_str(), Some("task_deleted"));
    assert_eq!(
        lines[0]["data"]["title"].as_str(),
        Some("Integrate payment gateway")
    );
    assert_eq!(lines[1]["event"].as_str(), Some("task_commented"));
    assert_eq!(lines[1]["data"]["comments"].as_u64(), Some(1));
}

#[test]
fn events_dash_streams_to_stdout_instead_of_the_envelope() {
    let output = taskflow()
        .args(["--events", "-", "--json", "delete", "payment"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8(output).expect("utf8");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 1);
    let event: Value = serde_json::from_str(lines[0]).expect("event line");
    assert_eq!(event["event"].as_str(), Some("task_deleted"));
}

#[test]
fn board_shows_stats_and_list_together() {
    let value = json_output(taskflow().args(["board", "--json"]));
    let data = &value["data"];

    assert_eq!(data["board"].as_str(), Some("TaskFlow"));
    assert_eq!(data["total"].as_u64(), Some(6));
    assert_eq!(data["stats"].as_array().map(|s| s.len()), Some(5));
    assert_eq!(data["tasks"].as_array().map(|t| t.len()), Some(6));

    // Filters shape the list but never the stats.
    let value = json_output(taskflow().args(["board", "--status", "blocked", "--json"]));
    let data = &value["data"];
    assert_eq!(data["tasks"].as_array().map(|t| t.len()), Some(1));
    assert_eq!(data["total"].as_u64(), Some(6));
}
