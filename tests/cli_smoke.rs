use assert_cmd::Command;
use predicates::str::contains;

#[test]
fn taskflow_help_works() {
    Command::cargo_bin("taskflow")
        .expect("binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("task board in your terminal"));
}

#[test]
fn subcommand_help_works() {
    let subcommands = [
        "board", "list", "stats", "show", "new", "edit", "delete", "comment", "roster",
    ];

    for cmd in subcommands {
        Command::cargo_bin("taskflow")
            .expect("binary")
            .arg(cmd)
            .arg("--help")
            .assert()
            .success();
    }
}

#[test]
fn unknown_status_filter_exits_with_user_error() {
    Command::cargo_bin("taskflow")
        .expect("binary")
        .args(["list", "--status", "urgent"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("unknown task status"));
}

#[test]
fn empty_title_exits_with_user_error() {
    Command::cargo_bin("taskflow")
        .expect("binary")
        .args(["new", "   "])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("title cannot be empty"));
}

#[test]
fn missing_task_reference_exits_with_user_error_and_hint() {
    Command::cargo_bin("taskflow")
        .expect("binary")
        .args(["--empty", "show", "anything"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("Task not found"))
        .stderr(contains("taskflow list"));
}
