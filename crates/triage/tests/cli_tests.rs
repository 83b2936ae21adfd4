//! Integration tests for the triage CLI binary.
//!
//! Each test runs against a fresh temp directory so the default `.triage/`
//! data directory is isolated per test.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn triage_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("triage"));
    cmd.env_remove("TRIAGE_ACTOR").env_remove("TRIAGE_DATA_DIR");
    cmd
}

fn setup() -> TempDir {
    let temp = TempDir::new().unwrap();
    triage_cmd()
        .current_dir(temp.path())
        .arg("init")
        .assert()
        .success();
    temp
}

/// Create a board and return its id
fn create_board(temp: &TempDir) -> String {
    let output = triage_cmd()
        .current_dir(temp.path())
        .args(["board", "create", "Dev Board", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    json["id"].as_str().unwrap().to_string()
}

/// Create a ticket and return its id
fn create_ticket(temp: &TempDir, board_id: &str, title: &str, extra: &[&str]) -> String {
    let mut args = vec!["ticket", "create", board_id, title, "--json"];
    args.extend_from_slice(extra);
    let output = triage_cmd()
        .current_dir(temp.path())
        .args(&args)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "ticket create failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    json["id"].as_str().unwrap().to_string()
}

#[test]
fn test_init_creates_data_directory() {
    let temp = TempDir::new().unwrap();
    triage_cmd()
        .current_dir(temp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized"));
    assert!(temp.path().join(".triage/data").exists());
}

#[test]
fn test_data_dir_env_override() {
    let temp = TempDir::new().unwrap();
    triage_cmd()
        .current_dir(temp.path())
        .env("TRIAGE_DATA_DIR", "custom-dir")
        .arg("init")
        .assert()
        .success();
    assert!(temp.path().join("custom-dir/data").exists());
    assert!(!temp.path().join(".triage").exists());
}

#[test]
fn test_create_and_show_ticket() {
    let temp = setup();
    let board_id = create_board(&temp);
    let ticket_id = create_ticket(
        &temp,
        &board_id,
        "Fix login",
        &["--importance", "4", "--urgency", "7"],
    );

    triage_cmd()
        .current_dir(temp.path())
        .args(["ticket", "show", &ticket_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fix login"))
        .stdout(predicate::str::contains("Score: 28"));
}

#[test]
fn test_show_nonexistent_ticket_exits_3() {
    let temp = setup();
    triage_cmd()
        .current_dir(temp.path())
        .args(["ticket", "show", "no-such-id"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_out_of_range_importance_exits_4() {
    let temp = setup();
    let board_id = create_board(&temp);

    triage_cmd()
        .current_dir(temp.path())
        .args([
            "ticket", "create", &board_id, "Too big", "--importance", "11",
        ])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains(
            "Importance must be between 1 and 10.",
        ));
}

#[test]
fn test_orphan_bug_exits_4() {
    let temp = setup();
    let board_id = create_board(&temp);

    triage_cmd()
        .current_dir(temp.path())
        .args(["ticket", "create", &board_id, "Orphan", "--type", "bug"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains(
            "A bug must have a ticket as parent.",
        ));
}

#[test]
fn test_invalid_status_token_exits_2() {
    let temp = setup();
    let board_id = create_board(&temp);
    let ticket_id = create_ticket(&temp, &board_id, "T", &[]);

    triage_cmd()
        .current_dir(temp.path())
        .args(["ticket", "move", &ticket_id, "doing"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid status"));
}

#[test]
fn test_reposition_denied_for_non_owner_exits_5() {
    let temp = setup();
    let output = triage_cmd()
        .current_dir(temp.path())
        .args([
            "board", "create", "Owned", "--own", "--actor", "alice", "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let board_id = json["id"].as_str().unwrap().to_string();

    let ticket_id = create_ticket(&temp, &board_id, "Guarded", &[]);

    triage_cmd()
        .current_dir(temp.path())
        .args([
            "ticket", "reposition", &ticket_id, "5", "5", "--actor", "bob",
        ])
        .assert()
        .failure()
        .code(5)
        .stderr(predicate::str::contains("Permission denied"));

    triage_cmd()
        .current_dir(temp.path())
        .args([
            "ticket", "reposition", &ticket_id, "5", "5", "--actor", "alice",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("score 25"));
}

#[test]
fn test_update_and_activity_trail() {
    let temp = setup();
    let board_id = create_board(&temp);
    let ticket_id = create_ticket(&temp, &board_id, "Trail", &[]);

    triage_cmd()
        .current_dir(temp.path())
        .args([
            "ticket", "update", &ticket_id, "--status", "done", "--actor", "carol",
        ])
        .assert()
        .success();

    triage_cmd()
        .current_dir(temp.path())
        .args(["activity", "ticket", &ticket_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("status: todo → done"))
        .stdout(predicate::str::contains("Created ticket Trail"))
        .stdout(predicate::str::contains("carol"));
}

#[test]
fn test_actor_env_fallback() {
    let temp = setup();
    let board_id = create_board(&temp);
    let ticket_id = create_ticket(&temp, &board_id, "Env actor", &[]);

    triage_cmd()
        .current_dir(temp.path())
        .env("TRIAGE_ACTOR", "svc:bot")
        .args(["ticket", "update", &ticket_id, "--title", "Renamed"])
        .assert()
        .success();

    triage_cmd()
        .current_dir(temp.path())
        .args(["activity", "ticket", &ticket_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("svc:bot"));
}

#[test]
fn test_comment_add_and_list() {
    let temp = setup();
    let board_id = create_board(&temp);
    let ticket_id = create_ticket(&temp, &board_id, "Discussed", &[]);

    triage_cmd()
        .current_dir(temp.path())
        .args([
            "comment", "add", &ticket_id, "looks good", "--actor", "bob",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added comment"));

    triage_cmd()
        .current_dir(temp.path())
        .args(["comment", "list", &ticket_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("bob: looks good"));
}

#[test]
fn test_blank_comment_ignored() {
    let temp = setup();
    let board_id = create_board(&temp);
    let ticket_id = create_ticket(&temp, &board_id, "Quiet", &[]);

    triage_cmd()
        .current_dir(temp.path())
        .args(["comment", "add", &ticket_id, "   "])
        .assert()
        .success()
        .stdout(predicate::str::contains("Empty comment ignored"));
}

#[test]
fn test_delete_leaves_surviving_entry() {
    let temp = setup();
    let board_id = create_board(&temp);
    let ticket_id = create_ticket(&temp, &board_id, "Doomed", &[]);

    triage_cmd()
        .current_dir(temp.path())
        .args(["ticket", "delete", &ticket_id])
        .assert()
        .success();

    triage_cmd()
        .current_dir(temp.path())
        .args(["ticket", "show", &ticket_id])
        .assert()
        .failure()
        .code(3);

    triage_cmd()
        .current_dir(temp.path())
        .args(["activity", "ticket", &ticket_id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ticket deleted"));
}

#[test]
fn test_board_view_json() {
    let temp = setup();
    let board_id = create_board(&temp);
    create_ticket(&temp, &board_id, "Epic one", &["--type", "epic"]);

    let output = triage_cmd()
        .current_dir(temp.path())
        .args(["board", "view", &board_id, "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["by_type"]["epics"].as_array().unwrap().len(), 1);
    assert_eq!(json["by_status"]["todo"].as_array().unwrap().len(), 1);
    assert_eq!(json["recent_activity"].as_array().unwrap().len(), 1);
}

#[test]
fn test_relate_and_related_from() {
    let temp = setup();
    let board_id = create_board(&temp);
    let a = create_ticket(&temp, &board_id, "Left", &[]);
    let b = create_ticket(&temp, &board_id, "Right", &[]);

    triage_cmd()
        .current_dir(temp.path())
        .args(["ticket", "relate", &a, &b])
        .assert()
        .success();

    triage_cmd()
        .current_dir(temp.path())
        .args(["ticket", "related-from", &b])
        .assert()
        .success()
        .stdout(predicate::str::contains("Left"));
}
