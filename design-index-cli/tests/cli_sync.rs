use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use design_index_sync::test_support::StubServer;
use predicates::str::contains;
use tempfile::TempDir;

fn design_index_cmd(api_base: &str) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("design-index"));
    cmd.env_clear().env("FIGMA_API_BASE", api_base);
    cmd
}

fn team_server() -> StubServer {
    StubServer::start([
        (
            "/teams/T1/projects",
            200,
            r#"{"projects":[{"id":"1","name":"Alpha"},{"id":"2","name":"Beta"},{"id":"3","name":"Gamma"}]}"#,
        ),
        (
            "/projects/1/files",
            200,
            r#"{"files":[{"key":"a1","name":"Old","last_modified":"2023-01-01T00:00:00Z","thumbnail_url":"https://t/1.png"}]}"#,
        ),
        (
            "/projects/2/files",
            200,
            r#"{"files":[{"key":"b1","name":"My File","last_modified":"2024-06-01T00:00:00Z"},{"key":"b2","last_modified":"2024-06-01T00:00:00Z"}]}"#,
        ),
        ("/projects/3/files", 200, r#"{"files":[{"key":"c1","name":"Undated"}]}"#),
    ])
}

fn read_index(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).expect("read index")).expect("parse index")
}

fn ids(index: &serde_json::Value) -> Vec<&str> {
    index
        .as_array()
        .expect("array")
        .iter()
        .map(|e| e["id"].as_str().expect("id"))
        .collect()
}

// ---------------------------------------------------------------------------
// 1. Configuration failures happen before any request
// ---------------------------------------------------------------------------

#[test]
fn missing_token_fails_without_network() {
    let server = team_server();
    let tmp = TempDir::new().unwrap();

    design_index_cmd(server.base_url())
        .env("FIGMA_TEAM_ID", "T1")
        .args(["sync", "--output"])
        .arg(tmp.path().join("index.json"))
        .assert()
        .failure()
        .stderr(contains("FIGMA_TOKEN"));

    assert_eq!(server.request_count(), 0);
    assert!(!tmp.path().join("index.json").exists());
}

#[test]
fn missing_project_selection_fails_without_network() {
    let server = team_server();

    design_index_cmd(server.base_url())
        .env("FIGMA_TOKEN", "tok")
        .arg("sync")
        .assert()
        .failure()
        .stderr(contains("FIGMA_TEAM_ID"));

    assert_eq!(server.request_count(), 0);
}

// ---------------------------------------------------------------------------
// 2. Successful sync
// ---------------------------------------------------------------------------

#[test]
fn team_sync_writes_sorted_index_and_reports_count() {
    let server = team_server();
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("design-index.json");

    design_index_cmd(server.base_url())
        .env("FIGMA_TOKEN", "tok-abc")
        .env("FIGMA_TEAM_ID", "T1")
        .env("DESIGN_INDEX_OUT", &out)
        .arg("sync")
        .assert()
        .success()
        .stdout(contains(format!("Wrote 4 entries to {}", out.display())));

    let index = read_index(&out);
    assert_eq!(ids(&index), vec!["b1", "b2", "a1", "c1"]);
    assert_eq!(
        index[0]["figmaUrl"],
        "https://www.figma.com/design/b1/My%20File"
    );
    assert_eq!(index[1]["title"], "Untitled");
    assert_eq!(index[2]["_project"], "Alpha");
    assert_eq!(index[2]["thumb"], serde_json::Value::Null);
    assert_eq!(index[3]["updatedAt"], serde_json::Value::Null);

    let raw = fs::read_to_string(&out).unwrap();
    assert!(raw.ends_with("]\n"));

    for request in server.requests() {
        assert_eq!(request.header("x-figma-token"), Some("tok-abc"));
    }
}

#[test]
fn allow_flag_limits_output_to_named_project() {
    let server = team_server();
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("index.json");

    design_index_cmd(server.base_url())
        .env("FIGMA_TOKEN", "tok")
        .env("FIGMA_TEAM_ID", "T1")
        .args(["sync", "--allow", "Beta", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(contains("Wrote 2 entries"));

    let index = read_index(&out);
    assert_eq!(ids(&index), vec!["b1", "b2"]);
    let paths: Vec<_> = server.requests().into_iter().map(|r| r.path).collect();
    assert!(!paths.contains(&"/projects/1/files".to_string()));
}

#[test]
fn repeated_runs_produce_identical_bytes() {
    let server = team_server();
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("index.json");

    let run = |jobs: &str| {
        design_index_cmd(server.base_url())
            .env("FIGMA_TOKEN", "tok")
            .env("FIGMA_PROJECT_IDS", "1,2,3")
            .args(["sync", "--jobs", jobs, "--output"])
            .arg(&out)
            .assert()
            .success();
        fs::read(&out).unwrap()
    };

    let sequential = run("1");
    let pooled = run("3");
    assert_eq!(sequential, pooled);
}

#[test]
fn dry_run_writes_nothing() {
    let server = team_server();
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("index.json");

    design_index_cmd(server.base_url())
        .env("FIGMA_TOKEN", "tok")
        .env("FIGMA_TEAM_ID", "T1")
        .args(["sync", "--dry-run", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(contains("[dry-run] Would write 4 entries"));

    assert!(!out.exists(), "dry-run must not create files");
}

// ---------------------------------------------------------------------------
// 3. Upstream failures
// ---------------------------------------------------------------------------

#[test]
fn upstream_error_reports_status_and_url_and_writes_nothing() {
    let server = StubServer::start([
        (
            "/teams/T1/projects",
            200,
            r#"{"projects":[{"id":"1","name":"Alpha"},{"id":"2","name":"Beta"}]}"#,
        ),
        ("/projects/1/files", 200, r#"{"files":[{"key":"a1","name":"A"}]}"#),
    ]);
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("index.json");
    let failing_url = format!("{}/projects/2/files", server.base_url());

    design_index_cmd(server.base_url())
        .env("FIGMA_TOKEN", "tok")
        .env("FIGMA_TEAM_ID", "T1")
        .args(["sync", "--output"])
        .arg(&out)
        .assert()
        .failure()
        .stderr(contains("404"))
        .stderr(contains(failing_url));

    assert!(!out.exists(), "no partial output on failure");
}

// ---------------------------------------------------------------------------
// 4. Project listing
// ---------------------------------------------------------------------------

#[test]
fn projects_lists_filtered_projects_as_json() {
    let server = team_server();

    let output = design_index_cmd(server.base_url())
        .env("FIGMA_TOKEN", "tok")
        .env("FIGMA_TEAM_ID", "T1")
        .env("FIGMA_PROJECT_NAMES", "Gamma,Alpha")
        .args(["projects", "--json"])
        .output()
        .expect("run design-index projects");
    assert!(
        output.status.success(),
        "command failed: status={} stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr),
    );

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(
        rows,
        serde_json::json!([
            { "id": "1", "name": "Alpha" },
            { "id": "3", "name": "Gamma" },
        ])
    );
    assert_eq!(server.request_count(), 1, "listing must not fetch files");
}
