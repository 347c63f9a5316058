use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::{TempDir, tempdir};

/// `scout` isolated to `root`, ignoring any user-level config.
fn scout(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("scout").unwrap();
    cmd.env("SCOUT_ROOT", root)
        .env("XDG_CONFIG_HOME", root.join("xdg"))
        .env_remove("SCOUT_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn robot_json(root: &Path, args: &[&str]) -> Value {
    let output = scout(root).arg("--robot").args(args).output().unwrap();
    assert!(
        output.status.success(),
        "scout {args:?} failed: {}",
        String::from_utf8_lossy(&output.stdout)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

fn seeded_root() -> TempDir {
    let dir = tempdir().unwrap();
    let json = robot_json(dir.path(), &["seed"]);
    assert_eq!(json["status"], "seeded");
    dir
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("scout").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("scout").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_robot_mode_global() {
    let mut cmd = Command::cargo_bin("scout").unwrap();
    cmd.args(["--robot", "--help"]).assert().success();
}

#[test]
fn test_seed_then_search_ranks_backend_candidate_first() {
    let dir = seeded_root();
    let json = robot_json(dir.path(), &["search", "python flask", "--top-k", "2"]);

    assert_eq!(json["status"], "ok");
    assert_eq!(json["count"], 2);
    let first = &json["results"][0];
    assert_eq!(first["id"], 1);
    assert_eq!(first["candidate_name"], "Alice Johnson");
    assert_eq!(first["skill_match_score"], 100.0);
    assert!(
        first["explanation"]
            .as_str()
            .unwrap()
            .starts_with("Matches: python, flask")
    );
    assert_eq!(json["results"][1]["skill_match_score"], 0.0);
}

#[test]
fn test_search_applies_experience_filter() {
    let dir = seeded_root();
    let json = robot_json(dir.path(), &["search", "react developer with 4 years", "-k", "5"]);

    // Bob has 3 years and is filtered out; Alice has 5
    let ids: Vec<i64> = json["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1]);
    assert_eq!(json["requirement"]["min_years"], 4);
}

#[test]
fn test_search_on_empty_root_returns_no_results() {
    let dir = tempdir().unwrap();
    let json = robot_json(dir.path(), &["search", "python"]);
    assert_eq!(json["count"], 0);
    assert_eq!(json["candidates_considered"], 0);
}

#[test]
fn test_search_human_output() {
    let dir = seeded_root();
    scout(dir.path())
        .args(["search", "python flask"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice Johnson"))
        .stdout(predicate::str::contains("Matches: python, flask"));
}

#[test]
fn test_parse_query() {
    let dir = tempdir().unwrap();
    let json = robot_json(
        dir.path(),
        &["parse", "Looking for 5 years experience with React and Node"],
    );
    assert_eq!(json["requirement"]["must_have"], serde_json::json!(["node", "react"]));
    assert_eq!(json["requirement"]["min_years"], 5);
}

#[test]
fn test_add_text_resume_extracts_fields() {
    let dir = tempdir().unwrap();
    let resume = dir.path().join("priya_nair.txt");
    std::fs::write(
        &resume,
        "Priya Nair\nFull Stack Developer\nLocation: Pune\n\n\
         React and Node developer with 4 years of experience building TypeScript apps.\n",
    )
    .unwrap();

    let json = robot_json(dir.path(), &["add", resume.to_str().unwrap()]);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["id"], 1);
    assert_eq!(json["candidate_name"], "Priya Nair");
    assert_eq!(json["title"], "Full Stack Developer");
    assert_eq!(json["years_experience"], 4.0);
    assert_eq!(json["location"], "Pune");
    assert_eq!(json["indexed"], 1);

    let list = robot_json(dir.path(), &["list"]);
    assert_eq!(list["count"], 1);
    assert_eq!(
        list["resumes"][0]["skills"],
        serde_json::json!(["node", "react", "typescript"])
    );
}

#[test]
fn test_add_flags_override_extraction() {
    let dir = tempdir().unwrap();
    let resume = dir.path().join("resume.txt");
    std::fs::write(&resume, "backend work on python services for several teams").unwrap();

    let json = robot_json(
        dir.path(),
        &[
            "add",
            resume.to_str().unwrap(),
            "--name",
            "Sam Rivera",
            "--years",
            "7",
            "--skills",
            "Python,Go",
        ],
    );
    assert_eq!(json["candidate_name"], "Sam Rivera");
    assert_eq!(json["years_experience"], 7.0);
    assert_eq!(json["skills"], serde_json::json!(["python", "go"]));
}

#[test]
fn test_add_rejects_short_text() {
    let dir = tempdir().unwrap();
    let resume = dir.path().join("short.txt");
    std::fs::write(&resume, "Jane Roe, python").unwrap();

    scout(dir.path())
        .args(["--robot", "add", resume.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"error\":true"))
        .stdout(predicate::str::contains("too short"));
}

#[test]
fn test_add_rejects_invalid_years() {
    let dir = tempdir().unwrap();
    let resume = dir.path().join("resume.txt");
    std::fs::write(&resume, "backend work on python services for several teams").unwrap();

    for years in ["-3.0", "NaN"] {
        scout(dir.path())
            .args(["add", resume.to_str().unwrap(), "--years", years])
            .assert()
            .failure()
            .stderr(predicate::str::contains("--years"));
    }
    let list = robot_json(dir.path(), &["list"]);
    assert_eq!(list["count"], 0);
}

#[test]
fn test_add_rejects_pdf() {
    let dir = tempdir().unwrap();
    let resume = dir.path().join("resume.pdf");
    std::fs::write(&resume, "%PDF-1.7 binary").unwrap();

    scout(dir.path())
        .args(["add", resume.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file type"));
}

#[test]
fn test_show_reports_index_dimension() {
    let dir = seeded_root();
    let json = robot_json(dir.path(), &["show", "2"]);
    assert_eq!(json["resume"]["candidate_name"], "Bob Smith");
    assert_eq!(json["resume"]["location"], "Bangalore");
    assert_eq!(json["embedding_dim"], 384);
}

#[test]
fn test_show_missing_resume_fails() {
    let dir = tempdir().unwrap();
    scout(dir.path())
        .args(["--robot", "show", "42"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Resume not found: 42"));
}

#[test]
fn test_delete_then_search_excludes_resume() {
    let dir = seeded_root();
    let json = robot_json(dir.path(), &["delete", "1"]);
    assert_eq!(json["deleted"], 1);
    assert_eq!(json["indexed"], 1);

    let search = robot_json(dir.path(), &["search", "python flask"]);
    assert_eq!(search["count"], 1);
    assert_eq!(search["results"][0]["id"], 2);

    scout(dir.path()).args(["delete", "1"]).assert().failure();
}

#[test]
fn test_reindex_reports_stats() {
    let dir = seeded_root();
    let json = robot_json(dir.path(), &["reindex"]);
    assert_eq!(json["records"], 2);
    assert_eq!(json["dims"], 384);
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_list_skills_counts_resumes() {
    let dir = seeded_root();
    let json = robot_json(dir.path(), &["list", "--skills"]);
    assert_eq!(json["count"], 7);
    assert_eq!(json["skills"][0]["name"], "aws");
    assert_eq!(json["skills"][0]["resumes"], 2);
    assert_eq!(json["skills"][5]["name"], "python");
    assert_eq!(json["skills"][5]["resumes"], 1);

    scout(dir.path())
        .args(["list", "--skills"])
        .assert()
        .success()
        .stdout(predicate::str::contains("RESUMES"))
        .stdout(predicate::str::contains("docker"));
}

#[test]
fn test_config_file_changes_dimensions() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[search]\nembedding_dims = 64\n",
    )
    .unwrap();
    robot_json(dir.path(), &["seed"]);
    let json = robot_json(dir.path(), &["reindex"]);
    assert_eq!(json["dims"], 64);
}

#[test]
fn test_invalid_env_override_is_config_error() {
    let dir = tempdir().unwrap();
    scout(dir.path())
        .env("SCOUT_SEARCH_EMBEDDING_DIMS", "lots")
        .args(["--robot", "list"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Config error"));
}
