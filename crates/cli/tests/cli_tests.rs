#![allow(clippy::unwrap_used, reason = "test code")]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DEVICE: &str = "test-device-1";

/// A `cinesync` command with its database and session inside `dir`.
fn cinesync(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cinesync").unwrap();
    cmd.env("CINESYNC_DB_PATH", dir.path().join("cinesync.db"))
        .env("CINESYNC_SESSION_PATH", dir.path().join("session.json"))
        .env("CINESYNC_DEVICE_ID", DEVICE)
        .env_remove("CINESYNC_TMDB_TOKEN")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("cinesync").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("saved list"));
}

#[test]
fn test_cli_save_help() {
    let mut cmd = Command::cargo_bin("cinesync").unwrap();
    cmd.arg("save").arg("--help").assert().success().stdout(predicate::str::contains("--title"));
}

#[test]
fn test_whoami_anonymous_uses_device() {
    let dir = TempDir::new().unwrap();
    let out = stdout_json(cinesync(&dir).arg("whoami"));
    assert_eq!(out["actor"]["kind"], "anonymous_device");
    assert_eq!(out["actor"]["id"], DEVICE);
}

#[test]
fn test_save_list_unsave_round() {
    let dir = TempDir::new().unwrap();

    let saved = stdout_json(cinesync(&dir).args(["save", "42", "--title", "Dune", "--poster", "/d.jpg"]));
    assert_eq!(saved["owner_id"], DEVICE);
    assert_eq!(saved["poster_url"], "https://image.tmdb.org/t/p/w500/d.jpg");

    // saving again is a no-op
    stdout_json(cinesync(&dir).args(["save", "42", "--title", "Dune"]));
    let list = stdout_json(cinesync(&dir).arg("saved"));
    assert_eq!(list.as_array().unwrap().len(), 1);

    let check = stdout_json(cinesync(&dir).args(["is-saved", "42"]));
    assert_eq!(check["saved"], true);

    let removed = stdout_json(cinesync(&dir).args(["unsave", "42"]));
    assert_eq!(removed["removed"], true);
    let removed_again = stdout_json(cinesync(&dir).args(["unsave", "42"]));
    assert_eq!(removed_again["removed"], false);
}

#[test]
fn test_sign_in_migrates_device_rows() {
    let dir = TempDir::new().unwrap();
    cinesync(&dir).args(["save", "1", "--title", "One"]).assert().success();
    cinesync(&dir).args(["save", "2", "--title", "Two"]).assert().success();

    let signed_in = stdout_json(cinesync(&dir).args(["sign-in", "user-7", "--name", "Ada"]));
    assert_eq!(signed_in["user"]["id"], "user-7");
    assert_eq!(signed_in["migration"]["migrated"], 2);

    let list = stdout_json(cinesync(&dir).arg("saved"));
    let owners: Vec<&str> =
        list.as_array().unwrap().iter().map(|i| i["owner_id"].as_str().unwrap()).collect();
    assert_eq!(owners, vec!["user-7", "user-7"]);

    let who = stdout_json(cinesync(&dir).arg("whoami"));
    assert_eq!(who["actor"]["kind"], "authenticated_user");

    let out = stdout_json(cinesync(&dir).arg("sign-out"));
    assert_eq!(out["signed_out"], true);
    let list = stdout_json(cinesync(&dir).arg("saved"));
    assert!(list.as_array().unwrap().is_empty());
}

#[test]
fn test_corrupt_session_fails_loudly() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("session.json"), "{broken").unwrap();
    cinesync(&dir)
        .args(["is-saved", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("IDENTITY_UNAVAILABLE"));
}

#[test]
fn test_trending_empty() {
    let dir = TempDir::new().unwrap();
    let out = stdout_json(cinesync(&dir).arg("trending"));
    assert_eq!(out, Value::Array(Vec::new()));
}

#[test]
fn test_search_requires_token() {
    let dir = TempDir::new().unwrap();
    cinesync(&dir)
        .args(["search", "dune"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("CINESYNC_TMDB_TOKEN"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_search_counts_term_for_trending() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .and(query_param("query", "dune"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [
                { "id": 438631, "title": "Dune", "poster_path": "/dune.jpg" },
                { "id": 841, "title": "Dune (1984)", "poster_path": null }
            ]
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let search = |dir: &TempDir| {
        let mut cmd = cinesync(dir);
        cmd.env("CINESYNC_TMDB_TOKEN", "test-token")
            .env("CINESYNC_TMDB_URL", server.uri())
            .args(["search", "  dune  "]);
        cmd
    };

    let results = stdout_json(&mut search(&dir));
    assert_eq!(results.as_array().unwrap().len(), 2);
    assert_eq!(results[0]["poster_url"], "https://image.tmdb.org/t/p/w500/dune.jpg");
    stdout_json(&mut search(&dir));

    let trending = stdout_json(cinesync(&dir).args(["trending", "--limit", "3"]));
    assert_eq!(trending[0]["search_term"], "dune");
    assert_eq!(trending[0]["count"], 2);
    assert_eq!(trending[0]["movie_id"], 438631);
}
