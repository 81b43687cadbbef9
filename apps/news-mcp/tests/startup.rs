use assert_cmd::Command;
use predicates::prelude::*;

const HANDSHAKE: &str = concat!(
    r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
    "\n",
    r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
    "\n",
    r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
    "\n",
);

fn server() -> Command {
    let mut cmd = Command::cargo_bin("news-mcp").unwrap();
    cmd.env_remove("NEWS_SOURCE")
        .env_remove("NEWS_LOCALE")
        .env_remove("GNEWS_API_KEY")
        .env_remove("APP_ENV")
        .env("RUST_LOG", "info");
    cmd
}

#[test]
fn gnews_without_api_key_refuses_to_start() {
    server()
        .args(["--source", "gnews"])
        .write_stdin(HANDSHAKE)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("GNEWS_API_KEY"));
}

#[test]
fn blank_api_key_is_treated_as_missing() {
    server()
        .env("NEWS_SOURCE", "gnews")
        .env("GNEWS_API_KEY", "  ")
        .write_stdin(HANDSHAKE)
        .assert()
        .failure()
        .stderr(predicate::str::contains("GNEWS_API_KEY"));
}

#[test]
fn rss_mode_answers_handshake_until_eof() {
    server()
        .write_stdin(HANDSHAKE)
        .assert()
        .success()
        .stdout(predicate::str::contains("yahoo-news-server"))
        .stdout(predicate::str::contains("get-news"))
        .stdout(predicate::str::contains("search-news"))
        .stdout(predicate::str::contains("get-top-headlines").not());
}

#[test]
fn gnews_mode_lists_api_tools() {
    server()
        .args(["--source", "gnews"])
        .env("GNEWS_API_KEY", "test-key")
        .write_stdin(HANDSHAKE)
        .assert()
        .success()
        .stdout(predicate::str::contains("gnews-server"))
        .stdout(predicate::str::contains("get-top-headlines"))
        .stdout(predicate::str::contains("test-key").not())
        .stderr(predicate::str::contains("test-key").not());
}

#[test]
fn logs_stay_off_stdout() {
    let output = server().write_stdin(HANDSHAKE).output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    for line in lines {
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(value["jsonrpc"], "2.0");
    }
}
