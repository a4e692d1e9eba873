//! End-to-end tests running the `att` binary against on-disk swipe batches.

use std::io::Write;
use std::process::{Command, Stdio};

use tempfile::TempDir;

fn att_binary() -> String {
    env!("CARGO_BIN_EXE_att").to_string()
}

/// Runs `att` with an isolated HOME so no user config leaks in.
fn att(temp: &TempDir) -> Command {
    let mut cmd = Command::new(att_binary());
    cmd.env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join(".config"))
        .env("XDG_DATA_HOME", temp.path().join(".local/share"))
        .env_remove("ATT_EVENTS_PATH")
        .env_remove("ATT_PARALLEL_THRESHOLD")
        .env_remove("RUST_LOG");
    cmd
}

fn write_batch(temp: &TempDir, name: &str, lines: &[&str]) -> std::path::PathBuf {
    let path = temp.path().join(name);
    std::fs::write(&path, lines.join("\n")).unwrap();
    path
}

fn json_rows(output: &std::process::Output) -> Vec<serde_json::Value> {
    assert!(
        output.status.success(),
        "att should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be a JSON array")
}

#[test]
fn report_json_mixes_present_and_absent() {
    let temp = TempDir::new().unwrap();
    let batch = write_batch(
        &temp,
        "swipes.jsonl",
        &[
            r#"{"Name":"Alice","RFID":"1","date":"2025-01-01","time":"08:00:00","IN/OUT":"IN"}"#,
            r#"{"Name":"Alice","RFID":"1","date":"2025-01-01","time":"08:30:00","IN/OUT":"IN"}"#,
            r#"{"Name":"Alice","RFID":"1","date":"2025-01-01","time":"09:00:00","IN/OUT":"OUT"}"#,
        ],
    );

    let output = att(&temp)
        .args(["report", "--json", "--date", "2025-01-01"])
        .arg("--events")
        .arg(&batch)
        .args(["--name", "Alice,Bob", "--tag", "1", "--tag", "2"])
        .output()
        .unwrap();

    let rows = json_rows(&output);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["name"], "Alice");
    assert_eq!(rows[0]["Effective_login"], "1:00:00");
    assert_eq!(
        rows[0]["errors"],
        serde_json::json!(["Duplicate IN at 08:30:00"])
    );
    assert_eq!(rows[1]["name"], "Bob");
    assert_eq!(rows[1]["rfid"], "2");
    assert_eq!(rows[1]["errors"], "Absent");
    assert!(rows[1].get("log_cabin").is_none());
}

#[test]
fn report_empty_batch_echoes_locations() {
    let temp = TempDir::new().unwrap();
    let batch = write_batch(&temp, "empty.json", &["[]"]);

    let output = att(&temp)
        .args(["report", "--json", "--date", "2025-03-04", "--log-cabin", "C-7"])
        .arg("--events")
        .arg(&batch)
        .output()
        .unwrap();

    let rows = json_rows(&output);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "");
    assert_eq!(rows[0]["date"], "2025-03-04");
    assert_eq!(rows[0]["log_cabin"], serde_json::json!(["C-7"]));
}

#[test]
fn report_reads_stdin() {
    let temp = TempDir::new().unwrap();

    let mut child = att(&temp)
        .args(["report", "--json", "--events", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(
            br#"[{"name":"Dana","tag":"4","date":"2025-01-01","time":"07:00:00","direction":"OUT"}]"#,
        )
        .unwrap();
    let output = child.wait_with_output().unwrap();

    let rows = json_rows(&output);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["errors"], serde_json::json!(["Unexpected OUT at 07:00:00"]));
}

#[test]
fn report_uses_configured_events_path() {
    let temp = TempDir::new().unwrap();
    let batch = write_batch(
        &temp,
        "configured.jsonl",
        &[
            r#"{"name":"Eve","tag":"5","date":"2025-01-01","time":"08:00:00","direction":"IN"}"#,
            r#"{"name":"Eve","tag":"5","date":"2025-01-01","time":"16:00:00","direction":"OUT"}"#,
        ],
    );

    let output = att(&temp)
        .env("ATT_EVENTS_PATH", &batch)
        .args(["report", "--json"])
        .output()
        .unwrap();

    let rows = json_rows(&output);
    assert_eq!(rows[0]["name"], "Eve");
    assert_eq!(rows[0]["Total_login"], "8:00:00");
}

#[test]
fn report_fails_on_unreadable_batch() {
    let temp = TempDir::new().unwrap();

    let output = att(&temp)
        .args(["report", "--events"])
        .arg(temp.path().join("missing.jsonl"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read swipes from"), "{stderr}");
}

#[test]
fn no_subcommand_prints_help() {
    let temp = TempDir::new().unwrap();

    let output = att(&temp).output().unwrap();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("report"));
}
