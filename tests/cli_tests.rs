//! CLI smoke tests
//!
//! Drives the wasmclip binary end to end with assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;

fn wasmclip() -> Command {
    Command::cargo_bin("wasmclip").unwrap()
}

#[test]
fn formats_lists_the_registry() {
    wasmclip()
        .arg("formats")
        .assert()
        .success()
        .stdout(predicate::str::contains("webm"))
        .stdout(predicate::str::contains("libvpx-vp9"))
        .stdout(predicate::str::contains("download only"));
}

#[test]
fn formats_json_is_parseable() {
    let output = wasmclip().args(["formats", "--json"]).output().unwrap();
    assert!(output.status.success());

    let formats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = formats.as_array().unwrap();
    assert_eq!(entries.len(), 5);
    assert!(entries
        .iter()
        .any(|entry| entry["format"] == "wmv" && entry["playable"] == false));
}

#[test]
fn plan_resolves_the_canonical_order() {
    wasmclip()
        .args([
            "plan",
            "--source-format",
            "mp4",
            "--duration",
            "00:02:00",
            "--convert-to",
            "webm",
            "--codec",
            "vp9",
            "--trim-from",
            "00:00:10",
            "--trim-to",
            "00:01:00",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("trim -> convert"))
        .stdout(predicate::str::contains("-ss 00:00:10"))
        .stdout(predicate::str::contains("libvpx-vp9"))
        .stdout(predicate::str::contains("Output: input.webm"));
}

#[test]
fn plan_json_reports_invocations_and_outcome() {
    let output = wasmclip()
        .args([
            "plan",
            "--json",
            "--source-format",
            "webm",
            "--duration",
            "60",
            "--grayscale",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["phases"], serde_json::json!(["grayscale"]));
    // Probe plus the three-step webm grayscale staging
    assert_eq!(report["invocations"].as_array().unwrap().len(), 4);
    assert_eq!(report["output"]["format"], "webm");
    assert_eq!(report["output"]["unplayable"], false);
}

#[test]
fn plan_flags_the_unplayable_containers() {
    wasmclip()
        .args([
            "plan",
            "--source-format",
            "mp4",
            "--duration",
            "60",
            "--convert-to",
            "wmv",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("no native browser playback"));
}

#[test]
fn plan_rejects_reversed_trim_bounds() {
    wasmclip()
        .args([
            "plan",
            "--source-format",
            "mp4",
            "--duration",
            "60",
            "--trim-from",
            "30",
            "--trim-to",
            "10",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid trim range"));
}

#[test]
fn plan_rejects_an_empty_plan() {
    wasmclip()
        .args(["plan", "--source-format", "mp4", "--duration", "60"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty plan"));
}

#[test]
fn plan_reads_a_json_plan_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plan.json");
    std::fs::write(
        &path,
        r#"{"steps":[{"kind":"mute"},{"kind":"convert","to":"webm","codec":"vp8"}]}"#,
    )
    .unwrap();

    wasmclip()
        .args([
            "plan",
            "--source-format",
            "mp4",
            "--duration",
            "60",
            "--plan-file",
            path.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("mute -> convert"))
        .stdout(predicate::str::contains("-an"));
}

#[test]
fn probe_extracts_the_duration() {
    wasmclip()
        .arg("probe")
        .write_stdin("Stream #0:0: Video\n  DURATION        : 00:01:02.50, start: 0.000000\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("00:01:02"));
}

#[test]
fn probe_fails_without_a_duration_line() {
    wasmclip()
        .arg("probe")
        .write_stdin("frame=  100 fps= 25\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no DURATION line"));
}
