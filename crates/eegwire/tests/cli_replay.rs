#![cfg(all(unix, feature = "cli"))]

use std::io::Read;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn unique_temp_dir(tag: &str) -> PathBuf {
    let dir = PathBuf::from(format!(
        "/tmp/eegwire-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

fn eegwire(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_eegwire"))
        .arg("--log-level")
        .arg("error")
        .args(args)
        .output()
        .expect("eegwire should run")
}

fn synth(path: &str, extra: &[&str]) {
    let mut args = vec!["synth", path];
    args.extend_from_slice(extra);
    let out = eegwire(&args);
    assert!(
        out.status.success(),
        "synth failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
}

fn json_lines(out: &Output) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(&out.stdout)
        .lines()
        .map(|line| serde_json::from_str(line).expect("stdout line should be JSON"))
        .collect()
}

#[test]
fn replay_prints_one_json_line_per_sample() {
    let dir = unique_temp_dir("replay");
    let capture = dir.join("clean.bin");
    let capture = capture.to_str().expect("utf-8 path");
    synth(capture, &["--frames", "25"]);

    let out = eegwire(&["--format", "json", "replay", capture]);
    assert!(out.status.success());

    let lines = json_lines(&out);
    assert_eq!(lines.len(), 25);
    assert_eq!(lines[0]["sequence"], 0);
    assert_eq!(lines[24]["sequence"], 24);
    assert_eq!(lines[1]["unit"], "counts");
    assert_eq!(lines[1]["channels"][0], 1000);
    assert_eq!(lines[1]["channels"][1], -2000);
}

#[test]
fn replay_honors_count_and_microvolts() {
    let dir = unique_temp_dir("replay-count");
    let capture = dir.join("clean.bin");
    let capture = capture.to_str().expect("utf-8 path");
    synth(capture, &["--frames", "40"]);

    let out = eegwire(&[
        "--format",
        "json",
        "replay",
        capture,
        "--count",
        "5",
        "--microvolts",
        "--chunk-size",
        "7",
    ]);
    assert!(out.status.success());

    let lines = json_lines(&out);
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0]["unit"], "uV");
    assert!(lines[1]["channels"][0].as_f64().expect("float channel") > 0.0);
}

#[test]
fn stats_counts_rejected_frames_and_flushes() {
    let dir = unique_temp_dir("stats");
    let capture = dir.join("noisy.bin");
    let capture = capture.to_str().expect("utf-8 path");
    synth(
        capture,
        &["--frames", "30", "--garbage-every", "5", "--corrupt-every", "10"],
    );

    let out = eegwire(&["--format", "json", "stats", capture]);
    assert!(out.status.success());

    let lines = json_lines(&out);
    assert_eq!(lines.len(), 1);
    let stats = &lines[0];
    assert_eq!(stats["kind"], "stream-stats");
    assert_eq!(stats["frames_rejected"], 3);
    assert_eq!(stats["frames_validated"], 27);
    assert_eq!(stats["samples_decoded"], 27);
    assert_eq!(stats["bytes_ingested"], 30 * 33 + 6 * 5);
}

#[test]
fn missing_capture_exits_with_failure() {
    let out = eegwire(&["replay", "/nonexistent/eegwire/capture.bin"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("failed opening"));
}

#[test]
fn gain_requires_microvolts() {
    let dir = unique_temp_dir("gain");
    let capture = dir.join("clean.bin");
    let capture = capture.to_str().expect("utf-8 path");
    synth(capture, &["--frames", "3"]);

    let out = eegwire(&["replay", capture, "--gain", "8"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("--microvolts"));

    let out = eegwire(&["--format", "json", "replay", capture, "--gain", "8", "--microvolts"]);
    assert!(out.status.success());
    assert_eq!(json_lines(&out).len(), 3);
}

#[test]
fn unsupported_gain_is_usage_error() {
    let dir = unique_temp_dir("bad-gain");
    let capture = dir.join("clean.bin");
    let capture = capture.to_str().expect("utf-8 path");
    synth(capture, &["--frames", "3"]);

    let out = eegwire(&["replay", capture, "--microvolts", "--gain", "5"]);
    assert_eq!(out.status.code(), Some(64));
}

#[test]
fn synth_max_frames_streams_without_panicking() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_eegwire"))
        .args(["--log-level", "error", "synth", "-", "--frames", "18446744073709551615"])
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("synth should start");

    let mut stdout = child.stdout.take().expect("stdout should be piped");
    let mut head = vec![0u8; 10 * 33];
    stdout
        .read_exact(&mut head)
        .expect("synth should stream frames before finishing");
    drop(stdout);

    let out = child.wait_with_output().expect("synth should exit");
    // Reader hung up: a write error, not a panic.
    assert_eq!(out.status.code(), Some(125));
    assert!(String::from_utf8_lossy(&out.stderr).contains("write failed"));
    assert_eq!(head[0], 0xA0);
    assert_eq!(head[32], 0xC0);
}
