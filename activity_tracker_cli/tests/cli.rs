// Drives the compiled binary against the recording in test_data/.

use std::process::Output;

use assert_cmd::Command;

const HARBOUR_LOOP: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/test_data/harbour_loop.gpx");

fn run(args: &[&str]) -> Output {
    Command::cargo_bin("activity_tracker_cli")
        .unwrap()
        .env("RUST_LOG", "off")
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn distance_prints_the_track_length() {
    let output = run(&["distance", HARBOUR_LOOP]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "857 m");
}

#[test]
fn replay_with_auto_pause_skips_the_break() {
    let output = run(&["replay", HARBOUR_LOOP, "--auto-pause-secs", "60"]);
    assert!(output.status.success());

    let stdout = stdout(&output);
    assert!(stdout.contains("Points\t6"), "{stdout}");
    assert!(stdout.contains("Elapsed\t00:02:00"), "{stdout}");
    assert!(stdout.contains("Paused\t00:10:00 (1 pauses)"), "{stdout}");
}

#[test]
fn replay_writes_geojson() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("path.geojson");

    let output = run(&["replay", HARBOUR_LOOP, "--geojson", out.to_str().unwrap()]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["type"], "Feature");
    assert_eq!(json["geometry"]["type"], "LineString");
    assert_eq!(json["geometry"]["coordinates"].as_array().unwrap().len(), 6);
    assert_eq!(json["properties"]["elapsed_s"], 720);
}

#[test]
fn missing_file_fails() {
    let output = run(&["distance", "no/such/file.gpx"]);
    assert!(!output.status.success());
}
