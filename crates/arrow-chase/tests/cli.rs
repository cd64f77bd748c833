mod common;

use std::path::Path;

use arrow_chase::io::{load_color_image, save_color_image};
use arrow_chase::Rgb;
use assert_cmd::Command;
use predicates::prelude::*;

fn cli() -> Command {
    Command::cargo_bin("arrow-chase").unwrap()
}

fn write_scene(dir: &Path) -> std::path::PathBuf {
    let input = dir.join("map.png");
    save_color_image(&common::chain_scene(), &input).unwrap();
    input
}

#[test]
fn wrong_argument_count_prints_usage_and_succeeds() {
    cli()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
    cli()
        .args(["a.png", "b.png"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
    cli()
        .args(["a.png", "b.png", "c.txt", "d"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn traces_the_chain_and_writes_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_scene(dir.path());
    let output = dir.path().join("out.png");
    let path_file = dir.path().join("path.txt");
    let report = dir.path().join("report.json");
    let labels = dir.path().join("labels.png");

    cli()
        .arg(&input)
        .arg(&output)
        .arg(&path_file)
        .arg("--report")
        .arg(&report)
        .arg("--labels-out")
        .arg(&labels)
        .args(["--log-level", "warn"])
        .assert()
        .success();

    let traced = load_color_image(&output).unwrap();
    let magenta = traced.data.iter().filter(|&&p| p == Rgb::MAGENTA).count();
    assert_eq!(magenta, 53);

    assert_eq!(std::fs::read_to_string(&path_file).unwrap(), "");

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["termination"]["kind"], "destination");
    assert_eq!(json["termination"]["region"], 4);

    let rendered = load_color_image(&labels).unwrap();
    assert_eq!((rendered.width, rendered.height), (80, 52));
}

#[test]
fn params_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_scene(dir.path());
    let params = dir.path().join("params.json");
    std::fs::write(&params, r#"{ "trace": { "max_hops": 1 } }"#).unwrap();
    let report = dir.path().join("report.json");

    cli()
        .arg(&input)
        .arg(dir.path().join("out.png"))
        .arg(dir.path().join("path.txt"))
        .arg("--params")
        .arg(&params)
        .arg("--report")
        .arg(&report)
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["termination"]["kind"], "hop_limit");
}

#[test]
fn unreadable_input_fails_with_error_message() {
    let dir = tempfile::tempdir().unwrap();
    cli()
        .arg(dir.path().join("missing.png"))
        .arg(dir.path().join("out.png"))
        .arg(dir.path().join("path.txt"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn malformed_params_fail() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_scene(dir.path());
    let params = dir.path().join("params.json");
    std::fs::write(&params, "{ not json").unwrap();

    cli()
        .arg(&input)
        .arg(dir.path().join("out.png"))
        .arg(dir.path().join("path.txt"))
        .arg("--params")
        .arg(&params)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid parameters"));
}

#[test]
fn logger_installs_at_every_level() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_scene(dir.path());
    for level in ["off", "error", "info", "debug"] {
        cli()
            .arg(&input)
            .arg(dir.path().join("out.png"))
            .arg(dir.path().join("path.txt"))
            .args(["--log-level", level])
            .assert()
            .success();
    }
}

#[test]
fn unknown_log_level_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_scene(dir.path());
    cli()
        .arg(&input)
        .arg(dir.path().join("out.png"))
        .arg(dir.path().join("path.txt"))
        .args(["--log-level", "loud"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown log level `loud`"));
}
