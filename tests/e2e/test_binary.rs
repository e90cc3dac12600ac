//! Integration tests for the pipeline-dag binary.
//!
//! These tests run the compiled binary against the pipelines in
//! tests/fixtures and check its stdout and exit status.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use pipeline_dag::Pipeline;
use pretty_assertions::assert_eq;
use serde_json::Value;

fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_pipeline-dag"))
}

fn fixtures_dir() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path
}

fn fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Cannot read {:?}: {}", path, e))
}

/// Run the binary with the given stdin input and CLI args.
fn run_binary(input: &str, args: &[&str]) -> Output {
    Command::new(binary_path())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .and_then(|mut child| {
            use std::io::Write;
            if let Some(ref mut stdin) = child.stdin {
                stdin.write_all(input.as_bytes()).ok();
            }
            child.wait_with_output()
        })
        .expect("Failed to run binary")
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not JSON ({}):\n{}",
            e,
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

/// (x, y) of every node in an exported pipeline, in order.
fn positions(pipeline: &Value) -> Vec<(f64, f64)> {
    pipeline["nodes"]
        .as_array()
        .expect("nodes array")
        .iter()
        .map(|n| {
            (
                n["position"]["x"].as_f64().unwrap(),
                n["position"]["y"].as_f64().unwrap(),
            )
        })
        .collect()
}

// ─── sample ─────────────────────────────────────────────────────────────────

#[test]
fn test_sample_matches_fixture() {
    let output = run_binary("", &["sample"]);
    assert!(output.status.success());
    let printed = Pipeline::from_json(&String::from_utf8(output.stdout).unwrap()).unwrap();
    assert_eq!(printed, Pipeline::sample());
    assert_eq!(
        Pipeline::from_json(&fixture("sample_pipeline.json")).unwrap(),
        Pipeline::sample()
    );
}

#[test]
fn test_sample_to_file() {
    let dir = std::env::temp_dir().join("pipeline_dag_test_sample");
    fs::create_dir_all(&dir).ok();
    let out_file = dir.join("sample.json");

    let output = run_binary("", &["sample", "--output", out_file.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let content = fs::read_to_string(&out_file).unwrap();
    assert!(content.contains("\"Data Source\""));

    fs::remove_file(&out_file).ok();
    fs::remove_dir(&dir).ok();
}

// ─── validate ───────────────────────────────────────────────────────────────

#[test]
fn test_validate_sample_is_valid() {
    let output = run_binary(&fixture("sample_pipeline.json"), &["validate"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout_json(&output),
        serde_json::json!({ "isValid": true, "errors": [] })
    );
}

#[test]
fn test_validate_invalid_exits_2() {
    let output = run_binary(&fixture("self_loop.json"), &["validate"]);
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(
        stdout_json(&output),
        serde_json::json!({
            "isValid": false,
            "errors": [
                "1 node(s) are not connected",
                "Pipeline contains cycles (not a valid DAG)",
                "Self-connections are not allowed"
            ]
        })
    );
}

#[test]
fn test_validate_summary_valid() {
    let output = run_binary(&fixture("sample_pipeline.json"), &["validate", "--summary"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "Valid DAG: Ready for execution\nNodes: 5  Connections: 5\n"
    );
}

#[test]
fn test_validate_summary_invalid() {
    let output = run_binary(&fixture("cycle.json"), &["validate", "-s"]);
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "Invalid Pipeline: Issues need to be resolved\n\
         Nodes: 3  Connections: 3\n\
         Issues Found:\n  \
         - Pipeline contains cycles (not a valid DAG)\n"
    );
}

#[test]
fn test_validate_reads_from_file() {
    let path = fixtures_dir().join("cycle.json");
    let output = Command::new(binary_path())
        .args(["validate", path.to_str().unwrap()])
        .output()
        .expect("Failed to run binary");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_bad_json_exits_1() {
    let output = run_binary("{\"nodes\": 3}", &["validate"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.starts_with("error: invalid pipeline JSON"), "{stderr}");
}

#[test]
fn test_missing_file_exits_1() {
    let output = run_binary("", &["validate", "/nonexistent/pipeline.json"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("cannot read '/nonexistent/pipeline.json'"));
}

// ─── layout ─────────────────────────────────────────────────────────────────

#[test]
fn test_layout_sample() {
    let output = run_binary(&fixture("sample_pipeline.json"), &["layout"]);
    assert!(output.status.success());
    let arranged = stdout_json(&output);
    assert_eq!(
        positions(&arranged),
        vec![
            (20.0, 20.0),
            (20.0, 220.0),
            (260.0, 220.0),
            (20.0, 420.0),
            (20.0, 620.0)
        ]
    );
    assert_eq!(arranged["nodes"][2]["label"].as_str(), Some("Filter"));
    assert_eq!(arranged["edges"].as_array().unwrap().len(), 5);
}

#[test]
fn test_layout_flags() {
    let output = run_binary(
        &fixture("sample_pipeline.json"),
        &["layout", "-d", "LR", "--margin", "0", "--center"],
    );
    assert!(output.status.success());
    let pos = positions(&stdout_json(&output));
    // LR with a 160 + 120 rank step and a 80 + 80 order step.
    assert_eq!(pos[0], (0.0, 80.0));
    assert_eq!(pos[1], (280.0, 0.0));
    assert_eq!(pos[2], (280.0, 160.0));
    assert_eq!(pos[4], (840.0, 80.0));
}

#[test]
fn test_layout_config_file_and_override() {
    let dir = std::env::temp_dir().join("pipeline_dag_test_config");
    fs::create_dir_all(&dir).ok();
    let config = dir.join("layout.toml");
    fs::write(&config, "node-height = 40\nrank-separation = 10\nmargin-y = 0\n").unwrap();

    let output = run_binary(
        &fixture("sample_pipeline.json"),
        &["layout", "-c", config.to_str().unwrap(), "--rank-sep", "60"],
    );
    assert!(output.status.success());
    let ys: Vec<f64> = positions(&stdout_json(&output)).iter().map(|p| p.1).collect();
    assert_eq!(ys, vec![0.0, 100.0, 100.0, 200.0, 300.0]);

    fs::remove_file(&config).ok();
    fs::remove_dir(&dir).ok();
}

#[test]
fn test_layout_rejects_bad_direction() {
    let output = run_binary(&fixture("sample_pipeline.json"), &["layout", "-d", "BT"]);
    assert!(!output.status.success());
}

#[test]
fn test_layout_rejects_zero_width() {
    let output = run_binary(
        &fixture("sample_pipeline.json"),
        &["layout", "--node-width", "0"],
    );
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("node-width"), "{stderr}");
}

#[test]
fn test_layout_cyclic_still_succeeds() {
    let output = run_binary(&fixture("cycle.json"), &["layout"]);
    assert!(output.status.success());
    assert_eq!(positions(&stdout_json(&output)).len(), 3);
}

#[test]
fn test_version_flag() {
    let output = run_binary("", &["--version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("pipeline-dag "));
}
