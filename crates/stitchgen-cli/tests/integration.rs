//! Integration tests for stitchgen CLI commands.
//!
//! These run the actual binary and verify end-to-end behavior.

use std::fs;
use std::process::Command;

fn binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_stitchgen"))
}

#[test]
fn patterns_command_lists_all_families() {
    let output = binary()
        .arg("patterns")
        .output()
        .expect("failed to execute binary");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in [
        "boustrophedon-circle",
        "spiral-circle",
        "ide",
        "hilbert",
        "peano",
        "diamond-zigzag",
        "meander-tiled",
        "antenna",
        "flower",
    ] {
        assert!(stdout.contains(name), "missing pattern {name}");
    }

    // Header plus one line per family.
    assert!(stdout.lines().count() >= 17, "got:\n{stdout}");
}

#[test]
fn generate_writes_svg() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hilbert.svg");

    let output = binary()
        .args([
            "generate",
            "hilbert",
            "--order",
            "2",
            "-o",
            path.to_str().unwrap(),
        ])
        .output()
        .expect("failed to execute binary");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("<svg"));
    assert_eq!(content.matches("<polyline").count(), 2);
}

#[test]
fn generate_json_is_parseable() {
    let output = binary()
        .args(["generate", "ide", "--teeth", "6", "-f", "json"])
        .output()
        .expect("failed to execute binary");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["pattern"], "ide");
    assert!(value["total_stitch_count"].as_u64().unwrap() > 0);
    assert_eq!(value["traces"].as_array().unwrap().len(), 1);
    assert_eq!(value["traces2"].as_array().unwrap().len(), 1);
}

#[test]
fn generate_correct_removes_contacts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("boustrophedon.svg");

    let output = binary()
        .args([
            "generate",
            "boustrophedon-double",
            "--correct",
            "-o",
            path.to_str().unwrap(),
        ])
        .output()
        .expect("failed to execute binary");
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Removed"), "stderr: {stderr}");
    assert!(path.exists());
}

#[test]
fn generate_rejects_unknown_pattern() {
    let output = binary()
        .args(["generate", "no-such-pattern"])
        .output()
        .expect("failed to execute binary");
    assert!(!output.status.success());
}

#[test]
fn generate_rejects_mismatched_flag() {
    let output = binary()
        .args(["generate", "hilbert", "--teeth", "4"])
        .output()
        .expect("failed to execute binary");
    assert!(!output.status.success());
}

#[test]
fn recipe_runs_a_batch() {
    let dir = tempfile::tempdir().unwrap();
    let out_a = dir.path().join("quad.svg");
    let out_b = dir.path().join("peano.svg");

    let recipe = format!(
        r#"[
  {{ "pattern": "boustrophedon-quad-ortho", "width": 12, "output": "{}" }},
  {{ "pattern": "peano", "order": 1, "dist": 0.5, "unit": "cm", "output": "{}" }}
]"#,
        out_a.display(),
        out_b.display()
    );
    let recipe_path = dir.path().join("recipe.json");
    fs::write(&recipe_path, recipe).unwrap();

    let output = binary()
        .args(["recipe", recipe_path.to_str().unwrap()])
        .output()
        .expect("failed to execute binary");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    assert!(out_a.exists());
    assert!(out_b.exists());
}

#[test]
fn recipe_reports_failing_jobs() {
    let dir = tempfile::tempdir().unwrap();
    let recipe_path = dir.path().join("recipe.json");
    fs::write(&recipe_path, r#"[ { "pattern": "ide", "teeth": 1 } ]"#).unwrap();

    let output = binary()
        .args(["recipe", recipe_path.to_str().unwrap()])
        .output()
        .expect("failed to execute binary");
    assert!(!output.status.success());
}
