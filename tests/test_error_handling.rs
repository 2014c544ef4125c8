/// Error handling tests for malformed and invalid graph files
///
/// Tests that the program fails gracefully with clear error messages
/// when given invalid or malformed input files.
use anyhow::Result;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

/// Run partree on `contents` and return (success, stderr)
fn run_on(contents: &str) -> Result<(bool, String)> {
    run_with(&[], contents)
}

fn run_with(args: &[&str], contents: &str) -> Result<(bool, String)> {
    let temp_dir = TempDir::new()?;
    let graph = temp_dir.path().join("graph.txt");
    fs::write(&graph, contents)?;

    let output = Command::new(env!("CARGO_BIN_EXE_partree"))
        .args(args)
        .arg(&graph)
        .output()?;

    Ok((
        output.status.success(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
    ))
}

#[test]
fn test_empty_file_error() -> Result<()> {
    let (ok, stderr) = run_on("")?;
    assert!(!ok, "Empty file should cause error");
    assert!(stderr.contains("no vertex count"), "got: {stderr}");
    Ok(())
}

#[test]
fn test_missing_file_error() -> Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_partree"))
        .arg("/nonexistent/graph.txt")
        .output()?;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to open graph file"), "got: {stderr}");
    Ok(())
}

#[test]
fn test_unknown_vertex_names_line() -> Result<()> {
    let (ok, stderr) = run_on("2\nA\nB\nA C 4\n")?;
    assert!(!ok);
    assert!(stderr.contains("Line 4"), "got: {stderr}");
    assert!(stderr.contains("Unknown vertex 'C'"), "got: {stderr}");
    Ok(())
}

#[test]
fn test_invalid_weight() -> Result<()> {
    let (ok, stderr) = run_on("2\nA\nB\nA B 1.5\n")?;
    assert!(!ok, "Integer mode should reject fractional weights");
    assert!(stderr.contains("invalid weight '1.5'"), "got: {stderr}");
    Ok(())
}

#[test]
fn test_negative_weight() -> Result<()> {
    let (ok, stderr) = run_on("2\nA\nB\nA B -1\n")?;
    assert!(!ok);
    assert!(stderr.contains("Negative weight"), "got: {stderr}");
    Ok(())
}

#[test]
fn test_non_finite_float_weight() -> Result<()> {
    for token in ["NaN", "inf"] {
        let (ok, stderr) = run_with(&["--float"], &format!("2\nA\nB\nA B {token}\n"))?;
        assert!(!ok, "{token} should be rejected");
        assert!(stderr.contains("Non-finite weight"), "got: {stderr}");
    }
    Ok(())
}

#[test]
fn test_total_weight_overflow() -> Result<()> {
    let max = i64::MAX;
    let (ok, stderr) = run_on(&format!("3\nA\nB\nC\nA B {max}\nB C {max}\n"))?;
    assert!(!ok, "Overflowing total should fail instead of panicking");
    assert!(stderr.contains("overflows the weight type"), "got: {stderr}");
    assert!(!stderr.contains("panicked"), "got: {stderr}");
    Ok(())
}

#[test]
fn test_truncated_vertex_list() -> Result<()> {
    let (ok, stderr) = run_on("4\nA\nB\n")?;
    assert!(!ok);
    assert!(stderr.contains("declares 4 vertices"), "got: {stderr}");
    Ok(())
}

#[test]
fn test_isolated_vertex_is_disconnected() -> Result<()> {
    let (ok, stderr) = run_on("3\nA\nB\nC\nA B 1\n")?;
    assert!(!ok);
    assert!(stderr.contains("graph is disconnected"), "got: {stderr}");
    Ok(())
}

#[test]
fn test_self_loop_warns_but_succeeds() -> Result<()> {
    let (ok, stderr) = run_on("2\nA\nB\nA A 1\nA B 2\n")?;
    assert!(ok);
    assert!(stderr.contains("Self-loop"), "got: {stderr}");
    Ok(())
}
