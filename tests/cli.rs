//! CLI integration tests.
//!
//! Tests the command-line interface by running the binary as a subprocess.

mod common;

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tempfile::NamedTempFile;

use common::{build_nodes, CITED_SENTENCE, CITED_SENTENCE_JSONL};

/// Path to the compiled binary
fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_inline-cite"))
}

/// Helper to create a temporary file with content
fn create_temp_file(content: &str, extension: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(extension)
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

// ============================================
// Tests for CLI argument parsing
// ============================================

#[test]
fn test_cli_help() {
    let output = Command::new(binary_path())
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("inline-cite") || stdout.contains("citation"),
        "Help should mention the tool name or purpose: {}",
        stdout
    );
    assert!(output.status.success(), "Help should exit with success");
}

#[test]
fn test_cli_process_missing_args() {
    let output = Command::new(binary_path())
        .args(["process"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Process without args should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("required") || stderr.contains("Usage"),
        "Should indicate missing required arguments: {}",
        stderr
    );
}

// ============================================
// Tests for process command
// ============================================

#[test]
fn test_cli_process_basic() {
    // Given: a node file with one citation
    let nodes_file = create_temp_file(CITED_SENTENCE, ".json");

    // When: We run the process command with the default style
    let output = Command::new(binary_path())
        .args(["process", nodes_file.path().to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    // Then: The parentheses are replaced by superscript markers
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        output.status.success(),
        "Process should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        stdout.trim_end(),
        "See <sup>[this](https://example.com)</sup> for details."
    );
}

#[test]
fn test_cli_process_builtin_style() {
    let nodes_file = create_temp_file(CITED_SENTENCE, ".json");

    let output = Command::new(binary_path())
        .args([
            "process",
            nodes_file.path().to_str().unwrap(),
            "--style",
            "bracket",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim_end(),
        "See [[this](https://example.com)] for details."
    );
}

#[test]
fn test_cli_process_style_file() {
    // Given: a TOML style file
    let nodes_file = create_temp_file(CITED_SENTENCE, ".json");
    let style_file = create_temp_file("name = \"cite\"\nprefix = \"{\"\nsuffix = \"}\"\n", ".toml");

    // When: We pass its path as the style
    let output = Command::new(binary_path())
        .args([
            "process",
            nodes_file.path().to_str().unwrap(),
            "-s",
            style_file.path().to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    // Then: its markers wrap the citation
    assert!(
        output.status.success(),
        "Process should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim_end(),
        "See {[this](https://example.com)} for details."
    );
}

#[test]
fn test_cli_process_json_format() {
    // Given: two citations sharing a text node
    let nodes = build_nodes(&["a(", "@u1|x", ")(", "@u2|y", ")b"]);
    let nodes_file = create_temp_file(&nodes, ".json");

    // When: We ask for the JSON report
    let output = Command::new(binary_path())
        .args([
            "process",
            nodes_file.path().to_str().unwrap(),
            "--format",
            "json",
        ])
        .output()
        .expect("Failed to execute command");

    // Then: both indices are reported and the shared node is emptied
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["citations"], serde_json::json!([1, 3]));
    assert_eq!(report["processed_nodes"][0]["content"], "a");
    assert_eq!(report["processed_nodes"][2]["content"], "");
    assert_eq!(report["processed_nodes"][4]["content"], "b");
}

#[test]
fn test_cli_process_stdin_jsonl() {
    // Given: JSONL nodes piped through stdin
    let mut child = Command::new(binary_path())
        .args(["process", "-", "--style", "plain"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn command");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(CITED_SENTENCE_JSONL.as_bytes())
        .unwrap();

    // When: the process completes
    let output = child.wait_with_output().unwrap();

    // Then: the plain style simply drops the parentheses
    assert!(
        output.status.success(),
        "Process should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim_end(), "See [this](https://example.com) for details.");
}

#[test]
fn test_cli_process_output_file() {
    let nodes_file = create_temp_file(CITED_SENTENCE, ".json");
    let output_file = tempfile::Builder::new().suffix(".md").tempfile().unwrap();

    let output = Command::new(binary_path())
        .args([
            "process",
            nodes_file.path().to_str().unwrap(),
            "-o",
            output_file.path().to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(
        output.status.success(),
        "Process should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("processed 1 citation(s)"),
        "Should report the citation count: {}",
        stderr
    );

    let file_content = fs::read_to_string(output_file.path()).unwrap();
    assert_eq!(
        file_content,
        "See <sup>[this](https://example.com)</sup> for details."
    );
}

// ============================================
// Tests for detect command
// ============================================

#[test]
fn test_cli_detect_lists_links() {
    // Given: a plain link and a citation
    let nodes = build_nodes(&["Read ", "@https://a.org|docs", " first (", "@https://b.org|FAQ", ")."]);
    let nodes_file = create_temp_file(&nodes, ".json");

    // When: We run detect
    let output = Command::new(binary_path())
        .args(["detect", nodes_file.path().to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    // Then: one line per link, flagged
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec!["1\tlink\thttps://a.org\tdocs", "3\tcitation\thttps://b.org\tFAQ"]
    );
}

// ============================================
// Tests for styles command
// ============================================

#[test]
fn test_cli_styles_lists_builtins() {
    let output = Command::new(binary_path())
        .arg("styles")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in ["superscript", "bracket", "paren", "plain"] {
        assert!(
            stdout.lines().any(|line| line == name),
            "styles should list '{}': {}",
            name,
            stdout
        );
    }
}

// ============================================
// Tests for exit codes
// ============================================

#[test]
fn test_cli_exit_code_missing_input() {
    let output = Command::new(binary_path())
        .args(["process", "/nonexistent/path/nodes.json"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(10));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("hint: verify the file path"), "{}", stderr);
}

#[test]
fn test_cli_exit_code_unreadable_input() {
    // Given: a directory where a node file is expected
    let dir = tempfile::tempdir().unwrap();

    // When: We try to process it
    let output = Command::new(binary_path())
        .args(["detect", dir.path().to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    // Then: the read failure is reported as an input-file error
    assert_eq!(output.status.code(), Some(10));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to read file"), "{}", stderr);
}

#[test]
fn test_cli_exit_code_invalid_stdin_nodes() {
    let mut child = Command::new(binary_path())
        .args(["process", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn command");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"42")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert_eq!(output.status.code(), Some(11));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("got a number"), "{}", stderr);
}

#[test]
fn test_cli_exit_code_invalid_nodes() {
    let nodes_file = create_temp_file(r#"[{"kind": "footnote"}]"#, ".json");

    let output = Command::new(binary_path())
        .args(["process", nodes_file.path().to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(11));
}

#[test]
fn test_cli_exit_code_unknown_style() {
    let nodes_file = create_temp_file(CITED_SENTENCE, ".json");

    let output = Command::new(binary_path())
        .args([
            "process",
            nodes_file.path().to_str().unwrap(),
            "--style",
            "no-such-style",
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(12));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("available builtin styles: superscript"),
        "Should list builtin styles: {}",
        stderr
    );
}

#[test]
fn test_cli_exit_code_invalid_style_file() {
    let nodes_file = create_temp_file(CITED_SENTENCE, ".json");
    let style_file = create_temp_file("prefix = [1, 2]\n", ".toml");

    let output = Command::new(binary_path())
        .args([
            "process",
            nodes_file.path().to_str().unwrap(),
            "--style",
            style_file.path().to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(12));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid citation style"), "{}", stderr);
}

#[test]
fn test_cli_exit_code_unwritable_output() {
    let nodes_file = create_temp_file(CITED_SENTENCE, ".json");

    let output = Command::new(binary_path())
        .args([
            "process",
            nodes_file.path().to_str().unwrap(),
            "-o",
            "/nonexistent/dir/out.md",
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(15));
}
