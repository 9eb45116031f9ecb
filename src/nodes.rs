//! Inline node sequence loading.
//!
//! Handles loading node sequences from JSON files, supporting
//! a JSON array of nodes, a single node object, and JSONL
//! (one node object per line).

use std::fs;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::inline::InlineNode;

/// Errors that can occur when loading a node sequence.
#[derive(Error, Debug)]
pub enum NodesError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid node JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid JSONL at line {line}: {message}")]
    JsonlError { line: usize, message: String },

    #[error("Node sequence must be a JSON array, an object or JSONL, got {0}")]
    NotAnArray(&'static str),
}

/// Loads an inline node sequence from a JSON or JSONL file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not describe nodes.
pub fn load_nodes(path: &Path) -> Result<Vec<InlineNode>, NodesError> {
    let content = fs::read_to_string(path)?;
    let nodes = parse_nodes(&content)?;
    debug!(path = %path.display(), nodes = nodes.len(), "loaded inline nodes");
    Ok(nodes)
}

/// Parses an inline node sequence.
///
/// Supports three input formats:
/// - JSON array: `[{"kind": "text", ...}, {"kind": "link", ...}]`
/// - a single node object, which yields a one-element sequence
/// - JSONL: `{"kind": "text", ...}\n{"kind": "link", ...}`
///
/// Empty or whitespace-only input is an empty sequence.
pub fn parse_nodes(content: &str) -> Result<Vec<InlineNode>, NodesError> {
    let trimmed = content.trim();

    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        return Ok(serde_json::from_str(trimmed)?);
    }

    // A whole-document value is either one node or a scalar we cannot use;
    // anything that fails to parse as one value is treated as JSONL.
    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return match value {
            Value::Object(_) => Ok(vec![serde_json::from_value(value)?]),
            other => Err(NodesError::NotAnArray(json_type_name(&other))),
        };
    }

    let mut nodes = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<InlineNode>(line) {
            Ok(node) => nodes.push(node),
            Err(e) => {
                return Err(NodesError::JsonlError {
                    line: line_num + 1, // 1-indexed line numbers
                    message: e.to_string(),
                });
            }
        }
    }

    Ok(nodes)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
