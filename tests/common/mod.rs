//! Shared test constants and helpers for integration tests.

#![allow(dead_code)]

/// A sentence with one citation, as a JSON node array.
///
/// Processing it yields citation index 1 and strips the parentheses from
/// nodes 0 and 2.
pub const CITED_SENTENCE: &str = r#"[
  {"kind": "text", "content": "See ("},
  {"kind": "link", "destination": "https://example.com", "children": [{"kind": "text", "content": "this"}]},
  {"kind": "text", "content": ") for details."}
]"#;

/// The same sentence as [`CITED_SENTENCE`], one node per line.
pub const CITED_SENTENCE_JSONL: &str = r#"{"kind": "text", "content": "See ("}
{"kind": "link", "destination": "https://example.com", "children": [{"kind": "text", "content": "this"}]}
{"kind": "text", "content": ") for details."}"#;

/// Build a JSON node array from a compact description.
///
/// Each entry is either `@url|label` for a link or plain text for a text node.
pub fn build_nodes(parts: &[&str]) -> String {
    let nodes: Vec<serde_json::Value> = parts
        .iter()
        .map(|part| match part.strip_prefix('@') {
            Some(link) => {
                let (url, label) = link.split_once('|').unwrap_or((link, link));
                serde_json::json!({
                    "kind": "link",
                    "destination": url,
                    "children": [{"kind": "text", "content": label}],
                })
            }
            None => serde_json::json!({"kind": "text", "content": part}),
        })
        .collect();
    serde_json::to_string(&nodes).unwrap()
}
