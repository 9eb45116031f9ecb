//! inline-cite: detect parenthesised citation links in inline Markdown nodes.
//!
//! This library provides functionality to:
//! - Model a flat sequence of parsed inline nodes
//! - Detect links written inside literal parentheses (citations)
//! - Strip the now-redundant parentheses from the neighboring text nodes
//! - Load node sequences from JSON / JSONL and render the result back out

pub mod citation;
pub mod inline;
pub mod nodes;
pub mod output;
pub mod style;

pub use citation::{
    detect_and_strip, detect_citations, is_citation_at, strip_citations, CitationPass, LinkInfo,
};
pub use inline::InlineNode;
pub use nodes::{load_nodes, parse_nodes};
pub use output::{render_markdown, to_json};
pub use style::{builtin_style, load_style, CitationStyle};
