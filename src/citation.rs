//! Citation detection and parenthesis stripping.
//!
//! A citation is a link written inside literal parentheses, e.g.
//! `(see [this](https://example.com))`. After inline parsing this shows up as a
//! text node ending in `(`, the link, and a text node starting with `)`.
//! Citations get their own styling, so the parentheses around them are removed
//! from the neighboring text nodes.
//!
//! Detection and stripping are separate passes: every candidate link is judged
//! against the original neighbor content before any text is edited, so the
//! outcome never depends on the order citations are visited in.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::{debug, trace};

use crate::inline::InlineNode;

/// Character a text node must end with for the following link to be a citation.
pub const OPENING_PAREN: char = '(';
/// Character a text node must start with for the preceding link to be a citation.
pub const CLOSING_PAREN: char = ')';

/// Result of running detection and stripping over one node sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CitationPass {
    citations: BTreeSet<usize>,
    processed_nodes: Vec<InlineNode>,
}

/// A link in the processed sequence together with its citation status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkInfo<'a> {
    /// Position of the link in the sequence
    pub index: usize,
    /// Destination URL of the link, if any
    pub destination: Option<&'a str>,
    /// Whether the link was written inside parentheses
    pub is_citation: bool,
}

impl CitationPass {
    /// Indices of the links that are citations, in ascending order.
    pub fn citations(&self) -> &BTreeSet<usize> {
        &self.citations
    }

    /// The input sequence with the citation parentheses removed.
    pub fn processed_nodes(&self) -> &[InlineNode] {
        &self.processed_nodes
    }

    /// Whether the node at `index` is a citation link.
    pub fn is_citation(&self, index: usize) -> bool {
        self.citations.contains(&index)
    }

    /// Every link of the processed sequence, in order, flagged with its
    /// citation status.
    pub fn links(&self) -> impl Iterator<Item = LinkInfo<'_>> + '_ {
        self.processed_nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.is_link())
            .map(|(index, node)| LinkInfo {
                index,
                destination: node.destination(),
                is_citation: self.citations.contains(&index),
            })
    }

    /// Splits the pass into its citation indices and processed nodes.
    pub fn into_parts(self) -> (BTreeSet<usize>, Vec<InlineNode>) {
        (self.citations, self.processed_nodes)
    }
}

/// Returns true when `nodes[index]` is a link sitting between a text node
/// ending in `(` and a text node starting with `)`.
///
/// Out-of-range indices and non-link nodes are never citations.
pub fn is_citation_at(nodes: &[InlineNode], index: usize) -> bool {
    if !nodes.get(index).is_some_and(InlineNode::is_link) {
        return false;
    }

    let has_preceding_paren = index
        .checked_sub(1)
        .is_some_and(|prev| text_ends_with_open(nodes, prev));
    let has_following_paren = text_starts_with_close(nodes, index + 1);

    has_preceding_paren && has_following_paren
}

/// Finds the indices of all citation links in `nodes`.
///
/// Only direct siblings are considered; children of links and emphasis spans
/// are not searched.
pub fn detect_citations(nodes: &[InlineNode]) -> BTreeSet<usize> {
    (0..nodes.len())
        .filter(|&index| is_citation_at(nodes, index))
        .collect()
}

/// Copies `nodes`, removing the trailing `(` before and the leading `)` after
/// each index in `citations`.
///
/// A text node shared by two citations loses both its first and last
/// character; both edits are planned against its original content and applied
/// together. Neighbors that are not text nodes carrying the expected
/// parenthesis are left alone, so arbitrary index sets are accepted.
pub fn strip_citations(nodes: &[InlineNode], citations: &BTreeSet<usize>) -> Vec<InlineNode> {
    let mut plan: BTreeMap<usize, Trim> = BTreeMap::new();

    for &citation in citations {
        if let Some(prev) = citation.checked_sub(1) {
            if text_ends_with_open(nodes, prev) {
                plan.entry(prev).or_default().trailing = true;
            }
        }
        if let Some(next) = citation.checked_add(1) {
            if text_starts_with_close(nodes, next) {
                plan.entry(next).or_default().leading = true;
            }
        }
    }

    let mut processed = nodes.to_vec();
    for (index, trim) in plan {
        if let Some(InlineNode::Text { content }) = nodes.get(index) {
            let stripped = trim.apply(content);
            trace!(index, original = %content, stripped, "stripping citation parentheses");
            processed[index] = InlineNode::text(stripped);
        }
    }

    processed
}

/// Runs detection over `nodes`, then strips the parentheses around every
/// citation found.
///
/// The input is never modified. The processed sequence always has the same
/// length as the input and the same node kinds at the same positions.
///
/// # Examples
///
/// ```
/// use inline_cite::{detect_and_strip, InlineNode};
///
/// let nodes = vec![
///     InlineNode::text("See ("),
///     InlineNode::link(Some("https://example.com"), vec![InlineNode::text("this")]),
///     InlineNode::text(") for details."),
/// ];
///
/// let pass = detect_and_strip(&nodes);
/// assert!(pass.is_citation(1));
/// assert_eq!(pass.processed_nodes()[0], InlineNode::text("See "));
/// assert_eq!(pass.processed_nodes()[2], InlineNode::text(" for details."));
/// ```
pub fn detect_and_strip(nodes: &[InlineNode]) -> CitationPass {
    let citations = detect_citations(nodes);

    for &index in &citations {
        debug!(
            index,
            destination = ?nodes[index].destination(),
            label = %nodes[index].plain_text(),
            "detected citation"
        );
    }

    let processed_nodes = strip_citations(nodes, &citations);

    debug!(
        nodes = nodes.len(),
        citations = citations.len(),
        "citation pass complete"
    );

    CitationPass {
        citations,
        processed_nodes,
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Trim {
    leading: bool,
    trailing: bool,
}

impl Trim {
    fn apply(self, content: &str) -> &str {
        let mut rest = content;
        if self.leading {
            rest = rest.strip_prefix(CLOSING_PAREN).unwrap_or(rest);
        }
        if self.trailing {
            rest = rest.strip_suffix(OPENING_PAREN).unwrap_or(rest);
        }
        rest
    }
}

fn text_ends_with_open(nodes: &[InlineNode], index: usize) -> bool {
    nodes
        .get(index)
        .and_then(InlineNode::as_text)
        .is_some_and(|text| text.ends_with(OPENING_PAREN))
}

fn text_starts_with_close(nodes: &[InlineNode], index: usize) -> bool {
    nodes
        .get(index)
        .and_then(InlineNode::as_text)
        .is_some_and(|text| text.starts_with(CLOSING_PAREN))
}
