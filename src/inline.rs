//! Inline node model.
//!
//! A flat sequence of these nodes is what an inline Markdown parser hands over
//! for one level of content (a paragraph, a heading, the children of a link).
//! Serialized with an internal `kind` tag, e.g.
//! `{"kind": "link", "destination": "https://example.com", "children": [...]}`.

use serde::{Deserialize, Serialize};

/// One element of parsed, non-block Markdown content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InlineNode {
    /// A run of literal text.
    Text { content: String },
    /// A hyperlink. The destination is absent for unresolved references.
    Link {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        destination: Option<String>,
        #[serde(default)]
        children: Vec<InlineNode>,
    },
    Emphasis {
        #[serde(default)]
        children: Vec<InlineNode>,
    },
    Strong {
        #[serde(default)]
        children: Vec<InlineNode>,
    },
    Strikethrough {
        #[serde(default)]
        children: Vec<InlineNode>,
    },
    Code { content: String },
    Image {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source: Option<String>,
        #[serde(default)]
        alt: Vec<InlineNode>,
    },
    Html { content: String },
    SoftBreak,
    LineBreak,
}

impl InlineNode {
    /// Builds a text node.
    pub fn text(content: impl Into<String>) -> Self {
        InlineNode::Text {
            content: content.into(),
        }
    }

    /// Builds a link node.
    pub fn link(destination: Option<&str>, children: Vec<InlineNode>) -> Self {
        InlineNode::Link {
            destination: destination.map(str::to_string),
            children,
        }
    }

    /// Returns the content of a text node, `None` for every other kind.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            InlineNode::Text { content } => Some(content),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, InlineNode::Text { .. })
    }

    pub fn is_link(&self) -> bool {
        matches!(self, InlineNode::Link { .. })
    }

    /// Link destination, if this is a link that has one.
    pub fn destination(&self) -> Option<&str> {
        match self {
            InlineNode::Link { destination, .. } => destination.as_deref(),
            _ => None,
        }
    }

    /// Snake-case name of the variant, as used by the `kind` tag.
    pub fn kind_name(&self) -> &'static str {
        match self {
            InlineNode::Text { .. } => "text",
            InlineNode::Link { .. } => "link",
            InlineNode::Emphasis { .. } => "emphasis",
            InlineNode::Strong { .. } => "strong",
            InlineNode::Strikethrough { .. } => "strikethrough",
            InlineNode::Code { .. } => "code",
            InlineNode::Image { .. } => "image",
            InlineNode::Html { .. } => "html",
            InlineNode::SoftBreak => "soft_break",
            InlineNode::LineBreak => "line_break",
        }
    }

    /// The text a reader would see for this node, with all markup dropped.
    ///
    /// Breaks become a single space; raw HTML contributes nothing.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.push_plain_text(&mut out);
        out
    }

    fn push_plain_text(&self, out: &mut String) {
        match self {
            InlineNode::Text { content } | InlineNode::Code { content } => out.push_str(content),
            InlineNode::Link { children, .. }
            | InlineNode::Emphasis { children }
            | InlineNode::Strong { children }
            | InlineNode::Strikethrough { children }
            | InlineNode::Image { alt: children, .. } => {
                for child in children {
                    child.push_plain_text(out);
                }
            }
            InlineNode::Html { .. } => {}
            InlineNode::SoftBreak | InlineNode::LineBreak => out.push(' '),
        }
    }
}
