//! Output generation for processed node sequences.
//!
//! The processed sequence is either re-emitted as inline Markdown, with each
//! citation link wrapped in the markers of a [`CitationStyle`], or dumped as a
//! JSON report carrying both the citation indices and the rewritten nodes.

use crate::citation::CitationPass;
use crate::inline::InlineNode;
use crate::style::CitationStyle;

/// Renders the processed sequence of `pass` back to inline Markdown.
///
/// Citation links are wrapped in the prefix and suffix of `style`; every other
/// node is written as plain CommonMark. Literal text is escaped so it never
/// turns into markup; raw HTML and the style markers are written as-is.
pub fn render_markdown(pass: &CitationPass, style: &CitationStyle) -> String {
    let mut output = String::new();

    for (index, node) in pass.processed_nodes().iter().enumerate() {
        let mut rendered = String::new();
        write_node(&mut rendered, node);

        if pass.is_citation(index) {
            output.push_str(&style.wrap(&rendered));
        } else {
            output.push_str(&rendered);
        }
    }

    output
}

/// Serializes `pass` as a pretty-printed JSON report.
///
/// The report has two keys: `citations` (ascending indices) and
/// `processed_nodes` (the rewritten sequence).
pub fn to_json(pass: &CitationPass) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(pass)
}

fn write_nodes(out: &mut String, nodes: &[InlineNode]) {
    for node in nodes {
        write_node(out, node);
    }
}

fn write_node(out: &mut String, node: &InlineNode) {
    match node {
        InlineNode::Text { content } => write_escaped(out, content),
        InlineNode::Html { content } => out.push_str(content),
        InlineNode::Link {
            destination,
            children,
        } => {
            out.push('[');
            write_nodes(out, children);
            out.push(']');
            write_destination(out, destination.as_deref());
        }
        InlineNode::Emphasis { children } => write_delimited(out, "*", children),
        InlineNode::Strong { children } => write_delimited(out, "**", children),
        InlineNode::Strikethrough { children } => write_delimited(out, "~~", children),
        InlineNode::Code { content } => write_code_span(out, content),
        InlineNode::Image { source, alt } => {
            out.push_str("![");
            write_nodes(out, alt);
            out.push(']');
            write_destination(out, source.as_deref());
        }
        InlineNode::SoftBreak => out.push('\n'),
        InlineNode::LineBreak => out.push_str("\\\n"),
    }
}

/// Characters that would otherwise open or close inline markup.
const ESCAPED_CHARS: &[char] = &['\\', '`', '*', '_', '[', ']', '<', '>', '~'];

/// Writes literal text, backslash-escaping inline markup characters.
fn write_escaped(out: &mut String, content: &str) {
    for c in content.chars() {
        if ESCAPED_CHARS.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
}

/// Writes `(destination)` after a link or image label; nothing when absent.
///
/// Destinations with whitespace, angle brackets, backslashes or unbalanced
/// parentheses use the `<...>` form.
fn write_destination(out: &mut String, destination: Option<&str>) {
    let Some(destination) = destination else {
        return;
    };

    out.push('(');
    if needs_angle_brackets(destination) {
        out.push('<');
        for c in destination.chars() {
            if matches!(c, '<' | '>' | '\\') {
                out.push('\\');
            }
            out.push(c);
        }
        out.push('>');
    } else {
        out.push_str(destination);
    }
    out.push(')');
}

fn needs_angle_brackets(destination: &str) -> bool {
    let mut depth: usize = 0;
    for c in destination.chars() {
        match c {
            '(' => depth += 1,
            ')' => match depth.checked_sub(1) {
                Some(rest) => depth = rest,
                None => return true,
            },
            '<' | '>' | '\\' => return true,
            c if c.is_whitespace() || c.is_control() => return true,
            _ => {}
        }
    }
    depth != 0
}

fn write_delimited(out: &mut String, delimiter: &str, children: &[InlineNode]) {
    out.push_str(delimiter);
    write_nodes(out, children);
    out.push_str(delimiter);
}

/// Writes a code span, using a backtick fence longer than any backtick run in
/// the content.
fn write_code_span(out: &mut String, content: &str) {
    let longest_run = content
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest_run + 1);
    let padded = content.starts_with('`') || content.ends_with('`');

    out.push_str(&fence);
    if padded {
        out.push(' ');
    }
    out.push_str(content);
    if padded {
        out.push(' ');
    }
    out.push_str(&fence);
}
