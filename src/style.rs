//! Citation marker styles.
//!
//! A style decides what surrounds a citation link once its parentheses have
//! been stripped. Styles are either built in or loaded from a TOML file:
//!
//! ```toml
//! name = "footnote"
//! prefix = "<sup>"
//! suffix = "</sup>"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading styles.
#[derive(Error, Debug)]
pub enum StyleError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid style TOML: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// How a citation link is marked in rendered output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CitationStyle {
    /// Display name of the style
    pub name: String,
    /// Text emitted before the citation link
    pub prefix: String,
    /// Text emitted after the citation link
    pub suffix: String,
}

impl Default for CitationStyle {
    fn default() -> Self {
        CitationStyle {
            name: "custom".to_string(),
            prefix: String::new(),
            suffix: String::new(),
        }
    }
}

impl CitationStyle {
    /// Wraps an already-rendered citation in this style's markers.
    pub fn wrap(&self, rendered: &str) -> String {
        format!("{}{}{}", self.prefix, rendered, self.suffix)
    }
}

/// Loads a citation style from a TOML file.
///
/// Missing keys fall back to an empty prefix and suffix.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid style.
pub fn load_style(path: &Path) -> Result<CitationStyle, StyleError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Single source of truth for builtin styles: (name, prefix, suffix).
const BUILTIN_STYLES: &[(&str, &str, &str)] = &[
    ("superscript", "<sup>", "</sup>"),
    ("bracket", "[", "]"),
    ("paren", "(", ")"),
    ("plain", "", ""),
];

/// Name of the style used when none is requested.
pub const DEFAULT_STYLE: &str = "superscript";

/// Returns a built-in style by name.
pub fn builtin_style(name: &str) -> Option<CitationStyle> {
    BUILTIN_STYLES
        .iter()
        .find(|(n, _, _)| *n == name)
        .map(|(n, prefix, suffix)| CitationStyle {
            name: n.to_string(),
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
        })
}

/// Returns the list of available builtin style names.
pub fn builtin_style_names() -> Vec<&'static str> {
    BUILTIN_STYLES.iter().map(|(n, _, _)| *n).collect()
}
