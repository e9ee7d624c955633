//! Treeviz formatter for shortcode forests
//!
//! Treeviz is a one line per node view of the forest, handy for eyeballing how markup
//! was nested (and how recovery reshaped it).
//!
//! The format is:
//! <prefix><connector> <icon> <label>
//!
//! Example:
//!
//! ├─ ▣ box size="l"
//! │ ├─ ◦ some text
//! │ └─ ▪ row
//! └─ ◦ trailing
//!
//! Icons
//!     Text: ◦
//!     Open: ▣
//!     SelfClosing: ▪
//!     Close: ⊘
//!     Root: ⧉
//!
//! Labels longer than the configured width are cut and end in "...".

use super::registry::{FormatError, Formatter};
use crate::shortcodes::ast::Node;
use crate::shortcodes::token::Token;

/// Default label width, in characters
pub const DEFAULT_LABEL_WIDTH: usize = 30;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn icon(node: &Node) -> &'static str {
    match node.token() {
        Token::Text { .. } => "◦",
        Token::Open(_) => "▣",
        Token::SelfClosing(_) => "▪",
        Token::Close(_) => "⊘",
        Token::Root => "⧉",
    }
}

fn label(node: &Node) -> String {
    match node.token() {
        Token::Text { body, .. } => body.split_whitespace().collect::<Vec<_>>().join(" "),
        Token::Root => "root".to_string(),
        Token::Open(tag) | Token::Close(tag) | Token::SelfClosing(tag) => {
            format!("{}{}", tag.name(), tag.params().to_shortcode_string())
        }
    }
}

/// Render a forest with the default label width
pub fn to_treeviz_str(forest: &[Node]) -> String {
    to_treeviz_str_with_width(forest, DEFAULT_LABEL_WIDTH)
}

/// Render a forest, cutting labels at `width` characters
///
/// The walk keeps its own stack, so the depth of the forest is bounded by memory only.
pub fn to_treeviz_str_with_width(forest: &[Node], width: usize) -> String {
    let mut result = String::new();
    let mut prefix = String::new();
    // byte length of `prefix` for each depth on the current path
    let mut marks = vec![0];
    let mut stack: Vec<Line<'_>> = siblings(forest, 0).collect();

    while let Some(Line {
        node,
        depth,
        is_last,
    }) = stack.pop()
    {
        prefix.truncate(marks[depth]);
        marks.truncate(depth + 1);

        let connector = if is_last { "└─" } else { "├─" };
        result.push_str(&prefix);
        result.push_str(connector);
        result.push(' ');
        result.push_str(icon(node));
        result.push(' ');
        result.push_str(&truncate(&label(node), width));
        result.push('\n');

        prefix.push_str(if is_last { "  " } else { "│ " });
        marks.push(prefix.len());
        stack.extend(siblings(node.children(), depth + 1));
    }

    result
}

struct Line<'a> {
    node: &'a Node,
    depth: usize,
    is_last: bool,
}

/// Lines for `nodes` in reverse, ready to be pushed on the walk stack
fn siblings(nodes: &[Node], depth: usize) -> impl Iterator<Item = Line<'_>> {
    let last = nodes.len().saturating_sub(1);
    nodes.iter().enumerate().rev().map(move |(i, node)| Line {
        node,
        depth,
        is_last: i == last,
    })
}

/// Formatter for the treeviz view
#[derive(Debug, Clone, Copy)]
pub struct TreevizFormatter {
    label_width: usize,
}

impl TreevizFormatter {
    pub fn with_label_width(label_width: usize) -> Self {
        Self { label_width }
    }
}

impl Default for TreevizFormatter {
    fn default() -> Self {
        Self::with_label_width(DEFAULT_LABEL_WIDTH)
    }
}

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, forest: &[Node]) -> Result<String, FormatError> {
        Ok(to_treeviz_str_with_width(forest, self.label_width))
    }

    fn description(&self) -> &str {
        "One line per node tree view"
    }
}
