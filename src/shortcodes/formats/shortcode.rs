//! Shortcode serializer
//!
//!     Renders a node and its subtree back to shortcode text, one node per line:
//!
//!         [box size="l"]
//!           [row]
//!           some text
//!         [/box]
//!
//!     Text renders trimmed. A tag with children renders its open line, then each child
//!     indented by two spaces per `level`, then a close line indented by `level - 1`.
//!     Childless tags render as a single open line. Values render by kind: strings
//!     double-quoted, booleans as `yes`/`no`, numbers bare.
//!
//!     Template building renders a node with every `{slot}` marker replaced by the
//!     concatenated renderings of its children, working bottom-up so nested tags get
//!     their own slots filled first.
//!
//!     Both walks keep their own work stack, so nesting depth is bounded by memory, not
//!     by the call stack.

use super::registry::{FormatError, Formatter};
use crate::shortcodes::ast::Node;
use crate::shortcodes::token::{Params, Token};

/// Marker replaced by rendered children in [`build_template`]
pub const SLOT: &str = "{slot}";

/// Parameters to render a node with, in place of its own
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderParams<'a> {
    /// Render these params instead of the node's
    Map(&'a Params),
    /// Emit this text after a single space, trimmed
    Raw(&'a str),
}

impl<'a> From<&'a Params> for RenderParams<'a> {
    fn from(params: &'a Params) -> Self {
        RenderParams::Map(params)
    }
}

impl<'a> From<&'a str> for RenderParams<'a> {
    fn from(raw: &'a str) -> Self {
        RenderParams::Raw(raw)
    }
}

enum Frame<'a> {
    Open {
        node: &'a Node,
        params: Option<RenderParams<'a>>,
        level: usize,
        indent: usize,
    },
    Close {
        name: &'a str,
        indent: usize,
    },
}

fn params_string(node: &Node, params: Option<RenderParams<'_>>) -> String {
    match params {
        Some(RenderParams::Map(params)) => params.to_shortcode_string(),
        Some(RenderParams::Raw(raw)) => format!(" {}", raw.trim()),
        None => node.params().to_shortcode_string(),
    }
}

fn push_indent(out: &mut String, indent: usize) {
    for _ in 0..indent {
        out.push_str("  ");
    }
}

/// Render `node` as shortcode text.
///
/// `params` replaces the node's own parameters for this call only; descendants always
/// render their own. `level` is the nesting level of `node` (1 for a top-level node).
pub fn render(node: &Node, params: Option<RenderParams<'_>>, level: usize) -> String {
    let mut out = String::new();
    let mut stack = vec![Frame::Open {
        node,
        params,
        level,
        indent: 0,
    }];

    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Close { name, indent } => {
                push_indent(&mut out, indent);
                out.push_str("[/");
                out.push_str(name);
                out.push_str("]\n");
            }
            Frame::Open {
                node,
                params,
                level,
                indent,
            } => {
                push_indent(&mut out, indent);
                match node.token() {
                    Token::Text { body, .. } => {
                        out.push_str(body.trim());
                        out.push('\n');
                    }
                    Token::Close(tag) => {
                        out.push_str("[/");
                        out.push_str(tag.name());
                        out.push_str("]\n");
                    }
                    Token::Root => {
                        stack.extend(node.children().iter().rev().map(|child| Frame::Open {
                            node: child,
                            params: None,
                            level,
                            indent: 0,
                        }));
                    }
                    Token::Open(tag) | Token::SelfClosing(tag) => {
                        out.push('[');
                        out.push_str(tag.name());
                        out.push_str(&params_string(node, params));
                        out.push_str("]\n");

                        if node.has_children() {
                            stack.push(Frame::Close {
                                name: tag.name(),
                                indent: level.saturating_sub(1),
                            });
                            stack.extend(node.children().iter().rev().map(|child| {
                                Frame::Open {
                                    node: child,
                                    params: None,
                                    level: level + 1,
                                    indent: level,
                                }
                            }));
                        }
                    }
                }
            }
        }
    }

    out
}

enum Step<'a> {
    Enter(&'a Node),
    Exit(&'a Node),
}

/// Render `node` with `{slot}` markers filled in, bottom-up.
///
/// Each child with children of its own is built the same way, with the same `params`.
/// Leaf children render with their own parameters. The concatenated results replace
/// every `{slot}` in the rendering of `node` under `params`.
pub fn build_template(node: &Node, params: Option<RenderParams<'_>>) -> String {
    let mut built: Vec<String> = Vec::new();
    let mut steps = vec![Step::Enter(node)];

    while let Some(step) = steps.pop() {
        match step {
            Step::Enter(node) => {
                steps.push(Step::Exit(node));
                steps.extend(
                    node.children()
                        .iter()
                        .rev()
                        .filter(|child| child.has_children())
                        .map(Step::Enter),
                );
            }
            Step::Exit(node) => {
                let nested = node.children().iter().filter(|c| c.has_children()).count();
                let mut nested = built.split_off(built.len() - nested).into_iter();

                let mut slot = String::new();
                for child in node.children() {
                    if child.has_children() {
                        slot.push_str(&nested.next().unwrap_or_default());
                    } else {
                        slot.push_str(&render(child, None, 1));
                    }
                }
                built.push(render(node, params, 1).replace(SLOT, &slot));
            }
        }
    }

    built.pop().unwrap_or_default()
}

/// Formatter that renders each top-level node in turn
pub struct ShortcodeFormatter;

impl Formatter for ShortcodeFormatter {
    fn name(&self) -> &str {
        "shortcode"
    }

    fn serialize(&self, forest: &[Node]) -> Result<String, FormatError> {
        Ok(forest.iter().map(|node| render(node, None, 1)).collect())
    }

    fn description(&self) -> &str {
        "Indented shortcode markup"
    }
}
