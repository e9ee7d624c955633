//! AST nodes
//!
//!     Tokens double as tree nodes: a `Node` wraps the token it was lexed as and adds
//!     the two things only a tree needs, its children and whether it has been closed.
//!
//!     Text, self-closing and root nodes are closed from the start. Open nodes are closed
//!     when a matching close tag arrives, or by recovery, which may also demote them to
//!     self-closing leaves (see [building](crate::shortcodes::building)).
//!
//!     Dropping and walking a node never recurses, so arbitrarily deep trees are safe to
//!     hold and traverse. The derived `Clone`, `PartialEq` and `Serialize` impls do recurse
//!     once per level; formats go through [snapshots](crate::shortcodes::formats::snapshot)
//!     and explicit-stack writers instead.

use crate::shortcodes::token::{Params, Tag, Token, TokenKind};
use serde::Serialize;

static NO_PARAMS: Params = Params::new();

/// A node of the shortcode forest
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    token: Token,
    children: Vec<Node>,
    closed: bool,
}

impl Node {
    pub fn new(token: Token) -> Self {
        let closed = !matches!(token, Token::Open(_));
        Self {
            token,
            children: Vec::new(),
            closed,
        }
    }

    pub fn root() -> Self {
        Self::new(Token::Root)
    }

    /// Builder used mostly by tests and callers assembling trees by hand
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn kind(&self) -> TokenKind {
        self.token.kind()
    }

    pub fn tag(&self) -> Option<&Tag> {
        self.token.tag()
    }

    pub fn name(&self) -> Option<&str> {
        self.token.name()
    }

    /// Parameters of a tag node; empty for text and root
    pub fn params(&self) -> &Params {
        self.token.params().unwrap_or(&NO_PARAMS)
    }

    /// Body of a text node
    pub fn text(&self) -> Option<&str> {
        match &self.token {
            Token::Text { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn position(&self) -> usize {
        self.token.position()
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn is_root(&self) -> bool {
        matches!(self.token, Token::Root)
    }

    /// Depth-first, document-order walk over every node below this one
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    pub(crate) fn push_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub(crate) fn extend_children(&mut self, children: Vec<Node>) {
        self.children.extend(children);
    }

    pub(crate) fn take_children(&mut self) -> Vec<Node> {
        std::mem::take(&mut self.children)
    }

    pub(crate) fn mark_closed(&mut self) {
        self.closed = true;
    }

    /// Close the node and turn it into a self-closing leaf
    pub(crate) fn demote(&mut self) {
        let token = std::mem::replace(&mut self.token, Token::Root);
        self.token = token.into_self_closing();
        self.closed = true;
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Iterator returned by [`Node::descendants`]
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
