//! Fluent assertion API for shortcode forests
//!
//! Asserting on nested trees by hand means a lot of indexing and matching. The fluent
//! API checks a whole hierarchy in one expression, and every failure message carries
//! the path to the node that failed:
//!
//! ```rust-example
//! use shortcodes::testing::assert_forest;
//!
//! let forest = shortcodes::parse("[box size=l]hi[row/][/box]")?;
//! assert_forest(&forest)
//!     .node_count(1)
//!     .all_closed()
//!     .node(0, |b| {
//!         b.open("box")
//!             .param("size", "l")
//!             .child_count(2)
//!             .child(0, |t| {
//!                 t.text("hi");
//!             })
//!             .child(1, |r| {
//!                 r.self_closing("row");
//!             });
//!     });
//! ```

use crate::shortcodes::ast::Node;
use crate::shortcodes::token::{ParamValue, TokenKind};

// ============================================================================
// Entry Point
// ============================================================================

/// Create an assertion builder for a forest
pub fn assert_forest(nodes: &[Node]) -> ForestAssertion<'_> {
    ForestAssertion { nodes }
}

fn summarize(nodes: &[Node]) -> String {
    nodes
        .iter()
        .map(|node| match node.name() {
            Some(name) => format!("{}({})", node.kind(), name),
            None => node.kind().to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Forest Assertions
// ============================================================================

pub struct ForestAssertion<'a> {
    nodes: &'a [Node],
}

impl<'a> ForestAssertion<'a> {
    /// Assert the number of top-level nodes
    pub fn node_count(self, expected: usize) -> Self {
        let actual = self.nodes.len();
        assert_eq!(
            actual,
            expected,
            "Expected {} nodes, found {} nodes: [{}]",
            expected,
            actual,
            summarize(self.nodes)
        );
        self
    }

    /// Assert on a top-level node by index
    pub fn node<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        assert!(
            index < self.nodes.len(),
            "Node index {} out of bounds (forest has {} nodes)",
            index,
            self.nodes.len()
        );
        assertion(NodeAssertion {
            node: &self.nodes[index],
            context: format!("nodes[{}]", index),
        });
        self
    }

    /// Assert every node in the forest, at any depth, is closed
    pub fn all_closed(self) -> Self {
        for (index, root) in self.nodes.iter().enumerate() {
            let open = std::iter::once(root)
                .chain(root.descendants())
                .find(|node| !node.is_closed());
            if let Some(node) = open {
                panic!(
                    "nodes[{}]: found unclosed {} at position {}",
                    index,
                    node.kind(),
                    node.position()
                );
            }
        }
        self
    }
}

// ============================================================================
// Node Assertions
// ============================================================================

pub struct NodeAssertion<'a> {
    node: &'a Node,
    context: String,
}

impl<'a> NodeAssertion<'a> {
    pub fn kind(self, expected: TokenKind) -> Self {
        assert_eq!(
            self.node.kind(),
            expected,
            "{}: Expected {}, found {}",
            self.context,
            expected,
            self.node.kind()
        );
        self
    }

    /// Assert this is a text node whose trimmed body is `expected`
    pub fn text(self, expected: &str) -> Self {
        match self.node.text() {
            Some(body) => assert_eq!(
                body.trim(),
                expected,
                "{}: Expected text {:?}, found {:?}",
                self.context,
                expected,
                body
            ),
            None => panic!("{}: Expected TEXT, found {}", self.context, self.node.kind()),
        }
        self
    }

    pub fn name(self, expected: &str) -> Self {
        assert_eq!(
            self.node.name(),
            Some(expected),
            "{}: Expected name {:?}, found {:?}",
            self.context,
            expected,
            self.node.name()
        );
        self
    }

    /// Assert this is an open tag named `name`
    pub fn open(self, name: &str) -> Self {
        self.kind(TokenKind::Open).name(name)
    }

    /// Assert this is a self-closing tag named `name`
    pub fn self_closing(self, name: &str) -> Self {
        self.kind(TokenKind::SelfClosing).name(name)
    }

    /// Assert a parameter value; flags compare as `true`
    pub fn param(self, key: &str, expected: impl Into<ParamValue>) -> Self {
        let expected = expected.into();
        assert_eq!(
            self.node.params().get(key),
            Some(&expected),
            "{}: Expected param {}={}, params were [{}]",
            self.context,
            key,
            expected,
            self.node.params().to_shortcode_string().trim_start()
        );
        self
    }

    pub fn no_params(self) -> Self {
        assert!(
            self.node.params().is_empty(),
            "{}: Expected no params, found [{}]",
            self.context,
            self.node.params().to_shortcode_string().trim_start()
        );
        self
    }

    pub fn closed(self) -> Self {
        assert!(self.node.is_closed(), "{}: Expected node to be closed", self.context);
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        let actual = self.node.children().len();
        assert_eq!(
            actual,
            expected,
            "{}: Expected {} children, found {}: [{}]",
            self.context,
            expected,
            actual,
            summarize(self.node.children())
        );
        self
    }

    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        let children = self.node.children();
        assert!(
            index < children.len(),
            "{}: Child index {} out of bounds ({} children)",
            self.context,
            index,
            children.len()
        );
        assertion(NodeAssertion {
            node: &children[index],
            context: format!("{}.children[{}]", self.context, index),
        });
        self
    }

    /// Assert the tag names of the children in order; text children match `"#text"`
    pub fn child_names(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self
            .node
            .children()
            .iter()
            .map(|child| child.name().unwrap_or("#text"))
            .collect();
        assert_eq!(actual, expected, "{}: children differ", self.context);
        self
    }
}
