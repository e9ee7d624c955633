//! Ancestor stack and reflow
//!
//!     The tree builder keeps every still-open node on an explicit stack. The bottom frame
//!     is always the synthetic root, the top frame is the current parent, and the frames
//!     in between are the path from one to the other. Open nodes are owned by the stack
//!     and only attached to their parent once they are closed, which keeps a parent's
//!     children in document order: nothing else can be appended to the parent while one
//!     of its children is still open.
//!
//!     Reflow is the recovery step for broken nesting. Given the index of the frame a
//!     close tag matched (the target), every frame above it is closed, demoted to a
//!     self-closing leaf, and moved onto the target together with its children, in
//!     outward order:
//!
//!         stack   root > a > b > c          close [/a], target = a
//!         a       [..a's children, b, ..b's children, c, ..c's children]
//!
//!     The target is then closed and popped. Root is never popped, so a close that
//!     matches nothing flattens the whole stack into the forest and leaves root as the
//!     current parent.

use crate::shortcodes::ast::Node;

/// Index of the root frame
pub const ROOT: usize = 0;

/// Stack of open nodes from root to the current parent
#[derive(Debug)]
pub struct AncestorStack {
    frames: Vec<Node>,
}

impl AncestorStack {
    pub fn new() -> Self {
        Self {
            frames: vec![Node::root()],
        }
    }

    /// Number of open nodes above root
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    pub fn is_at_root(&self) -> bool {
        self.frames.len() == 1
    }

    pub fn frame(&self, index: usize) -> Option<&Node> {
        self.frames.get(index)
    }

    /// The current parent
    pub fn current(&self) -> &Node {
        self.frames.last().expect("ancestor stack always holds root")
    }

    fn current_mut(&mut self) -> &mut Node {
        self.frames
            .last_mut()
            .expect("ancestor stack always holds root")
    }

    /// Append a finished node to the current parent
    pub fn append(&mut self, node: Node) {
        self.current_mut().push_child(node);
    }

    /// Make `node` the current parent
    pub fn open(&mut self, node: Node) {
        self.frames.push(node);
    }

    /// Close the current parent and attach it to the frame below.
    ///
    /// Does nothing at root.
    pub fn close_current(&mut self) {
        if self.is_at_root() {
            return;
        }
        if let Some(mut node) = self.frames.pop() {
            node.mark_closed();
            self.append(node);
        }
    }

    /// Nearest open frame named `name`, searching from the current parent outwards.
    ///
    /// Falls back to [`ROOT`] when no open frame has that name.
    pub fn find_match(&self, name: &str) -> usize {
        (ROOT + 1..self.frames.len())
            .rev()
            .find(|&index| self.frames[index].name() == Some(name))
            .unwrap_or(ROOT)
    }

    /// Flatten every frame above `target` onto it, then close and pop the target.
    ///
    /// Returns the number of frames that were demoted to leaves. A `target` past the
    /// top of the stack is clamped to the current parent.
    pub fn reflow(&mut self, target: usize) -> usize {
        let target = target.min(self.frames.len() - 1);
        let detached: Vec<Node> = self.frames.drain(target + 1..).collect();
        let reflowed = detached.len();

        let anchor = &mut self.frames[target];
        for mut node in detached {
            let children = node.take_children();
            node.demote();
            anchor.push_child(node);
            anchor.extend_children(children);
        }
        anchor.mark_closed();

        self.close_current();
        reflowed
    }

    /// Consume the stack, returning root's children.
    ///
    /// Frames still open are reflowed onto root first.
    pub fn into_forest(mut self) -> Vec<Node> {
        if !self.is_at_root() {
            self.reflow(ROOT);
        }
        self.frames
            .pop()
            .map(|mut root| root.take_children())
            .unwrap_or_default()
    }
}

impl Default for AncestorStack {
    fn default() -> Self {
        Self::new()
    }
}
