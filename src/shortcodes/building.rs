//! Tree building
//!
//!     The tree builder assembles the flat token stream into a forest. It is a single
//!     pass over the tokens with an explicit [AncestorStack](ancestors::AncestorStack):
//!
//!         Text          appended to the current parent (whitespace-only text is dropped
//!                       when `skip_whitespace` is set)
//!         Open          becomes the current parent
//!         SelfClosing   appended to the current parent
//!         Close         closes the current parent when the names match, otherwise
//!                       triggers recovery
//!
//!     Recovery
//!
//!         Malformed nesting never fails the parse. A close tag that does not match the
//!         current parent is matched against the nearest open ancestor with the same
//!         name (root if there is none) and the stack is reflowed onto it:
//!
//!             [a][b][/a]      a > [b]            b is closed and becomes a leaf
//!             [a][b][/c]      [a] [b]            no match: both flattened onto root
//!
//!         When input ends with tags still open, the outermost open tag is treated as
//!         closed, which nests the rest under it:
//!
//!             [a][b]          a > [b]
//!
//!         Matching is by name only. Every recovery is logged through `tracing` (at warn
//!         level in strict mode, debug otherwise) and recorded as a [Recovery]. The log
//!         level is all that `strict` changes; the forest is the same either way.

pub mod ancestors;

use crate::shortcodes::ast::Node;
use crate::shortcodes::config::TokenizerOptions;
use crate::shortcodes::token::Token;
use ancestors::AncestorStack;
use serde::Serialize;
use std::fmt;
use tracing::{debug, trace, warn};

/// What made the builder recover
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RecoveryTrigger {
    /// A close tag that did not match the current parent
    MismatchedClose { name: String, position: usize },
    /// Input ended with tags still open
    EndOfInput,
}

/// A record of one recovery from malformed nesting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recovery {
    pub trigger: RecoveryTrigger,
    /// Name of the node the reflow landed on; `None` for root
    pub target: Option<String>,
    /// Number of open nodes demoted to leaves
    pub reflowed: usize,
}

impl fmt::Display for Recovery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.trigger {
            RecoveryTrigger::MismatchedClose { name, position } => {
                write!(f, "mismatched [/{}] at {}", name, position)?
            }
            RecoveryTrigger::EndOfInput => write!(f, "unclosed tags at end of input")?,
        }
        match &self.target {
            Some(target) => write!(f, ", closed [{}]", target)?,
            None => write!(f, ", flattened to root")?,
        }
        write!(f, " ({} reflowed)", self.reflowed)
    }
}

/// Incremental builder: feed tokens with [`push`](TreeBuilder::push), then
/// [`finish`](TreeBuilder::finish)
#[derive(Debug)]
pub struct TreeBuilder {
    options: TokenizerOptions,
    stack: AncestorStack,
    recoveries: Vec<Recovery>,
}

impl TreeBuilder {
    pub fn new(options: TokenizerOptions) -> Self {
        Self {
            options,
            stack: AncestorStack::new(),
            recoveries: Vec::new(),
        }
    }

    /// Recoveries performed so far
    pub fn recoveries(&self) -> &[Recovery] {
        &self.recoveries
    }

    /// Number of tags currently open
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn push(&mut self, token: Token) {
        trace!(kind = %token.kind(), position = token.position(), "building token");
        match token {
            Token::Text { .. } => {
                if self.options.skip_whitespace && token.is_whitespace() {
                    return;
                }
                self.stack.append(Node::new(token));
            }
            Token::Open(_) => self.stack.open(Node::new(token)),
            Token::SelfClosing(_) => self.stack.append(Node::new(token)),
            Token::Close(tag) => {
                let closes_current = self
                    .stack
                    .current()
                    .tag()
                    .is_some_and(|open| tag.can_close(open));
                if closes_current {
                    self.stack.close_current();
                } else {
                    let target = self.stack.find_match(tag.name());
                    self.recover(
                        RecoveryTrigger::MismatchedClose {
                            name: tag.name().to_string(),
                            position: tag.position(),
                        },
                        target,
                    );
                }
            }
            Token::Root => {}
        }
    }

    /// Close anything still open and return the forest with the recovery log
    pub fn finish(mut self) -> (Vec<Node>, Vec<Recovery>) {
        if !self.stack.is_at_root() {
            self.recover(RecoveryTrigger::EndOfInput, ancestors::ROOT + 1);
        }
        (self.stack.into_forest(), self.recoveries)
    }

    fn recover(&mut self, trigger: RecoveryTrigger, target: usize) {
        let target_name = self
            .stack
            .frame(target)
            .and_then(Node::name)
            .map(str::to_string);
        let reflowed = self.stack.reflow(target);
        let recovery = Recovery {
            trigger,
            target: target_name,
            reflowed,
        };

        if self.options.strict {
            warn!(%recovery, "recovered from malformed nesting");
        } else {
            debug!(%recovery, "recovered from malformed nesting");
        }
        self.recoveries.push(recovery);
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new(TokenizerOptions::default())
    }
}

/// Build a forest from a token sequence in one go
pub fn build_forest(
    tokens: impl IntoIterator<Item = Token>,
    options: TokenizerOptions,
) -> Vec<Node> {
    let mut builder = TreeBuilder::new(options);
    for token in tokens {
        builder.push(token);
    }
    builder.finish().0
}
