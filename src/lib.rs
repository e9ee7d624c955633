//! # shortcodes
//!
//! A fault-tolerant tokenizer and tree builder for bracket shortcode markup:
//!
//!     Some text [box size="l"][row/] more text[/box]
//!
//! Input is lexed into a lossless token stream, built into a forest of nodes, and can
//! be rendered back to normalized shortcode text. Malformed nesting never fails a parse;
//! the tree builder recovers from it (see [building](shortcodes::building)).
//!
//! ## Testing
//!
//! Tree-shaped results are asserted with the fluent API in the
//! [testing module](shortcodes::testing).

pub mod shortcodes;

pub use shortcodes::ast::Node;
pub use shortcodes::building::{Recovery, RecoveryTrigger, TreeBuilder};
pub use shortcodes::config::TokenizerOptions;
pub use shortcodes::error::{Result, ShortcodeError};
pub use shortcodes::formats::{build_template, render, RenderParams};
pub use shortcodes::lexing::{lex, Lexer};
pub use shortcodes::token::{ParamValue, Params, Tag, Token, TokenKind};
pub use shortcodes::tokenizer::Tokenizer;
pub use shortcodes::{parse, parse_with};
