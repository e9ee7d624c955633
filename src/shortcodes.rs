//! Main module for shortcodes library functionality
//!
//! The pipeline is lexing, then tree building, then serialization:
//!
//!     text --lexing--> tokens --building--> forest --formats--> text
//!
//! [`Tokenizer`](tokenizer::Tokenizer) wraps the whole pipeline around an input buffer.
//! The free functions below are one-shot shortcuts with default options.

pub mod ast;
pub mod building;
pub mod config;
pub mod error;
pub mod formats;
pub mod lexing;
pub mod testing;
pub mod token;
pub mod tokenizer;

pub use formats::{build_template, render};
pub use lexing::lex;

use ast::Node;
use config::TokenizerOptions;
use error::Result;

/// Lex and build `input` into a forest with default options
pub fn parse(input: &str) -> Result<Vec<Node>> {
    parse_with(input, TokenizerOptions::default())
}

pub fn parse_with(input: &str, options: TokenizerOptions) -> Result<Vec<Node>> {
    Ok(building::build_forest(lex(input)?, options))
}
