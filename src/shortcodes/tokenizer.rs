//! Tokenizer facade
//!
//!     `Tokenizer` is the main entry point. It owns the input buffer and the lexer
//!     cursor, and ties lexing, tree building and serialization together:
//!
//!         let mut tokenizer = Tokenizer::new();
//!         let forest = tokenizer.set_input("[box]hi[/box]")?.build_forest()?;
//!         let text = tokenizer.render(&forest[0], None, 1);
//!
//!     Tokens are drained from the buffer: a second `tokens()` call on the same input
//!     returns nothing until `reset()` rewinds to the start. Setting new input replaces
//!     the old buffer entirely.

use crate::shortcodes::ast::Node;
use crate::shortcodes::building;
use crate::shortcodes::config::TokenizerOptions;
use crate::shortcodes::error::{Result, ShortcodeError};
use crate::shortcodes::formats::{self, RenderParams};
use crate::shortcodes::lexing::Lexer;
use crate::shortcodes::token::Token;
use tracing::debug;

/// Stateful tokenizer over one input buffer at a time
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    options: TokenizerOptions,
    lexer: Option<Lexer>,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: TokenizerOptions) -> Self {
        Self {
            options,
            lexer: None,
        }
    }

    /// Create a tokenizer and set its input in one step
    pub fn from_input(input: impl AsRef<[u8]>, options: TokenizerOptions) -> Result<Self> {
        let mut tokenizer = Self::with_options(options);
        tokenizer.set_input(input)?;
        Ok(tokenizer)
    }

    pub fn options(&self) -> &TokenizerOptions {
        &self.options
    }

    /// Replace the input buffer and rewind to its start.
    ///
    /// Input must be valid UTF-8. On error the previous buffer and position are kept.
    pub fn set_input(&mut self, input: impl AsRef<[u8]>) -> Result<&mut Self> {
        let text = std::str::from_utf8(input.as_ref()).map_err(|err| {
            ShortcodeError::InvalidInput(format!("input is not valid UTF-8 text ({err})"))
        })?;
        debug!(len = text.len(), "tokenizer input set");
        self.lexer = Some(Lexer::new(text));
        Ok(self)
    }

    /// Rewind to the start of the current input; does nothing if no input was set
    pub fn reset(&mut self) -> &mut Self {
        if let Some(lexer) = self.lexer.as_mut() {
            lexer.rewind();
        }
        self
    }

    /// The current input, if one was set
    pub fn input(&self) -> Option<&str> {
        self.lexer.as_ref().map(Lexer::source)
    }

    /// Drain the remaining tokens of the current input
    pub fn tokens(&mut self) -> Result<Vec<Token>> {
        let lexer = self
            .lexer
            .as_mut()
            .ok_or_else(|| ShortcodeError::InvalidInput("no input has been set".to_string()))?;
        lexer.tokens()
    }

    /// Set `input`, then drain its tokens
    pub fn tokens_from(&mut self, input: impl AsRef<[u8]>) -> Result<Vec<Token>> {
        self.set_input(input)?.tokens()
    }

    /// Drain the remaining tokens and build them into a forest
    pub fn build_forest(&mut self) -> Result<Vec<Node>> {
        let tokens = self.tokens()?;
        Ok(building::build_forest(tokens, self.options))
    }

    /// Set `input`, then build its forest
    pub fn build_forest_from(&mut self, input: impl AsRef<[u8]>) -> Result<Vec<Node>> {
        self.set_input(input)?.build_forest()
    }

    /// See [`formats::render`]
    pub fn render(&self, node: &Node, params: Option<RenderParams<'_>>, level: usize) -> String {
        formats::render(node, params, level)
    }

    /// See [`formats::build_template`]
    pub fn build_template(&self, node: &Node, params: Option<RenderParams<'_>>) -> String {
        formats::build_template(node, params)
    }
}
