//! Lexing
//!
//!     The lexer turns a text buffer into a flat sequence of tokens. It works by
//!     repeatedly searching the rest of the buffer for the earliest enclosure (see
//!     [grammar](grammar)):
//!
//!         1. No enclosure left: the rest of the buffer becomes a single Text token and
//!            the lexer is exhausted.
//!         2. An enclosure further ahead: the text before it becomes a Text token, and the
//!            enclosure becomes a tag token. Both come back from the same step.
//!         3. An enclosure right at the cursor: only the tag token comes back.
//!
//!     The token stream is lossless: concatenating `raw()` of every token gives back the
//!     input, and positions are the byte offsets of each token in that input.
//!
//!     A lexer keeps its original buffer, so `rewind` replays the same input from the
//!     start without having to supply it again.

pub mod grammar;

use crate::shortcodes::error::Result;
use crate::shortcodes::token::Token;
use std::collections::VecDeque;

/// Cursor-based shortcode lexer over an owned buffer
#[derive(Debug, Clone)]
pub struct Lexer {
    source: String,
    cursor: usize,
    exhausted: bool,
    pending: VecDeque<Token>,
}

impl Lexer {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            cursor: 0,
            exhausted: false,
            pending: VecDeque::new(),
        }
    }

    /// The full original input
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Byte offset of the next unread character
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted && self.pending.is_empty()
    }

    /// Go back to the start of the original input
    pub fn rewind(&mut self) {
        self.cursor = 0;
        self.exhausted = false;
        self.pending.clear();
    }

    /// Scan the next step of input.
    ///
    /// Returns one token, or a text token followed by a tag token when free text
    /// precedes the next tag. An empty batch means the input is exhausted.
    pub fn next_tokens(&mut self) -> Result<Vec<Token>> {
        if self.exhausted {
            return Ok(Vec::new());
        }

        let rest = &self.source[self.cursor..];
        if rest.is_empty() {
            self.exhausted = true;
            return Ok(Vec::new());
        }

        let Some(found) = grammar::ENCLOSURE.find(rest) else {
            let token = Token::text(rest, self.cursor);
            self.cursor = self.source.len();
            self.exhausted = true;
            return Ok(vec![token]);
        };

        let mut batch = Vec::with_capacity(2);
        if found.start() > 0 {
            batch.push(Token::text(&rest[..found.start()], self.cursor));
        }
        let kind = grammar::classify(found.as_str());
        batch.push(Token::new(
            kind,
            found.as_str(),
            self.cursor + found.start(),
        )?);

        self.cursor += found.end();
        if self.cursor == self.source.len() {
            self.exhausted = true;
        }
        Ok(batch)
    }

    /// Drain the lexer, returning every remaining token in order
    pub fn tokens(&mut self) -> Result<Vec<Token>> {
        let mut tokens: Vec<Token> = self.pending.drain(..).collect();
        loop {
            let batch = self.next_tokens()?;
            if batch.is_empty() {
                return Ok(tokens);
            }
            tokens.extend(batch);
        }
    }
}

impl Iterator for Lexer {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(Ok(token));
            }
            match self.next_tokens() {
                Ok(batch) if batch.is_empty() => return None,
                Ok(batch) => self.pending.extend(batch),
                Err(err) => {
                    self.exhausted = true;
                    return Some(Err(err));
                }
            }
        }
    }
}

/// Tokenize a whole input in one go
pub fn lex(source: &str) -> Result<Vec<Token>> {
    Lexer::new(source).tokens()
}
