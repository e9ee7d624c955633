//! Detokenizer
//!
//! Converts a token stream back into source text. Every token keeps the exact text it
//! was cut from, so this is the lossless inverse of lexing:
//!
//!     detokenize(&lex(input)?) == input
//!
//! Nodes convert through the serializer instead, since a tree no longer knows the
//! original spacing between its tags.

use super::shortcode::render;
use crate::shortcodes::ast::Node;
use crate::shortcodes::token::Token;

/// Trait for converting a value back to shortcode text
pub trait ToShortcodeString {
    fn to_shortcode_string(&self) -> String;
}

impl ToShortcodeString for Token {
    fn to_shortcode_string(&self) -> String {
        self.raw().to_string()
    }
}

impl ToShortcodeString for Node {
    fn to_shortcode_string(&self) -> String {
        render(self, None, 1)
    }
}

/// Detokenize a stream of tokens into a string
pub fn detokenize(tokens: &[Token]) -> String {
    tokens.iter().map(Token::raw).collect()
}
