//! Tokens
//!
//!     A token is the unit of lexing. Text tokens carry the exact span of free text they
//!     were cut from; tag tokens carry the exact enclosure (`raw`) plus the name and
//!     parameters parsed out of it. Tokens become AST nodes as-is (see
//!     [Node](crate::shortcodes::ast::Node)), so there is a synthetic `Root` variant as
//!     well, which never comes out of the lexer.
//!
//!     Tag tokens parse their own raw text when constructed. The text is re-matched
//!     against the grammar of the token's kind, and a mismatch is a
//!     [Syntax](crate::shortcodes::error::ShortcodeError::Syntax) error. Text handed
//!     over by the lexer always matches, so this only fires for hand-built tokens.

pub mod params;

pub use params::{ParamValue, Params};

use crate::shortcodes::error::{Result, ShortcodeError};
use crate::shortcodes::lexing::grammar;
use serde::Serialize;
use std::fmt;

/// The kind of a token, without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    Text,
    Open,
    Close,
    SelfClosing,
    Root,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TokenKind::Text => "TEXT",
            TokenKind::Open => "OPEN",
            TokenKind::Close => "CLOSE",
            TokenKind::SelfClosing => "SELF_CLOSING",
            TokenKind::Root => "ROOT",
        };
        f.pad(label)
    }
}

/// The payload shared by open, close and self-closing tokens
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tag {
    name: String,
    raw: String,
    position: usize,
    params: Params,
}

impl Tag {
    /// Parse a tag of the given kind from its raw enclosure text
    pub fn parse(kind: TokenKind, raw: impl Into<String>, position: usize) -> Result<Self> {
        let raw = raw.into();
        let captures = grammar::grammar_for(kind).and_then(|rx| rx.captures(&raw));
        let Some(captures) = captures else {
            return Err(ShortcodeError::Syntax { kind, body: raw });
        };

        let name = captures["name"].to_string();
        let params = captures
            .name("params")
            .map(|section| Params::parse(section.as_str()))
            .unwrap_or_default();

        Ok(Tag {
            name,
            raw,
            position,
            params,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Whether a close tag with this name can close `other`; matching is by name only
    pub fn can_close(&self, other: &Tag) -> bool {
        self.name == other.name
    }
}

/// A lexed token
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Token {
    Text { body: String, position: usize },
    Open(Tag),
    Close(Tag),
    SelfClosing(Tag),
    Root,
}

impl Token {
    /// Build a token of `kind` from its raw text.
    ///
    /// Tag kinds parse `body` against their grammar; `Root` ignores it.
    pub fn new(kind: TokenKind, body: impl Into<String>, position: usize) -> Result<Self> {
        Ok(match kind {
            TokenKind::Text => Token::Text {
                body: body.into(),
                position,
            },
            TokenKind::Open => Token::Open(Tag::parse(kind, body, position)?),
            TokenKind::Close => Token::Close(Tag::parse(kind, body, position)?),
            TokenKind::SelfClosing => Token::SelfClosing(Tag::parse(kind, body, position)?),
            TokenKind::Root => Token::Root,
        })
    }

    pub fn text(body: impl Into<String>, position: usize) -> Self {
        Token::Text {
            body: body.into(),
            position,
        }
    }

    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Text { .. } => TokenKind::Text,
            Token::Open(_) => TokenKind::Open,
            Token::Close(_) => TokenKind::Close,
            Token::SelfClosing(_) => TokenKind::SelfClosing,
            Token::Root => TokenKind::Root,
        }
    }

    pub fn tag(&self) -> Option<&Tag> {
        match self {
            Token::Open(tag) | Token::Close(tag) | Token::SelfClosing(tag) => Some(tag),
            Token::Text { .. } | Token::Root => None,
        }
    }

    /// Tag name; `None` for text and root
    pub fn name(&self) -> Option<&str> {
        self.tag().map(Tag::name)
    }

    /// The exact source text this token was built from (empty for root)
    pub fn raw(&self) -> &str {
        match self {
            Token::Text { body, .. } => body,
            Token::Open(tag) | Token::Close(tag) | Token::SelfClosing(tag) => tag.raw(),
            Token::Root => "",
        }
    }

    /// Byte offset of the token in the original input
    pub fn position(&self) -> usize {
        match self {
            Token::Text { position, .. } => *position,
            Token::Open(tag) | Token::Close(tag) | Token::SelfClosing(tag) => tag.position(),
            Token::Root => 0,
        }
    }

    pub fn params(&self) -> Option<&Params> {
        self.tag().map(Tag::params)
    }

    pub fn is_whitespace(&self) -> bool {
        matches!(self, Token::Text { body, .. } if body.chars().all(char::is_whitespace))
    }

    /// Reclassify an open tag as a leaf. Every other kind is returned unchanged.
    pub fn into_self_closing(self) -> Self {
        match self {
            Token::Open(tag) => Token::SelfClosing(tag),
            other => other,
        }
    }
}
