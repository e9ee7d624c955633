//! Error types for tokenizing and building shortcode trees
//!
//! Malformed nesting is never an error: the tree builder recovers from it. The only
//! failures are usage errors (no input, or input that is not text) and the
//! internal consistency check a tag token runs against its own captured text.

use crate::shortcodes::token::TokenKind;
use std::fmt;

/// Errors that can occur while tokenizing or building a forest
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortcodeError {
    /// Input was missing or was not valid text
    InvalidInput(String),
    /// A token's captured text does not match the grammar of its own kind
    Syntax { kind: TokenKind, body: String },
}

impl fmt::Display for ShortcodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShortcodeError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            ShortcodeError::Syntax { kind, body } => {
                write!(f, "Invalid {} token: {}", kind, body)
            }
        }
    }
}

impl std::error::Error for ShortcodeError {}

impl From<ShortcodeError> for String {
    fn from(err: ShortcodeError) -> Self {
        err.to_string()
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ShortcodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ShortcodeError::InvalidInput("no input has been set".to_string());
        assert_eq!(format!("{err}"), "Invalid input: no input has been set");

        let err = ShortcodeError::Syntax {
            kind: TokenKind::Open,
            body: "[row".to_string(),
        };
        assert_eq!(format!("{err}"), "Invalid OPEN token: [row");
    }

    #[test]
    fn test_error_into_string() {
        let msg: String = ShortcodeError::InvalidInput("bad".to_string()).into();
        assert_eq!(msg, "Invalid input: bad");
    }
}
