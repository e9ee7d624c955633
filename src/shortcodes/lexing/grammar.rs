//! Shortcode grammar
//!
//!     The grammar is a handful of regular expressions, compiled once on first use and
//!     shared read-only by every lexer and token in the process.
//!
//!     Tag names:
//!         [A-Za-z][A-Za-z0-9_-]*
//!
//!     Parameters are whitespace separated. Each one is either a flag (`key`) or a
//!     `key=value` pair where the value is a number, an unquoted token, or a single or
//!     double quoted string:
//!         [row a=1 b=2.5 flag d="x y" e='z']
//!
//!     Unquoted values may not contain whitespace, quotes or brackets, and never end in
//!     `/` so that `[img src=a/b/]` stays self-closing. Quoted values may not contain
//!     brackets or their own quote character.
//!
//!     Token forms:
//!         open          [name params?]
//!         self-closing  [name params? /]
//!         close         [/name]
//!
//!     The enclosure pattern used by the lexer is the union of the three token forms, so
//!     bracketed text that is not a well formed tag (`[1]`, `[see: notes]`) is left as
//!     text instead of being picked up and rejected later.

use crate::shortcodes::token::TokenKind;
use once_cell::sync::Lazy;
use regex::Regex;

/// Tag name pattern shared by every tag form and by parameter keys
pub const TAG_NAME: &str = r"[A-Za-z][A-Za-z0-9_-]*";

/// Parameter value: double quoted, single quoted, or an unquoted token
const PARAM_VALUE: &str = r#"(?:"[^"\[\]]*"|'[^'\[\]]*'|[^\s"'\[\]]*[^\s"'\[\]/])"#;

fn param_pattern() -> String {
    format!("{TAG_NAME}(?:={PARAM_VALUE})?")
}

fn params_pattern() -> String {
    format!(r"{p}(?:\s+{p})*\s*", p = param_pattern())
}

fn group(capture: Option<&str>, body: &str) -> String {
    match capture {
        Some(name) => format!("(?P<{name}>{body})"),
        None => format!("(?:{body})"),
    }
}

/// `[name params?` followed by `tail`, optionally capturing `name` and `params`
fn tag_pattern(captures: bool, tail: &str) -> String {
    let name = group(captures.then_some("name"), TAG_NAME);
    let params = group(
        captures.then_some("params"),
        &format!(r"\s+{}", params_pattern()),
    );
    format!(r"\[{name}{params}?{tail}")
}

fn open_pattern(captures: bool) -> String {
    tag_pattern(captures, r"\]")
}

fn self_closing_pattern(captures: bool) -> String {
    tag_pattern(captures, r"\s*/\]")
}

fn close_pattern(captures: bool) -> String {
    format!(r"\[/{}\]", group(captures.then_some("name"), TAG_NAME))
}

fn anchored(pattern: String) -> Regex {
    Regex::new(&format!("^(?:{pattern})$")).expect("shortcode grammar must compile")
}

/// Finds the earliest tag of any kind in a buffer
pub static ENCLOSURE: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        "{}|{}|{}",
        close_pattern(false),
        self_closing_pattern(false),
        open_pattern(false)
    );
    Regex::new(&pattern).expect("shortcode grammar must compile")
});

/// Full match of an opening tag, capturing `name` and `params`
pub static OPEN: Lazy<Regex> = Lazy::new(|| anchored(open_pattern(true)));

/// Full match of a self-closing tag, capturing `name` and `params`
pub static SELF_CLOSING: Lazy<Regex> = Lazy::new(|| anchored(self_closing_pattern(true)));

/// Full match of a closing tag, capturing `name`
pub static CLOSE: Lazy<Regex> = Lazy::new(|| anchored(close_pattern(true)));

/// A single parameter, capturing `key` and the optional raw `value`
pub static PARAM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        "(?P<key>{TAG_NAME})(?:=(?P<value>{PARAM_VALUE}))?"
    ))
    .expect("shortcode grammar must compile")
});

/// The grammar a token of the given kind must satisfy, if it has one
pub fn grammar_for(kind: TokenKind) -> Option<&'static Regex> {
    match kind {
        TokenKind::Open => Some(&OPEN),
        TokenKind::SelfClosing => Some(&SELF_CLOSING),
        TokenKind::Close => Some(&CLOSE),
        TokenKind::Text | TokenKind::Root => None,
    }
}

/// Classify an enclosure by its delimiters.
///
/// Assumes the text is a tag, not free text.
pub fn classify(enclosure: &str) -> TokenKind {
    if enclosure.starts_with("[/") {
        TokenKind::Close
    } else if enclosure.ends_with("/]") {
        TokenKind::SelfClosing
    } else {
        TokenKind::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enclosure(input: &str) -> Option<&str> {
        ENCLOSURE.find(input).map(|m| m.as_str())
    }

    #[test]
    fn test_enclosure_finds_each_form() {
        assert_eq!(enclosure("x [row] y"), Some("[row]"));
        assert_eq!(enclosure("x [/row] y"), Some("[/row]"));
        assert_eq!(enclosure("x [row/] y"), Some("[row/]"));
        assert_eq!(enclosure("x [row /] y"), Some("[row /]"));
        assert_eq!(enclosure("[a]"), Some("[a]"));
    }

    #[test]
    fn test_enclosure_skips_non_tags() {
        assert_eq!(enclosure("see [1] and [see: notes]"), None);
        assert_eq!(enclosure("[ row ]"), None);
        assert_eq!(enclosure("[row a=]"), None);
        assert_eq!(enclosure("[[row]]"), Some("[row]"));
    }

    #[test]
    fn test_enclosure_with_params() {
        let input = r#"text [row a=1 b=2.5 c flag d="x y" e='z'] more"#;
        assert_eq!(
            enclosure(input),
            Some(r#"[row a=1 b=2.5 c flag d="x y" e='z']"#)
        );
    }

    #[test]
    fn test_unquoted_value_never_ends_in_slash() {
        assert!(SELF_CLOSING.is_match("[img src=a/b/]"));
        assert!(!OPEN.is_match("[img src=a/b/]"));
        assert!(OPEN.is_match("[img src=a/b]"));
    }

    #[test]
    fn test_open_captures() {
        let caps = OPEN.captures(r#"[row a=1 d="x y"]"#).unwrap();
        assert_eq!(&caps["name"], "row");
        assert_eq!(&caps["params"], r#" a=1 d="x y""#);

        let caps = OPEN.captures("[row]").unwrap();
        assert_eq!(&caps["name"], "row");
        assert!(caps.name("params").is_none());
    }

    #[test]
    fn test_self_closing_captures() {
        let caps = SELF_CLOSING.captures("[row flag /]").unwrap();
        assert_eq!(&caps["name"], "row");
        assert_eq!(caps["params"].trim(), "flag");
    }

    #[test]
    fn test_close_captures() {
        let caps = CLOSE.captures("[/row]").unwrap();
        assert_eq!(&caps["name"], "row");
        assert!(!CLOSE.is_match("[/row a=1]"));
    }

    #[test]
    fn test_grammars_are_anchored() {
        assert!(!OPEN.is_match("x[row]"));
        assert!(!OPEN.is_match("[row]x"));
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("[/row]"), TokenKind::Close);
        assert_eq!(classify("[row/]"), TokenKind::SelfClosing);
        assert_eq!(classify("[row /]"), TokenKind::SelfClosing);
        assert_eq!(classify("[row]"), TokenKind::Open);
    }

    #[test]
    fn test_tag_names() {
        assert!(OPEN.is_match("[row_1-a]"));
        assert!(OPEN.is_match("[r]"));
        assert!(!OPEN.is_match("[1row]"));
        assert!(!OPEN.is_match("[_row]"));
    }
}
