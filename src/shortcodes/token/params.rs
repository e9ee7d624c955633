//! Parameter mapping
//!
//!     Tag parameters are a mapping from unique keys to primitive values. Keys are tag
//!     names (same grammar). A repeated key keeps the last value seen.
//!
//!     Values captured by the lexer are only ever strings or flags:
//!
//!         - quoted values have their surrounding quote characters stripped
//!         - bare flags (`[row hidden]`) become `true`
//!         - everything else, numbers included, is kept as literal text
//!
//!     Numeric-looking values are deliberately not coerced. `ParamValue::as_i64` and
//!     `ParamValue::as_f64` parse on demand for callers that want numbers. Integer and
//!     float variants exist for parameters supplied by callers at render time.

use crate::shortcodes::lexing::grammar::PARAM;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A primitive parameter value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Str(String),
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl ParamValue {
    /// The value as text, if it is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Boolean view: flags, plus the literals the serializer writes for booleans
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            ParamValue::Str(s) => match s.as_str() {
                "yes" | "true" => Some(true),
                "no" | "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Integer view, parsing string values on demand
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParamValue::Int(i) => Some(*i),
            ParamValue::Str(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Float view, parsing string values on demand
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Float(f) => Some(*f),
            ParamValue::Int(i) => Some(*i as f64),
            ParamValue::Str(s) => s.parse().ok(),
            ParamValue::Bool(_) => None,
        }
    }
}

/// Renders the value the way it appears after `key=` in shortcode text
impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(s) => write!(f, "\"{}\"", s),
            ParamValue::Bool(true) => write!(f, "yes"),
            ParamValue::Bool(false) => write!(f, "no"),
            ParamValue::Int(i) => write!(f, "{}", i),
            ParamValue::Float(x) => write!(f, "{}", x),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

/// Parameters of a tag, keyed by name
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Params {
    entries: BTreeMap<String, ParamValue>,
}

impl Params {
    pub const fn new() -> Self {
        Params {
            entries: BTreeMap::new(),
        }
    }

    /// Parse the parameter section of a tag body (everything after the name).
    ///
    /// The section is expected to already satisfy the tag grammar; anything the
    /// parameter pattern does not recognise is skipped.
    pub fn parse(section: &str) -> Self {
        let mut params = Params::new();
        for caps in PARAM.captures_iter(section) {
            let key = &caps["key"];
            let value = match caps.name("value") {
                Some(raw) => cast_value(raw.as_str()),
                None => ParamValue::Bool(true),
            };
            params.insert(key, value);
        }
        params
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert a value, returning the one it replaced
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Option<ParamValue> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Render as ` key=value` pairs, each preceded by a space
    pub fn to_shortcode_string(&self) -> String {
        self.iter()
            .map(|(key, value)| format!(" {}={}", key, value))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// Strip surrounding quotes; every other value is kept as literal text
fn cast_value(raw: &str) -> ParamValue {
    let unquoted = raw
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| raw.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
        .unwrap_or(raw);
    ParamValue::Str(unquoted.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_params() {
        let params = Params::parse(r#" a=1 b=2.5 c flag d="x y" e='z'"#);

        assert_eq!(params.len(), 6);
        assert_eq!(params.get("a"), Some(&ParamValue::from("1")));
        assert_eq!(params.get("b"), Some(&ParamValue::from("2.5")));
        assert_eq!(params.get("c"), Some(&ParamValue::Bool(true)));
        assert_eq!(params.get("flag"), Some(&ParamValue::Bool(true)));
        assert_eq!(params.get("d"), Some(&ParamValue::from("x y")));
        assert_eq!(params.get("e"), Some(&ParamValue::from("z")));
    }

    #[test]
    fn test_parse_empty_section() {
        assert!(Params::parse("").is_empty());
        assert!(Params::parse("   ").is_empty());
    }

    #[test]
    fn test_repeated_key_keeps_last() {
        let params = Params::parse(" a=1 a=2");
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("a"), Some(&ParamValue::from("2")));
    }

    #[test]
    fn test_quoted_values_keep_inner_quotes_of_other_kind() {
        let params = Params::parse(r#" a="it's" b='say "hi"'"#);
        assert_eq!(params.get("a"), Some(&ParamValue::from("it's")));
        assert_eq!(params.get("b"), Some(&ParamValue::from(r#"say "hi""#)));
    }

    #[test]
    fn test_empty_quoted_value() {
        let params = Params::parse(r#" a="""#);
        assert_eq!(params.get("a"), Some(&ParamValue::from("")));
    }

    #[test]
    fn test_numbers_are_not_coerced() {
        let params = Params::parse(" n=42 x=1.5");
        let n = params.get("n").unwrap();
        assert_eq!(n.as_str(), Some("42"));
        assert_eq!(n.as_i64(), Some(42));
        assert_eq!(params.get("x").unwrap().as_f64(), Some(1.5));
    }

    #[test]
    fn test_as_bool() {
        assert_eq!(ParamValue::Bool(false).as_bool(), Some(false));
        assert_eq!(ParamValue::from("yes").as_bool(), Some(true));
        assert_eq!(ParamValue::from("no").as_bool(), Some(false));
        assert_eq!(ParamValue::from("maybe").as_bool(), None);
        assert_eq!(ParamValue::Int(1).as_bool(), None);
    }

    #[test]
    fn test_value_display() {
        assert_eq!(ParamValue::from("x y").to_string(), "\"x y\"");
        assert_eq!(ParamValue::Bool(true).to_string(), "yes");
        assert_eq!(ParamValue::Bool(false).to_string(), "no");
        assert_eq!(ParamValue::Int(3).to_string(), "3");
        assert_eq!(ParamValue::Float(2.5).to_string(), "2.5");
    }

    #[test]
    fn test_to_shortcode_string_is_key_ordered() {
        let params: Params = [("b", ParamValue::Bool(true)), ("a", ParamValue::from("1"))]
            .into_iter()
            .collect();
        assert_eq!(params.to_shortcode_string(), r#" a="1" b=yes"#);
    }
}
