//! Format registry
//!
//! Every way of printing a forest implements [`Formatter`] and is looked up by name in a
//! [`FormatRegistry`]. The CLI builds its registry from the `[output]` table of the
//! configuration, so the configured format and label width apply without extra wiring.

use crate::shortcodes::ast::Node;
use crate::shortcodes::config::OutputConfig;
use std::collections::HashMap;
use std::fmt;

/// Error that can occur during formatting
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Format not found in registry
    FormatNotFound(String),
    /// Error during serialization
    SerializationError(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            FormatError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {}

/// Trait for forest formatters
pub trait Formatter: Send + Sync {
    /// The name of this format (e.g., "treeviz", "shortcode")
    fn name(&self) -> &str;

    /// Serialize a forest to this format
    fn serialize(&self, forest: &[Node]) -> Result<String, FormatError>;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }
}

/// Formatters looked up by name, plus the format used when the caller names none
///
/// The built-in set is `shortcode`, `treeviz`, `json` and `yaml`. [`OutputConfig`] picks
/// the fallback format and the treeviz label width.
pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
    fallback: String,
}

impl FormatRegistry {
    /// An empty registry that falls back to treeviz
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
            fallback: "treeviz".to_string(),
        }
    }

    /// The built-in formatters with default output settings
    pub fn with_defaults() -> Self {
        Self::with_config(&OutputConfig::default())
    }

    /// The built-in formatters, set up from the `[output]` configuration
    pub fn with_config(output: &OutputConfig) -> Self {
        let mut registry = Self::new();
        registry.fallback = output.format.clone();

        registry.register(super::ShortcodeFormatter);
        registry.register(super::TreevizFormatter::with_label_width(output.label_width));
        registry.register(super::JsonFormatter);
        registry.register(super::YamlFormatter);

        registry
    }

    /// Add a formatter, replacing any registered under the same name
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    /// Name of the format used when none is given
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Serialize `forest` as `format`
    pub fn serialize(&self, forest: &[Node], format: &str) -> Result<String, FormatError> {
        self.get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?
            .serialize(forest)
    }

    /// Serialize `forest` as `format`, or as the fallback format when `format` is `None`
    pub fn serialize_or_fallback(
        &self,
        forest: &[Node],
        format: Option<&str>,
    ) -> Result<String, FormatError> {
        self.serialize(forest, format.unwrap_or(&self.fallback))
    }

    /// Registered format names, sorted
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
