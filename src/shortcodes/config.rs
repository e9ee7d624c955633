//! Configuration for the shortcodes toolchain.
//!
//! `defaults/shortcodes.default.toml` is embedded so documented defaults and runtime
//! behavior stay in sync. Applications layer user files and overrides on top of it
//! via [`Loader`] before deserializing into [`ShortcodesConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use crate::shortcodes::formats::treeviz::DEFAULT_LABEL_WIDTH;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/shortcodes.default.toml");

/// Options that control how a tokenizer builds its forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TokenizerOptions {
    /// Report recovered nesting errors at warn level. Never changes parse results.
    pub strict: bool,
    /// Drop whitespace-only text while building the forest.
    pub skip_whitespace: bool,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self {
            strict: true,
            skip_whitespace: false,
        }
    }
}

/// Top-level configuration consumed by shortcodes applications.
#[derive(Debug, Clone, Deserialize)]
pub struct ShortcodesConfig {
    pub tokenizer: TokenizerOptions,
    pub output: OutputConfig,
}

/// Controls forest output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    /// Registered format used when the caller names none.
    pub format: String,
    /// Treeviz labels longer than this many characters are cut.
    pub label_width: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "treeviz".to_string(),
            label_width: DEFAULT_LABEL_WIDTH,
        }
    }
}

/// Layers configuration sources over the embedded defaults.
///
/// Later layers win. Files and TOML text are added in call order; overrides always
/// apply last.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        Self {
            builder: Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml)),
        }
    }

    /// Layer a TOML file that must exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.with_toml_file(path.as_ref(), true)
    }

    /// Layer a TOML file, skipping it when absent (e.g. a per-project `shortcodes.toml`).
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.with_toml_file(path.as_ref(), false)
    }

    fn with_toml_file(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer configuration given as TOML text.
    pub fn with_toml_str(mut self, toml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(toml, FileFormat::Toml));
        self
    }

    /// Override a single dotted key, e.g. `output.format`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Drop whitespace-only text regardless of what the layers say.
    pub fn skip_whitespace(self) -> Result<Self, ConfigError> {
        self.set_override("tokenizer.skip_whitespace", true)
    }

    /// Merge the layers and check the result.
    pub fn build(self) -> Result<ShortcodesConfig, ConfigError> {
        let config: ShortcodesConfig = self.builder.build()?.try_deserialize()?;
        if config.output.label_width == 0 {
            return Err(ConfigError::Message(
                "output.label_width must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<ShortcodesConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.tokenizer, TokenizerOptions::default());
        assert_eq!(config.output.format, "treeviz");
        assert_eq!(config.output.label_width, 30);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("tokenizer.skip_whitespace", true)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert!(config.tokenizer.skip_whitespace);
        assert!(config.tokenizer.strict);
    }

    #[test]
    fn skip_whitespace_overrides_files() {
        let config = Loader::new()
            .with_toml_str("[tokenizer]\nskip_whitespace = false\n")
            .skip_whitespace()
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert!(config.tokenizer.skip_whitespace);
    }

    #[test]
    fn defaults_match_output_config_default() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn zero_label_width_is_rejected() {
        let err = Loader::new()
            .with_toml_str("[output]\nlabel_width = 0\n")
            .build()
            .expect_err("zero width to be rejected");
        assert!(err.to_string().contains("label_width"));
    }

    #[test]
    fn layers_partial_toml() {
        let config = Loader::new()
            .with_toml_str("[output]\nformat = \"json\"\n")
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, "json");
        assert_eq!(config.output.label_width, 30);
    }

    #[test]
    fn missing_required_file_fails() {
        let result = Loader::new()
            .with_file("/definitely/not/here/shortcodes.toml")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/definitely/not/here/shortcodes.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, "treeviz");
    }
}
