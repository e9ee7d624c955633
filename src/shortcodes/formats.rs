//! Output formats for forests and token streams
//!
//! This module contains the format implementations:
//! - the shortcode serializer, including template building
//! - treeviz, a one line per node view
//! - JSON and YAML snapshots of the forest
//! - the detokenizer, which turns token streams back into source text

pub mod detokenizer;
pub mod registry;
pub mod shortcode;
pub mod snapshot;
pub mod treeviz;

pub use detokenizer::{detokenize, ToShortcodeString};
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use shortcode::{build_template, render, RenderParams, ShortcodeFormatter, SLOT};
pub use snapshot::{
    snapshot_forest, snapshot_node, snapshots_to_json, snapshots_to_yaml, JsonFormatter,
    NodeSnapshot, YamlFormatter,
};
pub use treeviz::{to_treeviz_str, to_treeviz_str_with_width, TreevizFormatter};
