//! Node snapshots - a normalized, serializable view of a forest
//!
//! Structured formats (JSON, YAML) serialize snapshots rather than nodes, so they all
//! share one shape: node type, label, attributes and children.
//!
//! Snapshots are built, dropped and written without recursion. serde still handles each
//! node's own fields, while the writers below walk the nesting with an explicit stack so
//! deeply nested forests cannot overflow the call stack.

use super::registry::{FormatError, Formatter};
use crate::shortcodes::ast::Node;
use crate::shortcodes::token::{ParamValue, Token};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A snapshot of a node in a normalized, serializable form
///
/// The derived `Clone`, `PartialEq` and serde impls recurse once per level. Use
/// [`snapshots_to_json`] and [`snapshots_to_yaml`] to write snapshots of deep forests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    /// The kind of node (e.g. "Open", "Text")
    pub node_type: String,

    /// Tag name, or the trimmed body of a text node
    pub label: String,

    /// Parameters plus the source position
    pub attributes: BTreeMap<String, String>,

    pub children: Vec<NodeSnapshot>,
}

impl NodeSnapshot {
    pub fn new(node_type: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            label: label.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_children(mut self, children: Vec<NodeSnapshot>) -> Self {
        self.children.extend(children);
        self
    }
}

fn node_type(node: &Node) -> &'static str {
    match node.token() {
        Token::Text { .. } => "Text",
        Token::Open(_) => "Open",
        Token::Close(_) => "Close",
        Token::SelfClosing(_) => "SelfClosing",
        Token::Root => "Root",
    }
}

fn attribute_value(value: &ParamValue) -> String {
    match value {
        ParamValue::Str(s) => s.clone(),
        other => other.to_string(),
    }
}

impl Drop for NodeSnapshot {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut snapshot) = pending.pop() {
            pending.append(&mut snapshot.children);
        }
    }
}

/// The fields of a snapshot that serde writes directly
#[derive(Serialize)]
struct Fields<'a> {
    node_type: &'a str,
    label: &'a str,
    attributes: &'a BTreeMap<String, String>,
}

impl<'a> From<&'a NodeSnapshot> for Fields<'a> {
    fn from(snapshot: &'a NodeSnapshot) -> Self {
        Fields {
            node_type: &snapshot.node_type,
            label: &snapshot.label,
            attributes: &snapshot.attributes,
        }
    }
}

/// Snapshot a single node, without its children
fn snapshot_leaf(node: &Node) -> NodeSnapshot {
    let label = node.name().or(node.text().map(str::trim)).unwrap_or_default();
    let mut snapshot = NodeSnapshot::new(node_type(node), label)
        .with_attribute("position", node.position().to_string());
    for (key, value) in node.params().iter() {
        snapshot = snapshot.with_attribute(key, attribute_value(value));
    }
    snapshot
}

enum Step<'a> {
    Enter(&'a Node),
    Exit(&'a Node),
}

/// Snapshot a node and everything below it
pub fn snapshot_node(node: &Node) -> NodeSnapshot {
    let mut built: Vec<NodeSnapshot> = Vec::new();
    let mut steps = vec![Step::Enter(node)];

    while let Some(step) = steps.pop() {
        match step {
            Step::Enter(node) => {
                steps.push(Step::Exit(node));
                steps.extend(node.children().iter().rev().map(Step::Enter));
            }
            Step::Exit(node) => {
                let children = built.split_off(built.len() - node.children().len());
                built.push(snapshot_leaf(node).with_children(children));
            }
        }
    }

    built.pop().unwrap_or_else(|| snapshot_leaf(node))
}

/// Snapshot each top-level node of a forest
pub fn snapshot_forest(forest: &[Node]) -> Vec<NodeSnapshot> {
    forest.iter().map(snapshot_node).collect()
}

/// Append `text` to `out`, indenting every line after the first by `pad`
fn push_indented(out: &mut String, text: &str, pad: &str) {
    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            out.push('\n');
            out.push_str(pad);
        }
        out.push_str(line);
    }
}

enum JsonStep<'a> {
    Object {
        snapshot: &'a NodeSnapshot,
        depth: usize,
        is_last: bool,
    },
    CloseChildren {
        depth: usize,
        is_last: bool,
    },
}

fn json_items(items: &[NodeSnapshot], depth: usize) -> impl Iterator<Item = JsonStep<'_>> {
    let last = items.len().saturating_sub(1);
    items
        .iter()
        .enumerate()
        .rev()
        .map(move |(i, snapshot)| JsonStep::Object {
            snapshot,
            depth,
            is_last: i == last,
        })
}

fn close_object(out: &mut String, pad: &str, is_last: bool) {
    out.push_str(pad);
    out.push('}');
    if !is_last {
        out.push(',');
    }
    out.push('\n');
}

/// Pretty JSON for a list of snapshots, two spaces per level
pub fn snapshots_to_json(snapshots: &[NodeSnapshot]) -> Result<String, serde_json::Error> {
    if snapshots.is_empty() {
        return Ok("[]".to_string());
    }

    let mut out = String::from("[\n");
    let mut stack: Vec<JsonStep<'_>> = json_items(snapshots, 1).collect();

    while let Some(step) = stack.pop() {
        match step {
            JsonStep::Object {
                snapshot,
                depth,
                is_last,
            } => {
                let pad = "  ".repeat(depth);
                let field_pad = "  ".repeat(depth + 1);
                let fields = Fields::from(snapshot);

                out.push_str(&pad);
                out.push_str("{\n");
                out.push_str(&field_pad);
                out.push_str("\"node_type\": ");
                out.push_str(&serde_json::to_string(fields.node_type)?);
                out.push_str(",\n");
                out.push_str(&field_pad);
                out.push_str("\"label\": ");
                out.push_str(&serde_json::to_string(fields.label)?);
                out.push_str(",\n");
                out.push_str(&field_pad);
                out.push_str("\"attributes\": ");
                push_indented(
                    &mut out,
                    &serde_json::to_string_pretty(fields.attributes)?,
                    &field_pad,
                );
                out.push_str(",\n");
                out.push_str(&field_pad);

                if snapshot.children.is_empty() {
                    out.push_str("\"children\": []\n");
                    close_object(&mut out, &pad, is_last);
                } else {
                    out.push_str("\"children\": [\n");
                    stack.push(JsonStep::CloseChildren { depth, is_last });
                    stack.extend(json_items(&snapshot.children, depth + 2));
                }
            }
            JsonStep::CloseChildren { depth, is_last } => {
                out.push_str(&"  ".repeat(depth + 1));
                out.push_str("]\n");
                close_object(&mut out, &"  ".repeat(depth), is_last);
            }
        }
    }

    out.push(']');
    Ok(out)
}

/// Block-style YAML for a list of snapshots
///
/// Each item is written as `- ` followed by its fields, with `children` nested as a
/// sequence at the same indentation as the item's keys.
pub fn snapshots_to_yaml(snapshots: &[NodeSnapshot]) -> Result<String, serde_yaml::Error> {
    if snapshots.is_empty() {
        return Ok("[]\n".to_string());
    }

    let mut out = String::new();
    let mut stack: Vec<(&NodeSnapshot, usize)> = snapshots.iter().rev().map(|s| (s, 0)).collect();

    while let Some((snapshot, depth)) = stack.pop() {
        let pad = "  ".repeat(depth);
        let fields = serde_yaml::to_string(&Fields::from(snapshot))?;

        for (i, line) in fields.lines().enumerate() {
            if line.is_empty() {
                out.push('\n');
                continue;
            }
            out.push_str(&pad);
            out.push_str(if i == 0 { "- " } else { "  " });
            out.push_str(line);
            out.push('\n');
        }

        out.push_str(&pad);
        if snapshot.children.is_empty() {
            out.push_str("  children: []\n");
        } else {
            out.push_str("  children:\n");
            stack.extend(snapshot.children.iter().rev().map(|child| (child, depth + 1)));
        }
    }

    Ok(out)
}

/// JSON output of the forest snapshot
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, forest: &[Node]) -> Result<String, FormatError> {
        snapshots_to_json(&snapshot_forest(forest))
            .map_err(|err| FormatError::SerializationError(err.to_string()))
    }

    fn description(&self) -> &str {
        "Forest snapshot as JSON"
    }
}

/// YAML output of the forest snapshot
pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, forest: &[Node]) -> Result<String, FormatError> {
        snapshots_to_yaml(&snapshot_forest(forest))
            .map_err(|err| FormatError::SerializationError(err.to_string()))
    }

    fn description(&self) -> &str {
        "Forest snapshot as YAML"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shortcodes::parse;

    #[test]
    fn test_snapshot_shape() {
        let forest = parse("[box size=l]  hi [row/][/box]").unwrap();
        let snapshot = snapshot_node(&forest[0]);

        assert_eq!(snapshot.node_type, "Open");
        assert_eq!(snapshot.label, "box");
        assert_eq!(snapshot.attributes["size"], "l");
        assert_eq!(snapshot.attributes["position"], "0");
        assert_eq!(snapshot.children.len(), 2);
        assert_eq!(snapshot.children[0].node_type, "Text");
        assert_eq!(snapshot.children[0].label, "hi");
        assert_eq!(snapshot.children[1].node_type, "SelfClosing");
    }

    #[test]
    fn test_flag_attributes_render_as_yes() {
        let forest = parse("[row hidden/]").unwrap();
        let snapshot = snapshot_node(&forest[0]);
        assert_eq!(snapshot.attributes["hidden"], "yes");
    }

    #[test]
    fn test_json_round_trips_snapshot() {
        let forest = parse("[a]x[/a]").unwrap();
        let json = JsonFormatter.serialize(&forest).unwrap();
        let back: Vec<NodeSnapshot> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot_forest(&forest));
    }

    #[test]
    fn test_json_matches_serde_pretty_layout() {
        let forest = parse("[a k=v]x[b][c/][/b][/a][d/]").unwrap();
        let snapshots = snapshot_forest(&forest);
        assert_eq!(
            snapshots_to_json(&snapshots).unwrap(),
            serde_json::to_string_pretty(&snapshots).unwrap()
        );
        assert_eq!(snapshots_to_json(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_yaml_round_trips_nested_snapshot() {
        let forest = parse("[a k=\"two words\"]line one\n\nline two[b/][/a]tail").unwrap();
        let snapshots = snapshot_forest(&forest);
        let yaml = snapshots_to_yaml(&snapshots).unwrap();
        let back: Vec<NodeSnapshot> = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, snapshots);
    }

    #[test]
    fn test_snapshot_is_built_bottom_up_in_order() {
        let forest = parse("[a]1[b]2[/b]3[/a]").unwrap();
        let snapshot = snapshot_node(&forest[0]);
        let labels: Vec<&str> = snapshot.children.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["1", "b", "3"]);
        assert_eq!(snapshot.children[1].children[0].label, "2");
    }

    #[test]
    fn test_yaml_output() {
        let forest = parse("[a/]").unwrap();
        let yaml = YamlFormatter.serialize(&forest).unwrap();
        assert!(yaml.contains("node_type: SelfClosing"));
        assert!(yaml.contains("label: a"));
    }
}
