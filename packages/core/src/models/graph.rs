//! Graph Record Structures
//!
//! This module defines the plain records exchanged with the rendering layer:
//! `Node`, `Link` and the `Graph` pair that bundles them.
//!
//! # Wire Format
//!
//! Records serialize with the field names the matrix view already consumes:
//!
//! - Nodes: `id`, `type`, `neighbors`, `CHILDREN`, `parentPosition`, plus any
//!   domain attributes flattened at the top level
//! - Links: `_from`, `_to`, `source`, `target`, `type`, `sourceID`, `targetID`,
//!   plus pass-through domain attributes
//!
//! # Examples
//!
//! ```rust
//! use supergraph_core::models::{Graph, Link, Node};
//! use serde_json::json;
//!
//! let graph = Graph::new(
//!     vec![
//!         Node::new("people/a", json!({ "team": "red" })),
//!         Node::new("people/b", json!({ "team": "blue" })),
//!     ],
//!     vec![Link::new("people/a", "people/b")],
//! );
//!
//! assert_eq!(graph.nodes.len(), 2);
//! assert_eq!(graph.links[0].source, "people/a");
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Kind of a node record inside an aggregated graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    /// A record from the flat graph
    Node,
    /// A synthetic record grouping flat nodes
    Supernode,
}

/// Kind of a link record inside an aggregated graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LinkKind {
    /// A link between two flat nodes (or a flat node and a supernode once expanded)
    Link,
    /// A link whose endpoints were rewritten to supernodes
    SuperLink,
}

/// A node in a flat or aggregated graph.
///
/// # Fields
///
/// - `id`: Globally unique identifier within one graph state
/// - `node_type`: `node` or `supernode`; absent on raw flat input
/// - `neighbors`: Adjacent node ids, always derived from the current link list
/// - `children`: Ordered member ids of a supernode (flat node ids only)
/// - `parent_position`: Display index of the owning supernode for expanded children
/// - `properties`: Every other attribute, kept verbatim
///
/// A flat node whose own `type` attribute is not `node` or `supernode` reads
/// as untyped; that value is not kept, since every transformation stamps
/// `type` itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,

    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient_kind",
        skip_serializing_if = "Option::is_none"
    )]
    pub node_type: Option<NodeKind>,

    #[serde(default)]
    pub neighbors: Vec<String>,

    #[serde(rename = "CHILDREN", default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<String>>,

    #[serde(
        rename = "parentPosition",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub parent_position: Option<usize>,

    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl Node {
    /// Create an untyped flat node.
    ///
    /// Non-object `properties` values are ignored; attributes always live in a
    /// JSON object.
    pub fn new(id: impl Into<String>, properties: Value) -> Self {
        Self {
            id: id.into(),
            node_type: None,
            neighbors: Vec::new(),
            children: None,
            parent_position: None,
            properties: into_object(properties),
        }
    }

    /// Create a supernode record with the given members
    pub fn supernode(id: impl Into<String>, children: Vec<String>, properties: Value) -> Self {
        Self {
            id: id.into(),
            node_type: Some(NodeKind::Supernode),
            neighbors: Vec::new(),
            children: Some(children),
            parent_position: None,
            properties: into_object(properties),
        }
    }

    /// True for records that group other nodes.
    ///
    /// A record counts as a supernode when it is typed `supernode`, or when it
    /// carries `CHILDREN` without being explicitly typed `node`.
    pub fn is_supernode(&self) -> bool {
        match self.node_type {
            Some(NodeKind::Supernode) => true,
            Some(NodeKind::Node) => false,
            None => self.children.is_some(),
        }
    }

    /// True for records explicitly typed `node`
    pub fn is_child_node(&self) -> bool {
        self.node_type == Some(NodeKind::Node)
    }

    /// Member ids of a supernode (empty for plain nodes)
    pub fn children_ids(&self) -> &[String] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Look up an attribute, treating `id` as an attribute too
    pub fn attribute(&self, key: &str) -> Option<Value> {
        if key == "id" {
            return Some(Value::String(self.id.clone()));
        }
        self.properties.get(key).cloned()
    }

    /// Group key for this node under `attribute` (see [`group_key`])
    pub fn group_key(&self, attribute: &str) -> String {
        group_key(self.attribute(attribute).as_ref())
    }
}

/// A link between two nodes.
///
/// `from`/`to` are the canonical endpoints; `source`/`target` mirror them for
/// the display layer and are re-synced by every transformation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    #[serde(rename = "_from")]
    pub from: String,

    #[serde(rename = "_to")]
    pub to: String,

    #[serde(default)]
    pub source: String,

    #[serde(default)]
    pub target: String,

    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient_kind",
        skip_serializing_if = "Option::is_none"
    )]
    pub link_type: Option<LinkKind>,

    /// Original `_from` of a schema superlink
    #[serde(rename = "sourceID", default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,

    /// Original `_to` of a schema superlink
    #[serde(rename = "targetID", default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,

    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl Link {
    /// Create an untyped link with `source`/`target` in sync
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        let from = from.into();
        let to = to.into();
        Self {
            source: from.clone(),
            target: to.clone(),
            from,
            to,
            link_type: None,
            source_id: None,
            target_id: None,
            properties: Map::new(),
        }
    }

    /// Attach pass-through domain attributes
    pub fn with_properties(mut self, properties: Value) -> Self {
        self.properties = into_object(properties);
        self
    }

    /// Point `_from` (and `source`) at another node
    pub fn redirect_from(&mut self, id: &str) {
        self.from = id.to_string();
        self.source = self.from.clone();
    }

    /// Point `_to` (and `target`) at another node
    pub fn redirect_to(&mut self, id: &str) {
        self.to = id.to_string();
        self.target = self.to.clone();
    }

    /// Copy `_from`/`_to` into the display mirrors
    pub fn sync_endpoints(&mut self) {
        self.source = self.from.clone();
        self.target = self.to.clone();
    }
}

/// A node list plus the link list that connects it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
}

impl Graph {
    pub fn new(nodes: Vec<Node>, links: Vec<Link>) -> Self {
        Self { nodes, links }
    }

    /// Parse a graph from its JSON wire form
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Pretty-printed JSON wire form
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Find a node by id
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Display position of a node
    pub fn position(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|node| node.id == id)
    }

    /// Node ids in display order
    pub fn node_ids(&self) -> Vec<&str> {
        self.nodes.iter().map(|node| node.id.as_str()).collect()
    }

    /// Supernode records in display order
    pub fn supernodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|node| node.is_supernode())
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }
}

/// Normalize an attribute value into a group key.
///
/// Strings are used as-is, numbers and booleans by their JSON text, JSON
/// `null` becomes `"null"` and a missing attribute becomes `"undefined"`, so
/// every node lands in exactly one group and equal keys share one supernode.
pub fn group_key(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::Null) => "null".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Read a `type` field, treating values outside the known kinds as absent
fn lenient_kind<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|raw| serde_json::from_value(raw).ok()))
}

fn into_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_node_wire_format() {
        let raw = json!({
            "id": "supernodes/X",
            "type": "supernode",
            "CHILDREN": ["a", "b"],
            "GROUP": "X",
            "neighbors": []
        });

        let node: Node = serde_json::from_value(raw).unwrap();
        assert!(node.is_supernode());
        assert_eq!(node.children_ids(), ["a".to_string(), "b".to_string()]);
        assert_eq!(node.properties.get("GROUP"), Some(&json!("X")));

        let back = serde_json::to_value(&node).unwrap();
        assert_eq!(back["CHILDREN"], json!(["a", "b"]));
        assert_eq!(back["type"], json!("supernode"));
        assert!(back.get("parentPosition").is_none());
    }

    #[test]
    fn test_link_wire_format() {
        let raw = json!({
            "_from": "people/a",
            "_to": "people/b",
            "type": "superLink",
            "weight": 3
        });

        let link: Link = serde_json::from_value(raw).unwrap();
        assert_eq!(link.from, "people/a");
        assert_eq!(link.link_type, Some(LinkKind::SuperLink));
        // Mirrors default to empty when the producer omitted them
        assert!(link.source.is_empty());
        assert_eq!(link.properties.get("weight"), Some(&json!(3)));

        let back = serde_json::to_value(&link).unwrap();
        assert_eq!(back["_to"], json!("people/b"));
        assert!(back.get("sourceID").is_none());
    }

    #[test]
    fn test_domain_type_attribute_reads_as_untyped() {
        let graph = Graph::from_json_str(
            r#"{
                "nodes": [
                    { "id": "people/a", "type": "person" },
                    { "id": "people/b", "type": "node" }
                ],
                "links": [
                    { "_from": "people/a", "_to": "people/b", "type": "friend" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(graph.nodes[0].node_type, None);
        assert_eq!(graph.nodes[1].node_type, Some(NodeKind::Node));
        assert_eq!(graph.links[0].link_type, None);
    }

    #[test]
    fn test_untyped_node_with_children_is_supernode() {
        let mut node = Node::new("g", json!({}));
        assert!(!node.is_supernode());

        node.children = Some(vec!["a".to_string()]);
        assert!(node.is_supernode());

        node.node_type = Some(NodeKind::Node);
        assert!(!node.is_supernode());
        assert!(node.is_child_node());
    }

    #[test]
    fn test_group_key_normalization() {
        assert_eq!(group_key(None), "undefined");
        assert_eq!(group_key(Some(&Value::Null)), "null");
        assert_eq!(group_key(Some(&json!("X"))), "X");
        assert_eq!(group_key(Some(&json!(42))), "42");
        assert_eq!(group_key(Some(&json!(true))), "true");
    }

    #[test]
    fn test_id_is_an_attribute() {
        let node = Node::new("people/a", json!({ "team": "red" }));
        assert_eq!(node.group_key("id"), "people/a");
        assert_eq!(node.group_key("team"), "red");
        assert_eq!(node.group_key("missing"), "undefined");
    }

    #[test]
    fn test_redirect_keeps_mirrors_in_sync() {
        let mut link = Link::new("a", "b");
        link.redirect_from("supernodes/X");
        link.redirect_to("supernodes/Y");
        assert_eq!(link.source, "supernodes/X");
        assert_eq!(link.target, "supernodes/Y");
    }
}
