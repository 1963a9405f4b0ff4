use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

use super::vocabulary::ComponentType;

/// Id of the synthetic root entry present in every graph.
pub const ROOT_ID: &str = "ROOT";

/// Internal editor node kind tolerated by validation without being a
/// vocabulary member.
pub const CANVAS_TYPE: &str = "Canvas";

/// Resolved type of a graph node: either a vocabulary member or whatever
/// string the source carried. Serializes as the bare name in both cases, so
/// the wire format stays a plain string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
pub enum ResolvedType {
    Known(ComponentType),
    Unknown(String),
}

impl ResolvedType {
    pub fn parse(name: &str) -> Self {
        ComponentType::from_str(name)
            .map(Self::Known)
            .unwrap_or_else(|_| Self::Unknown(name.to_string()))
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Known(component) => component.as_ref(),
            Self::Unknown(name) => name,
        }
    }
}

/// Wrapper matching the renderer's `{ "resolvedName": ... }` type encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct NodeType {
    pub resolved_name: ResolvedType,
}

impl NodeType {
    pub fn known(component: ComponentType) -> Self {
        Self {
            resolved_name: ResolvedType::Known(component),
        }
    }
}

/// One entry in the flat node map the editor deserializes. Field names and
/// shape are the renderer's contract and must not drift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default = "default_true")]
    pub is_canvas: bool,
    #[serde(default)]
    pub props: Map<String, Value>,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub custom: Map<String, Value>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub nodes: Vec<String>,
    #[serde(default)]
    pub linked_nodes: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

fn default_true() -> bool {
    true
}

impl GraphNode {
    /// The synthetic full-page canvas every page hangs off.
    pub fn root() -> Self {
        let mut props = Map::new();
        props.insert("fullWidth".to_string(), Value::Bool(true));
        props.insert("height".to_string(), Value::String("screen".to_string()));
        props.insert("bgColor".to_string(), Value::String("#ffffff".to_string()));
        props.insert("paddingY".to_string(), Value::String("none".to_string()));
        Self {
            node_type: NodeType::known(ComponentType::Section),
            is_canvas: true,
            props,
            display_name: "Section".to_string(),
            custom: Map::new(),
            hidden: false,
            nodes: Vec::new(),
            linked_nodes: Map::new(),
            parent: None,
        }
    }
}

/// Flat node map keyed by node id. Ordered so serialization is stable.
pub type PageGraph = BTreeMap<String, GraphNode>;
