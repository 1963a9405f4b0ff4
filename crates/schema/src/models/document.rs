use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

/// A component in the semantic tree, as emitted by the model or produced by
/// the section transformer. Not yet validated against the vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
pub struct ComponentNode {
    #[serde(rename = "type", default)]
    pub component_type: String,
    #[serde(default)]
    pub props: Map<String, Value>,
    #[serde(default)]
    pub children: Vec<ComponentNode>,
}

impl ComponentNode {
    pub fn new(component_type: impl Into<String>) -> Self {
        Self {
            component_type: component_type.into(),
            props: Map::new(),
            children: Vec::new(),
        }
    }

    pub fn prop(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.props.insert(key.to_string(), value.into());
        self
    }

    pub fn child(mut self, child: ComponentNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: Vec<ComponentNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Tolerant conversion from a raw descriptor. `None` when the value is
    /// not a JSON object. A missing `type` becomes the empty string; children
    /// that are null or bare strings are dropped, matching the graph
    /// builder's skip rule.
    pub fn from_value(value: &Value) -> Option<Self> {
        let map = value.as_object()?;
        let component_type = map
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let props = map
            .get("props")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        let children = map
            .get("children")
            .and_then(Value::as_array)
            .map(|kids| kids.iter().filter_map(Self::from_value).collect())
            .unwrap_or_default();
        Some(Self {
            component_type,
            props,
            children,
        })
    }
}
