use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Attribute map carried by every AST part.
///
/// Values are whatever the content store emits: strings, numbers, booleans or
/// nested structures (todo hints are a list of objects, for example).
pub type Attributes = BTreeMap<String, Value>;

/// One node of the parsed-document tree.
///
/// `part_type` is an open tag set versioned independently of this client, so it
/// is kept as a raw string. `children` is `None` for true leaves and a (possibly
/// empty) ordered sequence for containers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeAstPart {
    #[serde(rename = "type")]
    pub part_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NodeAstPart>>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: Attributes,
}

impl Default for NodeAstPart {
    fn default() -> Self {
        Self::container("document", Vec::new())
    }
}

impl NodeAstPart {
    pub fn leaf(part_type: impl Into<String>) -> Self {
        Self {
            part_type: part_type.into(),
            children: None,
            attributes: Attributes::new(),
        }
    }

    pub fn container(part_type: impl Into<String>, children: Vec<NodeAstPart>) -> Self {
        Self {
            part_type: part_type.into(),
            children: Some(children),
            attributes: Attributes::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Children in order. Missing and empty children are the same thing here.
    pub fn children(&self) -> &[NodeAstPart] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Mutable child list, materialising an empty one for leaves.
    pub fn children_mut(&mut self) -> &mut Vec<NodeAstPart> {
        self.children.get_or_insert_with(Vec::new)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn has_children(&self) -> bool {
        !self.children().is_empty()
    }

    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// String attribute. Numbers are stringified so ids survive either encoding.
    pub fn attr_str(&self, key: &str) -> Option<String> {
        match self.attributes.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn attr_i64(&self, key: &str) -> Option<i64> {
        match self.attributes.get(key)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn attr_bool(&self, key: &str) -> Option<bool> {
        match self.attributes.get(key)? {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// First string attribute found among `keys`.
    pub fn attr_str_any(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| self.attr_str(key))
    }

    /// Depth-first search for the first part (self included) matching `pred`.
    pub fn find(&self, pred: &dyn Fn(&NodeAstPart) -> bool) -> Option<&NodeAstPart> {
        if pred(self) {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(pred))
    }

    /// Concatenated `text` attributes of this subtree, in document order.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

fn collect_text(part: &NodeAstPart, out: &mut String) {
    if let Some(text) = part.attr_str("text") {
        out.push_str(&text);
    }
    for child in part.children() {
        collect_text(child, out);
    }
}

/// A todo hint as emitted in the `hints` attribute of a `todo` part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoHint {
    #[serde(rename = "type")]
    pub hint_type: String,
    #[serde(default)]
    pub value: Value,
}

impl TodoHint {
    /// Parse the `hints` attribute, skipping entries that do not match the shape.
    pub fn from_attr(value: Option<&Value>) -> Vec<TodoHint> {
        let Some(Value::Array(items)) = value else {
            return Vec::new();
        };
        items
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .collect()
    }

    pub fn display_value(&self) -> String {
        match &self.value {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            Value::Array(items) => items
                .iter()
                .map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", "),
            other => other.to_string(),
        }
    }
}
