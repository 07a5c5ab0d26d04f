use serde::{Deserialize, Serialize};

use super::ast::NodeAstPart;

/// A document in the graph.
///
/// `id` is stable across moves; `path` is the slash-delimited location and
/// changes when the node is moved. `length` is only a size hint used for
/// balancing child columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    pub name: String,
    pub path: String,

    #[serde(default)]
    pub length: u64,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub child_nodes: Vec<Node>,

    #[serde(default)]
    pub ast: NodeAstPart,
}

impl Node {
    /// Identity fields only, detached from content.
    pub fn header(&self) -> NodeHeader {
        NodeHeader {
            id: self.id.clone(),
            name: self.name.clone(),
            path: self.path.clone(),
        }
    }
}

/// The identity portion of a node shown in the console bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeHeader {
    pub id: String,
    pub name: String,
    pub path: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Node>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let nodes: Option<Vec<Node>> = Option::deserialize(deserializer)?;
    Ok(nodes.unwrap_or_default())
}
