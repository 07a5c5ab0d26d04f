use crate::Result;
use async_trait::async_trait;
use rat_types::Node;

/// Operations the client needs from the graph server.
///
/// Implemented over HTTP by [`crate::HttpGraphApi`] and in memory by the
/// testing crate's fake.
#[async_trait]
pub trait GraphApi: Send + Sync {
    /// A node with its immediate children and parsed AST.
    async fn read(&self, path: &str) -> Result<Node>;

    /// Create `name` under `parent_path`, returning the new node.
    async fn create(&self, parent_path: &str, name: &str) -> Result<Node>;

    async fn remove(&self, path: &str) -> Result<()>;

    /// Rewrite the path of the node with this id.
    async fn move_node(&self, id: &str, new_path: &str) -> Result<()>;

    /// Paths containing `query`.
    async fn search(&self, query: &str) -> Result<Vec<String>>;

    /// Every node path.
    async fn index(&self) -> Result<Vec<String>>;
}
