//! Navigation/session store.
//!
//! Holds the node on screen: its identity, AST, child nodes and the kanban
//! working copies mounted from that AST, plus the modal lock shared by every
//! overlay. A navigation replaces all of it in one step when the response
//! arrives; until then the previous node stays in place.

use crate::Error;
use rat_engine::{CardMove, KanbanBoards, ModalLock};
use rat_types::{Node, NodeAstPart, NodeHeader, parent_path};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    Applied,
    Failed,
    /// Superseded by a newer navigation; nothing changed.
    Stale,
}

#[derive(Debug, Default)]
pub struct NavigationStore {
    header: Option<NodeHeader>,
    ast: NodeAstPart,
    child_nodes: Vec<Node>,
    error: Option<String>,
    boards: KanbanBoards,
    modal_lock: ModalLock,
    generation: u64,
    pending: Option<String>,
}

impl NavigationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(&self) -> Option<&NodeHeader> {
        self.header.as_ref()
    }

    pub fn ast(&self) -> &NodeAstPart {
        &self.ast
    }

    pub fn child_nodes(&self) -> &[Node] {
        &self.child_nodes
    }

    /// Message of the last failed read, shown in place of the content.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_path(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    pub fn current_path(&self) -> &str {
        self.header.as_ref().map(|h| h.path.as_str()).unwrap_or("")
    }

    pub fn parent_path(&self) -> String {
        parent_path(self.current_path())
    }

    pub fn boards(&self) -> &KanbanBoards {
        &self.boards
    }

    /// The AST with every kanban board replaced by its working copy.
    pub fn rendered_ast(&self) -> NodeAstPart {
        self.boards.overlay(&self.ast)
    }

    pub fn modal_lock(&self) -> &ModalLock {
        &self.modal_lock
    }

    pub fn modal_lock_mut(&mut self) -> &mut ModalLock {
        &mut self.modal_lock
    }

    /// Start a navigation. The returned generation must accompany the
    /// response; anything older is dropped.
    pub fn begin_read(&mut self, path: &str) -> u64 {
        self.generation += 1;
        self.pending = Some(path.to_string());
        self.generation
    }

    pub fn apply_read(&mut self, generation: u64, result: Result<Node, Error>) -> ReadOutcome {
        if generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                "dropping stale node response"
            );
            return ReadOutcome::Stale;
        }
        self.pending = None;

        match result {
            Ok(node) => {
                self.replace(node);
                ReadOutcome::Applied
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to read node");
                self.error = Some(err.to_string());
                ReadOutcome::Failed
            }
        }
    }

    fn replace(&mut self, node: Node) {
        self.header = Some(node.header());
        self.boards = KanbanBoards::mount(&node.ast);
        self.ast = node.ast;
        self.child_nodes = node.child_nodes;
        self.error = None;
    }

    /// A node created under the current one joins the child list without a
    /// refetch.
    pub fn append_child(&mut self, node: Node) {
        self.child_nodes.push(node);
    }

    pub fn drop_card(&mut self, card_id: &str, target_column_id: &str) -> Option<CardMove> {
        self.boards.drop_card(card_id, target_column_id)
    }

    pub fn revert_move(&mut self, mv: &CardMove) -> bool {
        self.boards.revert(mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(path: &str) -> Node {
        Node {
            id: format!("id-{}", path),
            name: path.rsplit('/').next().unwrap_or_default().to_string(),
            path: path.to_string(),
            length: 0,
            child_nodes: Vec::new(),
            ast: NodeAstPart::default(),
        }
    }

    #[test]
    fn test_old_node_stays_until_response() {
        let mut store = NavigationStore::new();
        let first = store.begin_read("a");
        store.apply_read(first, Ok(node("a")));

        store.begin_read("a/b");
        assert!(store.is_loading());
        assert_eq!(store.current_path(), "a");
        assert_eq!(store.pending_path(), Some("a/b"));
    }

    #[test]
    fn test_latest_navigation_wins() {
        let mut store = NavigationStore::new();
        let older = store.begin_read("a");
        let newer = store.begin_read("b");

        assert_eq!(store.apply_read(newer, Ok(node("b"))), ReadOutcome::Applied);
        assert_eq!(store.apply_read(older, Ok(node("a"))), ReadOutcome::Stale);
        assert_eq!(store.current_path(), "b");
        assert!(!store.is_loading());
    }

    #[test]
    fn test_failed_read_sets_error_and_success_clears_it() {
        let mut store = NavigationStore::new();
        let generation = store.begin_read("gone");
        let outcome = store.apply_read(
            generation,
            Err(Error::Status {
                status: 404,
                message: "node not found".to_string(),
            }),
        );
        assert_eq!(outcome, ReadOutcome::Failed);
        assert_eq!(store.error(), Some("Server returned 404: node not found"));

        let generation = store.begin_read("a");
        store.apply_read(generation, Ok(node("a")));
        assert_eq!(store.error(), None);
    }

    #[test]
    fn test_parent_path_of_root_is_root() {
        let mut store = NavigationStore::new();
        assert_eq!(store.parent_path(), "");
        let generation = store.begin_read("a/b");
        store.apply_read(generation, Ok(node("a/b")));
        assert_eq!(store.parent_path(), "a");
    }
}
