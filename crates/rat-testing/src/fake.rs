use async_trait::async_trait;
use rat_runtime::{Error, GraphApi, Result};
use rat_types::{Node, NodeAstPart, join_path, parent_path, path_name};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::Mutex;

/// Which API operation a failure or call refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Read,
    Create,
    Remove,
    Move,
    Search,
    Index,
}

/// A recorded API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Read(String),
    Create { parent: String, name: String },
    Remove(String),
    Move { id: String, new_path: String },
    Search(String),
    Index,
}

#[derive(Debug, Default)]
struct State {
    /// Keyed by path; the root lives at "".
    nodes: BTreeMap<String, Node>,
    failures: HashMap<Op, VecDeque<(u16, String)>>,
    calls: Vec<Call>,
}

/// In-memory graph server.
///
/// Reads return the stored node with its direct children filled in from the
/// other stored nodes, the way the real server lists a directory.
#[derive(Debug)]
pub struct FakeGraph {
    state: Mutex<State>,
}

impl Default for FakeGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeGraph {
    /// A graph holding only the root node.
    pub fn new() -> Self {
        let mut state = State::default();
        state.nodes.insert(
            String::new(),
            Node {
                id: "root".to_string(),
                name: String::new(),
                path: String::new(),
                length: 0,
                child_nodes: Vec::new(),
                ast: NodeAstPart::default(),
            },
        );
        Self {
            state: Mutex::new(state),
        }
    }

    /// Insert or replace a node at its own path.
    pub fn with_node(self, node: Node) -> Self {
        self.insert(node);
        self
    }

    pub fn insert(&self, mut node: Node) {
        node.child_nodes.clear();
        self.lock().nodes.insert(node.path.clone(), node);
    }

    pub fn node(&self, path: &str) -> Option<Node> {
        self.lock().nodes.get(path).cloned()
    }

    pub fn node_by_id(&self, id: &str) -> Option<Node> {
        self.lock().nodes.values().find(|n| n.id == id).cloned()
    }

    pub fn paths(&self) -> Vec<String> {
        self.lock()
            .nodes
            .keys()
            .filter(|p| !p.is_empty())
            .cloned()
            .collect()
    }

    /// Make the next call of `op` fail with this status.
    pub fn fail_next(&self, op: Op, status: u16, message: &str) {
        self.lock()
            .failures
            .entry(op)
            .or_default()
            .push_back((status, message.to_string()));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn count(&self, op: Op) -> usize {
        self.calls()
            .iter()
            .filter(|call| call_op(call) == op)
            .count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record the call and pop an injected failure for it, if any.
    fn enter(&self, call: Call) -> Result<std::sync::MutexGuard<'_, State>> {
        let mut state = self.lock();
        let op = call_op(&call);
        state.calls.push(call);
        if let Some((status, message)) = state.failures.get_mut(&op).and_then(|q| q.pop_front()) {
            return Err(Error::Status { status, message });
        }
        Ok(state)
    }
}

fn call_op(call: &Call) -> Op {
    match call {
        Call::Read(_) => Op::Read,
        Call::Create { .. } => Op::Create,
        Call::Remove(_) => Op::Remove,
        Call::Move { .. } => Op::Move,
        Call::Search(_) => Op::Search,
        Call::Index => Op::Index,
    }
}

fn not_found(path: &str) -> Error {
    Error::Status {
        status: 404,
        message: format!("node not found: {}", path),
    }
}

fn normalize(path: &str) -> String {
    path.trim_matches('/').to_string()
}

fn is_descendant(path: &str, ancestor: &str) -> bool {
    ancestor.is_empty() && !path.is_empty()
        || path
            .strip_prefix(ancestor)
            .is_some_and(|rest| rest.starts_with('/'))
}

#[async_trait]
impl GraphApi for FakeGraph {
    async fn read(&self, path: &str) -> Result<Node> {
        let path = normalize(path);
        let state = self.enter(Call::Read(path.clone()))?;
        let mut node = state.nodes.get(&path).cloned().ok_or_else(|| not_found(&path))?;
        node.child_nodes = state
            .nodes
            .values()
            .filter(|child| !child.path.is_empty() && parent_path(&child.path) == path)
            .cloned()
            .collect();
        Ok(node)
    }

    async fn create(&self, parent_path: &str, name: &str) -> Result<Node> {
        let parent = normalize(parent_path);
        let mut state = self.enter(Call::Create {
            parent: parent.clone(),
            name: name.to_string(),
        })?;
        if !state.nodes.contains_key(&parent) {
            return Err(not_found(&parent));
        }
        let path = join_path(&parent, name);
        if state.nodes.contains_key(&path) {
            return Err(Error::Status {
                status: 409,
                message: format!("node already exists: {}", path),
            });
        }

        let node = Node {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            path: path.clone(),
            length: 0,
            child_nodes: Vec::new(),
            ast: NodeAstPart::default(),
        };
        state.nodes.insert(path, node.clone());
        Ok(node)
    }

    async fn remove(&self, path: &str) -> Result<()> {
        let path = normalize(path);
        let mut state = self.enter(Call::Remove(path.clone()))?;
        if path.is_empty() || !state.nodes.contains_key(&path) {
            return Err(not_found(&path));
        }
        state
            .nodes
            .retain(|p, _| p != &path && !is_descendant(p, &path));
        Ok(())
    }

    async fn move_node(&self, id: &str, new_path: &str) -> Result<()> {
        let new_path = normalize(new_path);
        let mut state = self.enter(Call::Move {
            id: id.to_string(),
            new_path: new_path.clone(),
        })?;
        let old_path = state
            .nodes
            .values()
            .find(|n| n.id == id)
            .map(|n| n.path.clone())
            .ok_or_else(|| not_found(id))?;
        if old_path == new_path {
            return Ok(());
        }

        let moved: Vec<String> = state
            .nodes
            .keys()
            .filter(|p| **p == old_path || is_descendant(p, &old_path))
            .cloned()
            .collect();
        for path in moved {
            if let Some(mut node) = state.nodes.remove(&path) {
                node.path = format!("{}{}", new_path, &path[old_path.len()..]);
                node.name = path_name(&node.path).unwrap_or_default().to_string();
                state.nodes.insert(node.path.clone(), node);
            }
        }
        Ok(())
    }

    async fn search(&self, query: &str) -> Result<Vec<String>> {
        let state = self.enter(Call::Search(query.to_string()))?;
        Ok(state
            .nodes
            .keys()
            .filter(|p| !p.is_empty() && p.contains(query))
            .cloned()
            .collect())
    }

    async fn index(&self) -> Result<Vec<String>> {
        let state = self.enter(Call::Index)?;
        Ok(state
            .nodes
            .keys()
            .filter(|p| !p.is_empty())
            .cloned()
            .collect())
    }
}
