use serde::Serialize;

use super::{ChildColumnsViewModel, DocumentViewModel};

/// Output of `rat index` and `rat search`.
#[derive(Debug, Clone, Serialize)]
pub struct PathListViewModel {
    pub paths: Vec<String>,
}

/// Output of `rat show`.
#[derive(Debug, Clone, Serialize)]
pub struct NodeViewModel {
    pub id: String,
    pub path: String,
    pub document: DocumentViewModel,
    pub children: ChildColumnsViewModel,
    pub width: usize,
}
