use serde::Serialize;

use super::{ChildColumnsViewModel, DocumentViewModel, NavTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrumbViewModel {
    pub label: String,
    pub target: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConsoleViewModel {
    pub id: String,
    pub path: String,
    pub crumbs: Vec<CrumbViewModel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBarViewModel {
    pub message: String,
    pub level: StatusLevel,
    pub help: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptViewModel {
    pub value: String,
    pub cursor: usize,
    pub mode: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OverlayViewModel {
    Search {
        title: String,
        prompt: PromptViewModel,
        results: Vec<String>,
        cursor: usize,
        status: Option<String>,
    },
    NewNode {
        parent: String,
        prompt: PromptViewModel,
    },
    ConfirmDelete {
        segments: Vec<String>,
        in_flight: bool,
    },
}

/// Everything the TUI draws in one frame.
#[derive(Debug, Clone, Serialize)]
pub struct ScreenViewModel {
    pub console: ConsoleViewModel,
    /// Shown in place of the document when the last read failed.
    pub error: Option<String>,
    pub document: DocumentViewModel,
    pub children: ChildColumnsViewModel,
    /// Breadcrumbs, then document targets, then child nodes.
    pub targets: Vec<NavTarget>,
    /// Global index of the first document target.
    pub document_offset: usize,
    /// Global index of the first child node target.
    pub children_offset: usize,
    pub selected: Option<usize>,
    pub status: StatusBarViewModel,
    pub overlay: Option<OverlayViewModel>,
}
