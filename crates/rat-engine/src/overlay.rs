//! The three overlays (search, new node, confirm delete) and the controller
//! that routes shortcuts and keys to whichever one is open.
//!
//! Overlays never perform I/O. Anything that needs the server comes back to
//! the caller as an [`OverlayAction`].

use crate::input::{KeyCode, KeyInput};
use crate::modal::{Modal, ModalKind, ModalLock};
use crate::prompt::{Prompt, PromptEvent};
use crate::search::{SearchMode, SearchState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayAction {
    None,
    Closed(ModalKind),
    /// Fetch the full path index for this search session.
    LoadIndex { generation: u64 },
    /// Ask the server for matches (remote search mode).
    Query { generation: u64, query: String },
    Navigate(String),
    CreateNode(String),
    DeleteNode(String),
    /// Input refused; the overlay stays open.
    Rejected(String),
}

#[derive(Debug)]
pub struct SearchOverlay {
    modal: Modal,
    prompt: Prompt,
    state: SearchState,
    mode: SearchMode,
}

impl SearchOverlay {
    pub fn new(mode: SearchMode) -> Self {
        Self {
            modal: Modal::new(ModalKind::Search),
            prompt: Prompt::new(),
            state: SearchState::new(),
            mode,
        }
    }

    pub fn is_open(&self) -> bool {
        self.modal.is_open()
    }

    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SearchState {
        &mut self.state
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn show(&mut self, lock: &mut ModalLock) -> OverlayAction {
        let was_open = self.modal.is_open();
        if !self.modal.show(lock) {
            return OverlayAction::None;
        }
        self.prompt.focus();
        if was_open {
            return OverlayAction::None;
        }

        self.state.reset();
        match self.mode {
            SearchMode::Index => OverlayAction::LoadIndex {
                generation: self.state.begin_load(),
            },
            SearchMode::Remote if !self.prompt.value().is_empty() => OverlayAction::Query {
                generation: self.state.begin_query(),
                query: self.prompt.value().to_string(),
            },
            SearchMode::Remote => OverlayAction::None,
        }
    }

    pub fn hide(&mut self, lock: &mut ModalLock) {
        self.modal.hide(lock);
    }

    /// Deliver a loaded path index, filtered by whatever has been typed so far.
    pub fn index_loaded(&mut self, generation: u64, paths: Vec<String>) -> bool {
        let query = self.prompt.value().to_string();
        self.state.index_loaded(generation, paths, &query)
    }

    pub fn handle_key(&mut self, key: KeyInput, lock: &mut ModalLock) -> OverlayAction {
        let before = self.prompt.value().to_string();
        match self.prompt.handle_key(key) {
            PromptEvent::Submit => match self.state.selected().map(str::to_string) {
                Some(path) => {
                    self.hide(lock);
                    OverlayAction::Navigate(path)
                }
                None => OverlayAction::None,
            },
            PromptEvent::Close => {
                self.hide(lock);
                OverlayAction::Closed(ModalKind::Search)
            }
            PromptEvent::NavigateUp => {
                self.state.select_up();
                OverlayAction::None
            }
            PromptEvent::NavigateDown => {
                self.state.select_down();
                OverlayAction::None
            }
            PromptEvent::Keydown(_) => match self.mode {
                SearchMode::Index => {
                    let query = self.prompt.value().to_string();
                    self.state.filter(&query);
                    OverlayAction::None
                }
                // Caret moves leave the query as it was.
                SearchMode::Remote if self.prompt.value() == before => OverlayAction::None,
                SearchMode::Remote => OverlayAction::Query {
                    generation: self.state.begin_query(),
                    query: self.prompt.value().to_string(),
                },
            },
            PromptEvent::Handled => OverlayAction::None,
        }
    }
}

#[derive(Debug)]
pub struct NewNodeOverlay {
    modal: Modal,
    prompt: Prompt,
}

impl NewNodeOverlay {
    pub fn new() -> Self {
        Self {
            modal: Modal::new(ModalKind::NewNode),
            prompt: Prompt::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.modal.is_open()
    }

    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    pub fn show(&mut self, lock: &mut ModalLock) -> bool {
        let was_open = self.modal.is_open();
        if !self.modal.show(lock) {
            return false;
        }
        if !was_open {
            self.prompt.clear();
        }
        self.prompt.focus();
        true
    }

    pub fn hide(&mut self, lock: &mut ModalLock) {
        self.modal.hide(lock);
    }

    pub fn handle_key(&mut self, key: KeyInput, lock: &mut ModalLock) -> OverlayAction {
        match self.prompt.handle_key(key) {
            PromptEvent::Submit => {
                let name = self.prompt.value().trim().to_string();
                if name.is_empty() {
                    return OverlayAction::None;
                }
                if name.contains('/') {
                    return OverlayAction::Rejected(format!(
                        "node name must not contain '/': {}",
                        name
                    ));
                }
                self.hide(lock);
                OverlayAction::CreateNode(name)
            }
            PromptEvent::Close => {
                self.hide(lock);
                OverlayAction::Closed(ModalKind::NewNode)
            }
            _ => OverlayAction::None,
        }
    }
}

impl Default for NewNodeOverlay {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct ConfirmOverlay {
    modal: Modal,
    path: String,
    in_flight: bool,
}

impl ConfirmOverlay {
    pub fn new() -> Self {
        Self {
            modal: Modal::new(ModalKind::ConfirmDelete),
            path: String::new(),
            in_flight: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.modal.is_open()
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn show(&mut self, lock: &mut ModalLock, path: &str) -> bool {
        if self.modal.is_open() {
            return true;
        }
        if !self.modal.show(lock) {
            return false;
        }
        self.path = path.to_string();
        self.in_flight = false;
        true
    }

    pub fn hide(&mut self, lock: &mut ModalLock) {
        self.in_flight = false;
        self.modal.hide(lock);
    }

    /// The delete request failed; allow another attempt.
    pub fn delete_failed(&mut self) {
        self.in_flight = false;
    }

    pub fn handle_key(&mut self, key: KeyInput, lock: &mut ModalLock) -> OverlayAction {
        match key.code {
            KeyCode::Enter | KeyCode::Char('y') => {
                if self.in_flight {
                    return OverlayAction::None;
                }
                self.in_flight = true;
                OverlayAction::DeleteNode(self.path.clone())
            }
            KeyCode::Escape | KeyCode::Char('n') => {
                self.hide(lock);
                OverlayAction::Closed(ModalKind::ConfirmDelete)
            }
            _ => OverlayAction::None,
        }
    }
}

impl Default for ConfirmOverlay {
    fn default() -> Self {
        Self::new()
    }
}

/// Routes shortcuts and keys to the open overlay.
#[derive(Debug)]
pub struct Overlays {
    pub search: SearchOverlay,
    pub new_node: NewNodeOverlay,
    pub confirm: ConfirmOverlay,
}

impl Overlays {
    pub fn new(mode: SearchMode) -> Self {
        Self {
            search: SearchOverlay::new(mode),
            new_node: NewNodeOverlay::new(),
            confirm: ConfirmOverlay::new(),
        }
    }

    pub fn active(&self) -> Option<ModalKind> {
        if self.search.is_open() {
            Some(ModalKind::Search)
        } else if self.new_node.is_open() {
            Some(ModalKind::NewNode)
        } else if self.confirm.is_open() {
            Some(ModalKind::ConfirmDelete)
        } else {
            None
        }
    }

    pub fn toggle_search(&mut self, lock: &mut ModalLock) -> OverlayAction {
        if self.search.is_open() {
            self.search.hide(lock);
            return OverlayAction::Closed(ModalKind::Search);
        }
        self.search.show(lock)
    }

    pub fn toggle_new_node(&mut self, lock: &mut ModalLock) -> OverlayAction {
        if self.new_node.is_open() {
            self.new_node.hide(lock);
            return OverlayAction::Closed(ModalKind::NewNode);
        }
        self.new_node.show(lock);
        OverlayAction::None
    }

    pub fn show_confirm_delete(&mut self, lock: &mut ModalLock, path: &str) -> OverlayAction {
        self.confirm.show(lock, path);
        OverlayAction::None
    }

    pub fn handle_key(&mut self, key: KeyInput, lock: &mut ModalLock) -> OverlayAction {
        match self.active() {
            Some(ModalKind::Search) => self.search.handle_key(key, lock),
            Some(ModalKind::NewNode) => self.new_node.handle_key(key, lock),
            Some(ModalKind::ConfirmDelete) => self.confirm.handle_key(key, lock),
            None => OverlayAction::None,
        }
    }

    pub fn close_all(&mut self, lock: &mut ModalLock) {
        self.search.hide(lock);
        self.new_node.hide(lock);
        self.confirm.hide(lock);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(overlays: &mut Overlays, lock: &mut ModalLock, names: &[&str]) -> Vec<OverlayAction> {
        names
            .iter()
            .map(|n| overlays.handle_key(KeyInput::from_name(n), lock))
            .collect()
    }

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_new_node_blocked_while_search_open() {
        let mut lock = ModalLock::new();
        let mut overlays = Overlays::new(SearchMode::Index);

        let action = overlays.toggle_search(&mut lock);
        assert!(matches!(action, OverlayAction::LoadIndex { .. }));

        overlays.toggle_new_node(&mut lock);
        assert!(!overlays.new_node.is_open());
        assert!(overlays.search.is_open());

        overlays.search.hide(&mut lock);
        overlays.toggle_new_node(&mut lock);
        assert!(overlays.new_node.is_open());
        assert_eq!(overlays.active(), Some(ModalKind::NewNode));
    }

    #[test]
    fn test_search_session_filters_and_navigates() {
        let mut lock = ModalLock::new();
        let mut overlays = Overlays::new(SearchMode::Index);

        let OverlayAction::LoadIndex { generation } = overlays.toggle_search(&mut lock) else {
            panic!("expected index load");
        };
        assert!(
            overlays
                .search
                .index_loaded(generation, paths(&["a/b", "a/c", "x"]))
        );
        assert_eq!(overlays.search.state().results().len(), 3);

        keys(&mut overlays, &mut lock, &["a", "/"]);
        assert_eq!(
            overlays.search.state().results(),
            paths(&["a/b", "a/c"]).as_slice()
        );

        let actions = keys(&mut overlays, &mut lock, &["Escape", "n", "Enter"]);
        assert_eq!(actions[2], OverlayAction::Navigate("a/c".to_string()));
        assert!(!overlays.search.is_open());
        assert!(!lock.is_held());
    }

    #[test]
    fn test_search_submit_without_results_is_noop() {
        let mut lock = ModalLock::new();
        let mut overlays = Overlays::new(SearchMode::Index);
        overlays.toggle_search(&mut lock);

        let actions = keys(&mut overlays, &mut lock, &["q", "Enter"]);
        assert_eq!(actions[1], OverlayAction::None);
        assert!(overlays.search.is_open());
    }

    #[test]
    fn test_remote_search_issues_query_per_keystroke() {
        let mut lock = ModalLock::new();
        let mut overlays = Overlays::new(SearchMode::Remote);
        assert_eq!(overlays.toggle_search(&mut lock), OverlayAction::None);

        let actions = keys(&mut overlays, &mut lock, &["a", "b"]);
        let OverlayAction::Query { generation, query } = &actions[1] else {
            panic!("expected query");
        };
        assert_eq!(query, "ab");
        assert!(overlays.search.state().is_current(*generation));
    }

    #[test]
    fn test_remote_search_ignores_caret_moves() {
        let mut lock = ModalLock::new();
        let mut overlays = Overlays::new(SearchMode::Remote);
        overlays.toggle_search(&mut lock);

        let actions = keys(
            &mut overlays,
            &mut lock,
            &["a", "Left", "Right", "Home", "End", "Up", "Down"],
        );
        assert!(matches!(actions[0], OverlayAction::Query { .. }));
        assert!(actions[1..].iter().all(|a| *a == OverlayAction::None));
    }

    #[test]
    fn test_new_node_rejects_slash() {
        let mut lock = ModalLock::new();
        let mut overlays = Overlays::new(SearchMode::Index);
        overlays.toggle_new_node(&mut lock);

        let actions = keys(&mut overlays, &mut lock, &["a", "/", "b", "Enter"]);
        assert_eq!(
            actions[3],
            OverlayAction::Rejected("node name must not contain '/': a/b".to_string())
        );
        assert!(overlays.new_node.is_open());
    }

    #[test]
    fn test_new_node_submit() {
        let mut lock = ModalLock::new();
        let mut overlays = Overlays::new(SearchMode::Index);
        overlays.toggle_new_node(&mut lock);

        assert_eq!(
            keys(&mut overlays, &mut lock, &["Enter"]),
            vec![OverlayAction::None]
        );
        assert!(overlays.new_node.is_open());

        let actions = keys(&mut overlays, &mut lock, &["i", "d", "e", "a", "Enter"]);
        assert_eq!(actions[4], OverlayAction::CreateNode("idea".to_string()));
        assert!(!overlays.new_node.is_open());
        assert!(!lock.is_held());
    }

    #[test]
    fn test_escape_twice_closes_prompt_overlay() {
        let mut lock = ModalLock::new();
        let mut overlays = Overlays::new(SearchMode::Index);
        overlays.toggle_new_node(&mut lock);

        let actions = keys(&mut overlays, &mut lock, &["Escape", "Escape"]);
        assert_eq!(actions[0], OverlayAction::None);
        assert_eq!(actions[1], OverlayAction::Closed(ModalKind::NewNode));
        assert_eq!(overlays.active(), None);
    }

    #[test]
    fn test_confirm_delete_flow() {
        let mut lock = ModalLock::new();
        let mut overlays = Overlays::new(SearchMode::Index);
        overlays.show_confirm_delete(&mut lock, "a/b");

        assert_eq!(overlays.toggle_search(&mut lock), OverlayAction::None);
        assert!(!overlays.search.is_open());

        let actions = keys(&mut overlays, &mut lock, &["Enter", "Enter"]);
        assert_eq!(actions[0], OverlayAction::DeleteNode("a/b".to_string()));
        assert_eq!(actions[1], OverlayAction::None);
        assert!(overlays.confirm.is_open());

        overlays.confirm.delete_failed();
        let actions = keys(&mut overlays, &mut lock, &["Escape"]);
        assert_eq!(actions[0], OverlayAction::Closed(ModalKind::ConfirmDelete));
        assert!(!lock.is_held());
    }
}
