//! Interactive session: the navigation store, the overlays, and the requests
//! they trigger.
//!
//! Front ends feed key input and completions in; everything that needs the
//! server goes out through the [`Dispatcher`].

use crate::config::Config;
use crate::dispatch::{Completion, Dispatcher};
use crate::store::{NavigationStore, ReadOutcome};
use rat_engine::{KeyInput, OverlayAction, Overlays, Shortcut};
use rat_types::parent_path;

/// How a notice should read: the outcome of a user action, good or bad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

pub struct Session {
    store: NavigationStore,
    overlays: Overlays,
    dispatcher: Dispatcher,
    rollback_on_failure: bool,
    notice: Option<(String, NoticeLevel)>,
}

impl Session {
    pub fn new(dispatcher: Dispatcher, config: &Config) -> Self {
        Self {
            store: NavigationStore::new(),
            overlays: Overlays::new(config.search.mode),
            dispatcher,
            rollback_on_failure: config.kanban.rollback_on_failure,
            notice: None,
        }
    }

    pub fn store(&self) -> &NavigationStore {
        &self.store
    }

    pub fn overlays(&self) -> &Overlays {
        &self.overlays
    }

    /// Latest one-line message for the status bar.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_ref().map(|(message, _)| message.as_str())
    }

    pub fn notice_level(&self) -> Option<NoticeLevel> {
        self.notice.as_ref().map(|(_, level)| *level)
    }

    fn notify(&mut self, level: NoticeLevel, message: String) {
        self.notice = Some((message, level));
    }

    pub fn navigate(&mut self, path: &str) {
        let generation = self.store.begin_read(path);
        self.dispatcher.read(generation, path);
    }

    pub fn reload(&mut self) {
        let path = self.store.current_path().to_string();
        self.navigate(&path);
    }

    pub fn navigate_parent(&mut self) {
        let parent = self.store.parent_path();
        self.navigate(&parent);
    }

    pub fn shortcut(&mut self, shortcut: Shortcut) {
        let action = match shortcut {
            Shortcut::CommandPalette => self.overlays.toggle_search(self.store.modal_lock_mut()),
            Shortcut::NewNode => self.overlays.toggle_new_node(self.store.modal_lock_mut()),
            Shortcut::DeleteNode => {
                let path = self.store.current_path().to_string();
                if path.is_empty() {
                    self.notify(
                        NoticeLevel::Warning,
                        "the root node cannot be deleted".to_string(),
                    );
                    return;
                }
                self.overlays
                    .show_confirm_delete(self.store.modal_lock_mut(), &path)
            }
            Shortcut::Quit => OverlayAction::None,
        };
        self.perform(action);
    }

    /// Route a key to the open overlay. Returns false when none is open.
    pub fn overlay_key(&mut self, key: KeyInput) -> bool {
        if self.overlays.active().is_none() {
            return false;
        }
        let action = self.overlays.handle_key(key, self.store.modal_lock_mut());
        self.perform(action);
        true
    }

    pub fn close_overlays(&mut self) {
        self.overlays.close_all(self.store.modal_lock_mut());
    }

    /// Keyboard drop of a picked-up card onto a column.
    pub fn drop_card(&mut self, card_id: &str, target_column_id: &str) -> bool {
        match self.store.drop_card(card_id, target_column_id) {
            Some(mv) => {
                tracing::info!(card = %mv.card_id, new_path = %mv.new_path, "moving card");
                self.dispatcher.move_card(mv);
                true
            }
            None => false,
        }
    }

    fn perform(&mut self, action: OverlayAction) {
        match action {
            OverlayAction::None | OverlayAction::Closed(_) => {}
            OverlayAction::LoadIndex { generation } => self.dispatcher.load_index(generation),
            OverlayAction::Query { generation, query } => {
                self.dispatcher.search(generation, &query)
            }
            OverlayAction::Navigate(path) => self.navigate(&path),
            OverlayAction::CreateNode(name) => {
                let parent = self.store.current_path().to_string();
                self.dispatcher.create(&parent, &name);
            }
            OverlayAction::DeleteNode(path) => self.dispatcher.remove(&path),
            OverlayAction::Rejected(reason) => self.notify(NoticeLevel::Warning, reason),
        }
    }

    pub fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::NodeRead {
                generation,
                path,
                result,
            } => {
                if self.store.apply_read(generation, result) == ReadOutcome::Failed {
                    self.notify(NoticeLevel::Error, format!("could not open '{}'", path));
                }
            }
            Completion::NodeCreated {
                parent_path: parent,
                result,
            } => match result {
                Ok(node) => {
                    self.notify(NoticeLevel::Success, format!("created {}", node.path));
                    if parent == self.store.current_path() {
                        self.store.append_child(node);
                    }
                }
                Err(err) => {
                    tracing::warn!(parent = %parent, error = %err, "failed to create node");
                    self.notify(NoticeLevel::Error, format!("create failed: {}", err));
                }
            },
            Completion::NodeRemoved { path, result } => match result {
                Ok(()) => {
                    self.overlays.confirm.hide(self.store.modal_lock_mut());
                    self.notify(NoticeLevel::Success, format!("deleted {}", path));
                    self.navigate(&parent_path(&path));
                }
                Err(err) => {
                    tracing::warn!(path = %path, error = %err, "failed to delete node");
                    self.overlays.confirm.delete_failed();
                    self.notify(NoticeLevel::Error, format!("delete failed: {}", err));
                }
            },
            Completion::CardMoved { mv, result } => match result {
                Ok(()) => {
                    tracing::debug!(card = %mv.card_id, new_path = %mv.new_path, "card moved");
                }
                Err(err) => {
                    tracing::warn!(
                        card = %mv.card_id,
                        new_path = %mv.new_path,
                        error = %err,
                        "failed to persist card move"
                    );
                    if self.rollback_on_failure && self.store.revert_move(&mv) {
                        self.notify(
                            NoticeLevel::Warning,
                            format!("move of {} reverted", mv.card_name),
                        );
                    } else {
                        self.notify(
                            NoticeLevel::Error,
                            format!("move of {} not saved", mv.card_name),
                        );
                    }
                }
            },
            Completion::IndexLoaded { generation, result } => match result {
                Ok(paths) => {
                    if !self.overlays.search.index_loaded(generation, paths) {
                        tracing::debug!(generation, "dropping stale path index");
                    }
                }
                Err(err) => {
                    tracing::warn!(error = %err, "failed to load path index");
                    self.overlays.search.state_mut().index_failed(generation);
                }
            },
            Completion::SearchResults { generation, result } => match result {
                Ok(results) => {
                    if !self
                        .overlays
                        .search
                        .state_mut()
                        .results_received(generation, results)
                    {
                        tracing::debug!(generation, "dropping stale search results");
                    }
                }
                Err(err) => tracing::warn!(error = %err, "search failed"),
            },
        }
    }
}
