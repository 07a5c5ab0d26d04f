//! Search results state for the command palette.
//!
//! In [`SearchMode::Index`] the full path index is loaded once when the
//! overlay opens and filtered locally on every keystroke. In
//! [`SearchMode::Remote`] every keystroke asks the server and the newest
//! response wins. Either way, responses are tagged with a generation and
//! stale ones are dropped.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    #[default]
    Index,
    Remote,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum IndexState {
    #[default]
    Idle,
    Loading,
    Ready(Vec<String>),
    Failed,
}

#[derive(Debug, Default)]
pub struct SearchState {
    index: IndexState,
    results: Vec<String>,
    cursor: usize,
    generation: u64,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> &[String] {
        &self.results
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn index_state(&self) -> &IndexState {
        &self.index
    }

    pub fn is_loading(&self) -> bool {
        self.index == IndexState::Loading
    }

    pub fn selected(&self) -> Option<&str> {
        self.results.get(self.cursor).map(String::as_str)
    }

    /// Forget the session's index and results; the next open reloads.
    pub fn reset(&mut self) {
        self.index = IndexState::Idle;
        self.results.clear();
        self.cursor = 0;
        self.generation += 1;
    }

    /// Start an index load, returning the generation its response must carry.
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.index = IndexState::Loading;
        self.generation
    }

    /// Start a remote query, returning the generation its response must carry.
    pub fn begin_query(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Install a loaded index and filter it with the current query.
    /// Returns false (and changes nothing) for a stale generation.
    pub fn index_loaded(&mut self, generation: u64, paths: Vec<String>, query: &str) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.index = IndexState::Ready(paths);
        self.filter(query);
        true
    }

    /// The overlay stays empty on a failed load.
    pub fn index_failed(&mut self, generation: u64) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.index = IndexState::Failed;
        self.results.clear();
        self.cursor = 0;
        true
    }

    /// Recompute results from the cached index: every path containing `query`
    /// as a literal, case-sensitive substring, in index order.
    pub fn filter(&mut self, query: &str) {
        self.results = match &self.index {
            IndexState::Ready(paths) => filter_paths(paths, query),
            _ => Vec::new(),
        };
        self.cursor = 0;
    }

    /// Install remote results. Returns false for a stale generation.
    pub fn results_received(&mut self, generation: u64, results: Vec<String>) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.results = results;
        self.cursor = 0;
        true
    }

    pub fn select(&mut self, index: isize) {
        if self.results.is_empty() {
            self.cursor = 0;
            return;
        }
        let max = self.results.len() as isize - 1;
        self.cursor = index.clamp(0, max) as usize;
    }

    pub fn select_up(&mut self) {
        self.select(self.cursor as isize - 1);
    }

    pub fn select_down(&mut self) {
        self.select(self.cursor as isize + 1);
    }
}

pub fn filter_paths(paths: &[String], query: &str) -> Vec<String> {
    paths
        .iter()
        .filter(|path| path.contains(query))
        .cloned()
        .collect()
}
