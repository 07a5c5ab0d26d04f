use crate::{GraphApi, Result};
use rat_engine::CardMove;
use rat_types::Node;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Result of a request, delivered back to the event loop.
#[derive(Debug)]
pub enum Completion {
    NodeRead {
        generation: u64,
        path: String,
        result: Result<Node>,
    },
    NodeCreated {
        parent_path: String,
        result: Result<Node>,
    },
    NodeRemoved {
        path: String,
        result: Result<()>,
    },
    CardMoved {
        mv: CardMove,
        result: Result<()>,
    },
    IndexLoaded {
        generation: u64,
        result: Result<Vec<String>>,
    },
    SearchResults {
        generation: u64,
        result: Result<Vec<String>>,
    },
}

/// Spawns API calls and reports each outcome as a [`Completion`].
///
/// Requests are never cancelled. Ordering is left to the receiver, which
/// checks generations where it matters.
#[derive(Clone)]
pub struct Dispatcher {
    api: Arc<dyn GraphApi>,
    tx: mpsc::UnboundedSender<Completion>,
}

impl Dispatcher {
    pub fn new(api: Arc<dyn GraphApi>) -> (Self, mpsc::UnboundedReceiver<Completion>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { api, tx }, rx)
    }

    pub fn api(&self) -> &Arc<dyn GraphApi> {
        &self.api
    }

    fn spawn<F>(&self, request: F)
    where
        F: Future<Output = Completion> + Send + 'static,
    {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let completion = request.await;
            if tx.send(completion).is_err() {
                tracing::debug!("completion dropped: event loop has exited");
            }
        });
    }

    pub fn read(&self, generation: u64, path: &str) {
        let api = Arc::clone(&self.api);
        let path = path.to_string();
        self.spawn(async move {
            let result = api.read(&path).await;
            Completion::NodeRead {
                generation,
                path,
                result,
            }
        });
    }

    pub fn create(&self, parent_path: &str, name: &str) {
        let api = Arc::clone(&self.api);
        let parent_path = parent_path.to_string();
        let name = name.to_string();
        self.spawn(async move {
            let result = api.create(&parent_path, &name).await;
            Completion::NodeCreated {
                parent_path,
                result,
            }
        });
    }

    pub fn remove(&self, path: &str) {
        let api = Arc::clone(&self.api);
        let path = path.to_string();
        self.spawn(async move {
            let result = api.remove(&path).await;
            Completion::NodeRemoved { path, result }
        });
    }

    pub fn move_card(&self, mv: CardMove) {
        let api = Arc::clone(&self.api);
        self.spawn(async move {
            let result = api.move_node(&mv.card_id, &mv.new_path).await;
            Completion::CardMoved { mv, result }
        });
    }

    pub fn load_index(&self, generation: u64) {
        let api = Arc::clone(&self.api);
        self.spawn(async move {
            let result = api.index().await;
            Completion::IndexLoaded { generation, result }
        });
    }

    pub fn search(&self, generation: u64, query: &str) {
        let api = Arc::clone(&self.api);
        let query = query.to_string();
        self.spawn(async move {
            let result = api.search(&query).await;
            Completion::SearchResults { generation, result }
        });
    }
}
