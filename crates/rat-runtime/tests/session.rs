use rat_engine::{KeyInput, ModalKind, SearchMode, Shortcut};
use rat_runtime::{Completion, Config, Dispatcher, NoticeLevel, Session};
use rat_testing::{Call, FakeGraph, Op, fixtures};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

struct Harness {
    graph: Arc<FakeGraph>,
    session: Session,
    rx: UnboundedReceiver<Completion>,
}

impl Harness {
    fn new(config: Config) -> Self {
        let graph = Arc::new(fixtures::project_graph());
        let (dispatcher, rx) = Dispatcher::new(graph.clone());
        Self {
            session: Session::new(dispatcher, &config),
            graph,
            rx,
        }
    }

    async fn next(&mut self) -> Completion {
        tokio::time::timeout(Duration::from_secs(2), self.rx.recv())
            .await
            .expect("completion arrives in time")
            .expect("dispatcher alive")
    }

    /// Wait for one completion and apply it.
    async fn settle(&mut self) {
        let completion = self.next().await;
        self.session.apply(completion);
    }

    async fn open(&mut self, path: &str) {
        self.session.navigate(path);
        self.settle().await;
    }

    fn keys(&mut self, names: &[&str]) {
        for name in names {
            self.session.overlay_key(KeyInput::from_name(name));
        }
    }

    fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.session.overlay_key(KeyInput::char(c));
        }
    }

    fn card_ids(&self, column_id: &str) -> Vec<String> {
        self.session
            .store()
            .boards()
            .board(0)
            .expect("board mounted")
            .card_ids(column_id)
    }
}

#[tokio::test]
async fn test_navigation_replaces_node() {
    let mut h = Harness::new(Config::default());
    h.open("board").await;

    let store = h.session.store();
    assert_eq!(store.current_path(), "board");
    assert!(!store.is_loading());
    assert_eq!(store.boards().len(), 1);

    let children: Vec<_> = store.child_nodes().iter().map(|n| n.name.as_str()).collect();
    assert_eq!(children, vec!["done", "todo"]);
}

#[tokio::test]
async fn test_failed_read_keeps_previous_node_and_reports() {
    let mut h = Harness::new(Config::default());
    h.open("board").await;
    h.open("missing").await;

    let store = h.session.store();
    assert_eq!(store.current_path(), "board");
    assert!(store.error().unwrap_or_default().contains("404"));
    assert_eq!(h.session.notice(), Some("could not open 'missing'"));
}

#[tokio::test]
async fn test_overlapping_navigations_latest_wins() {
    let mut h = Harness::new(Config::default());
    h.session.navigate("board");
    h.session.navigate("notes");

    let first = h.next().await;
    let second = h.next().await;
    // Apply in reverse arrival order: the older response must not win.
    let (older, newer) = match &first {
        Completion::NodeRead { path, .. } if path == "board" => (first, second),
        _ => (second, first),
    };
    h.session.apply(newer);
    h.session.apply(older);

    assert_eq!(h.session.store().current_path(), "notes");
}

#[tokio::test]
async fn test_card_move_persists_new_path() {
    let mut h = Harness::new(Config::default());
    h.open("board").await;

    assert!(h.session.drop_card("id:board/todo/parser", "col-done"));
    assert_eq!(h.card_ids("col-done"), vec!["id:board/done/tui", "id:board/todo/parser"]);

    h.settle().await;
    assert!(h.graph.calls().contains(&Call::Move {
        id: "id:board/todo/parser".to_string(),
        new_path: "board/done/parser".to_string(),
    }));
    assert!(h.graph.node("board/done/parser").is_some());
}

#[tokio::test]
async fn test_same_column_drop_sends_nothing() {
    let mut h = Harness::new(Config::default());
    h.open("board").await;

    assert!(!h.session.drop_card("id:board/todo/parser", "col-todo"));
    assert_eq!(h.graph.count(Op::Move), 0);
}

#[tokio::test]
async fn test_failed_move_stays_optimistic_by_default() {
    let mut h = Harness::new(Config::default());
    h.open("board").await;
    h.graph.fail_next(Op::Move, 500, "disk full");

    h.session.drop_card("id:board/todo/search", "col-done");
    h.settle().await;

    assert_eq!(h.card_ids("col-todo"), vec!["id:board/todo/parser"]);
    assert_eq!(h.session.notice(), Some("move of search not saved"));
    assert_eq!(h.session.notice_level(), Some(NoticeLevel::Error));
}

#[tokio::test]
async fn test_failed_move_rolls_back_when_configured() {
    let mut config = Config::default();
    config.kanban.rollback_on_failure = true;
    let mut h = Harness::new(config);
    h.open("board").await;
    h.graph.fail_next(Op::Move, 500, "disk full");

    h.session.drop_card("id:board/todo/parser", "col-done");
    h.settle().await;

    assert_eq!(
        h.card_ids("col-todo"),
        vec!["id:board/todo/parser", "id:board/todo/search"]
    );
    assert_eq!(h.card_ids("col-done"), vec!["id:board/done/tui"]);
    assert_eq!(h.session.notice_level(), Some(NoticeLevel::Warning));
}

#[tokio::test]
async fn test_delete_navigates_to_parent_after_success() {
    let mut h = Harness::new(Config::default());
    h.open("board/todo/parser").await;

    h.session.shortcut(Shortcut::DeleteNode);
    assert_eq!(h.session.overlays().active(), Some(ModalKind::ConfirmDelete));

    h.keys(&["Enter"]);
    h.settle().await; // delete
    assert_eq!(h.session.overlays().active(), None);
    assert_eq!(h.session.store().pending_path(), Some("board/todo"));

    h.settle().await; // parent read
    assert_eq!(h.session.store().current_path(), "board/todo");
    assert!(h.graph.node("board/todo/parser").is_none());
    assert_eq!(h.session.notice(), Some("deleted board/todo/parser"));
    assert_eq!(h.session.notice_level(), Some(NoticeLevel::Success));
}

#[tokio::test]
async fn test_failed_delete_keeps_overlay_open() {
    let mut h = Harness::new(Config::default());
    h.open("notes").await;
    h.graph.fail_next(Op::Remove, 403, "read only");

    h.session.shortcut(Shortcut::DeleteNode);
    h.keys(&["y"]);
    h.settle().await;

    assert_eq!(h.session.overlays().active(), Some(ModalKind::ConfirmDelete));
    assert_eq!(h.session.store().current_path(), "notes");
    assert_eq!(h.session.notice(), Some("delete failed: Server returned 403: read only"));
    assert_eq!(h.session.notice_level(), Some(NoticeLevel::Error));

    h.keys(&["n"]);
    assert_eq!(h.session.overlays().active(), None);
}

#[tokio::test]
async fn test_new_node_is_appended_without_refetch() {
    let mut h = Harness::new(Config::default());
    h.open("board").await;
    let reads = h.graph.count(Op::Read);

    h.session.shortcut(Shortcut::NewNode);
    h.keys(&["Enter"]);
    assert_eq!(h.session.overlays().active(), Some(ModalKind::NewNode));

    h.type_text("ideas");
    h.keys(&["Enter"]);
    assert_eq!(h.session.overlays().active(), None);
    h.settle().await;

    let last = h.session.store().child_nodes().last().expect("child appended");
    assert_eq!(last.path, "board/ideas");
    assert_eq!(h.graph.count(Op::Read), reads);
}

#[tokio::test]
async fn test_new_node_name_with_slash_is_refused() {
    let mut h = Harness::new(Config::default());
    h.open("board").await;

    h.session.shortcut(Shortcut::NewNode);
    h.type_text("a/b");
    h.keys(&["Enter"]);

    assert_eq!(h.session.overlays().active(), Some(ModalKind::NewNode));
    assert_eq!(h.session.notice_level(), Some(NoticeLevel::Warning));
    assert_eq!(h.graph.count(Op::Create), 0);
}

#[tokio::test]
async fn test_search_overlay_index_mode() {
    let mut h = Harness::new(Config::default());
    h.open("").await;

    h.session.shortcut(Shortcut::CommandPalette);
    h.settle().await; // index
    assert_eq!(h.graph.count(Op::Index), 1);

    h.type_text("todo/");
    let results = h.session.overlays().search.state().results().to_vec();
    assert_eq!(results, vec!["board/todo/parser", "board/todo/search"]);

    h.keys(&["Escape", "n", "Enter"]);
    assert_eq!(h.session.overlays().active(), None);
    h.settle().await;
    assert_eq!(h.session.store().current_path(), "board/todo/search");
    assert_eq!(h.graph.count(Op::Search), 0);
}

#[tokio::test]
async fn test_search_overlay_remote_mode() {
    let mut config = Config::default();
    config.search.mode = SearchMode::Remote;
    let mut h = Harness::new(config);

    h.session.shortcut(Shortcut::CommandPalette);
    h.type_text("no");
    h.settle().await;
    h.settle().await;

    assert_eq!(h.graph.count(Op::Index), 0);
    assert_eq!(h.graph.count(Op::Search), 2);
    assert_eq!(
        h.session.overlays().search.state().results(),
        ["notes".to_string()].as_slice()
    );
}

#[tokio::test]
async fn test_index_failure_leaves_overlay_empty() {
    let mut h = Harness::new(Config::default());
    h.graph.fail_next(Op::Index, 502, "bad gateway");

    h.session.shortcut(Shortcut::CommandPalette);
    h.settle().await;
    h.type_text("board");

    assert!(h.session.overlays().search.state().results().is_empty());
    assert_eq!(h.session.overlays().active(), Some(ModalKind::Search));
}
