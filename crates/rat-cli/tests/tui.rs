use rat::presentation::renderers::App;
use rat::presentation::view_models::{NavTarget, OverlayViewModel, StatusLevel};
use rat_engine::{KeyInput, ModalKind};
use rat_runtime::{Completion, Config, Dispatcher, Session};
use rat_testing::{Call, FakeGraph, Op, fixtures};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

const WIDTH: usize = 80;

struct Harness {
    graph: Arc<FakeGraph>,
    app: App,
    rx: UnboundedReceiver<Completion>,
}

impl Harness {
    async fn open(path: &str) -> Self {
        let graph = Arc::new(fixtures::project_graph());
        let (dispatcher, rx) = Dispatcher::new(graph.clone());
        let config = Config::default();
        let mut session = Session::new(dispatcher, &config);
        session.navigate(path);

        let mut h = Self {
            graph,
            app: App::new(session, config.view.child_preview_lines),
            rx,
        };
        h.settle().await;
        h
    }

    async fn settle(&mut self) {
        let completion = tokio::time::timeout(Duration::from_secs(2), self.rx.recv())
            .await
            .expect("completion arrives in time")
            .expect("dispatcher alive");
        self.app.apply(completion);
        self.app.layout(WIDTH);
    }

    fn press(&mut self, name: &str) {
        self.app.on_key(KeyInput::from_name(name));
        self.app.layout(WIDTH);
    }

    fn selected_target(&mut self) -> Option<NavTarget> {
        let screen = self.app.layout(WIDTH);
        screen
            .selected
            .and_then(|i| screen.targets.get(i))
            .cloned()
    }
}

#[tokio::test]
async fn test_targets_cover_crumbs_cards_and_children() {
    let mut h = Harness::open("board").await;
    let screen = h.app.layout(WIDTH);

    assert_eq!(screen.console.path, "board");
    assert_eq!(screen.document_offset, 1);
    assert_eq!(screen.children_offset, 4);
    let cards: Vec<_> = screen.targets[1..4]
        .iter()
        .map(|t| match t {
            NavTarget::Card { name, .. } => name.as_str(),
            NavTarget::Node { path } => path.as_str(),
        })
        .collect();
    assert_eq!(cards, vec!["parser", "search", "tui"]);
    assert_eq!(screen.status.message, "2 children");
}

#[tokio::test]
async fn test_selection_wraps_around() {
    let mut h = Harness::open("board").await;
    h.press("Up");
    assert_eq!(
        h.selected_target(),
        Some(NavTarget::Node {
            path: "board/todo".to_string()
        })
    );
    h.press("Tab");
    assert_eq!(
        h.selected_target(),
        Some(NavTarget::Node {
            path: "board".to_string()
        })
    );
}

#[tokio::test]
async fn test_enter_on_child_navigates() {
    let mut h = Harness::open("board").await;
    h.press("Up");
    h.press("Enter");
    h.settle().await;

    assert_eq!(h.app.session().store().current_path(), "board/todo");
    assert_eq!(h.graph.calls().last(), Some(&Call::Read("board/todo".to_string())));
}

#[tokio::test]
async fn test_keyboard_card_move() {
    let mut h = Harness::open("board").await;
    h.press("Tab");
    h.press("Enter");
    assert_eq!(h.app.picked_card(), Some("id:board/todo/parser"));
    assert!(
        h.app
            .layout(WIDTH)
            .status
            .message
            .starts_with("moving parser to todo")
    );

    h.press("l");
    h.press("Enter");
    assert_eq!(h.app.picked_card(), None);
    h.settle().await;

    let board = h.app.session().store().boards().board(0).expect("board mounted");
    assert_eq!(
        board.card_ids("col-done"),
        vec!["id:board/done/tui", "id:board/todo/parser"]
    );
    assert_eq!(
        h.graph.calls().last(),
        Some(&Call::Move {
            id: "id:board/todo/parser".to_string(),
            new_path: "board/done/parser".to_string(),
        })
    );
}

#[tokio::test]
async fn test_drop_on_same_column_leaves_hint() {
    let mut h = Harness::open("board").await;
    h.press("Tab");
    h.press("Enter");
    h.press("Enter");

    assert_eq!(h.graph.count(Op::Move), 0);
    assert_eq!(h.app.layout(WIDTH).status.message, "parser stays in todo");
}

#[tokio::test]
async fn test_escape_cancels_pick() {
    let mut h = Harness::open("board").await;
    h.press("Tab");
    h.press("Enter");
    h.press("Esc");
    assert_eq!(h.app.picked_card(), None);
}

#[tokio::test]
async fn test_ctrl_k_opens_search_overlay() {
    let mut h = Harness::open("board").await;
    h.app.on_key(KeyInput::ctrl('k'));
    assert_eq!(h.app.session().overlays().active(), Some(ModalKind::Search));
    h.settle().await;

    for c in "todo".chars() {
        h.app.on_key(KeyInput::char(c));
    }
    let screen = h.app.layout(WIDTH);
    match &screen.overlay {
        Some(OverlayViewModel::Search { results, .. }) => {
            assert!(results.iter().any(|p| p == "board/todo"));
        }
        other => panic!("expected search overlay, got {:?}", other),
    }
}

#[tokio::test]
async fn test_q_quits_only_outside_overlays() {
    let mut h = Harness::open("board").await;
    h.app.on_key(KeyInput::ctrl('k'));
    h.press("q");
    assert!(!h.app.should_quit());

    h.press("Esc");
    h.press("Esc");
    h.press("q");
    assert!(h.app.should_quit());
}

#[tokio::test]
async fn test_ctrl_n_opens_new_node_overlay() {
    let mut h = Harness::open("board").await;
    h.app.on_key(KeyInput::ctrl('n'));
    assert_eq!(h.app.session().overlays().active(), Some(ModalKind::NewNode));
}

#[tokio::test]
async fn test_failed_move_is_reported_as_error() {
    let mut h = Harness::open("board").await;
    h.graph.fail_next(Op::Move, 500, "disk full");
    h.press("Tab");
    h.press("Enter");
    h.press("l");
    h.press("Enter");
    h.settle().await;

    let status = &h.app.layout(WIDTH).status;
    assert_eq!(status.message, "move of parser not saved");
    assert_eq!(status.level, StatusLevel::Error);
}
