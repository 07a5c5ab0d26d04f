use rat_engine::search::IndexState;
use rat_engine::{ModalKind, Prompt, PromptMode, Renderer};
use rat_runtime::{NoticeLevel, Session};
use rat_types::{breadcrumb_paths, path_segments};

use super::document::present_document;
use super::node::present_children;
use crate::presentation::view_models::{
    ConsoleViewModel, CrumbViewModel, DocumentViewModel, NavTarget, OverlayViewModel,
    PromptViewModel, ScreenViewModel, StatusBarViewModel, StatusLevel,
};

const HELP: &str = "^K search  ^⇧K/^N new  ^D delete  ⏎ open  ⌫ up  r reload  q quit";

/// What the renderer is in the middle of, if anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity<'a> {
    Idle,
    /// A card is picked up and hovering over `column`.
    Moving { card: &'a str, column: &'a str },
    Hint(&'a str),
}

pub fn present_screen(
    session: &Session,
    renderer: &Renderer,
    width: usize,
    preview_lines: usize,
    selected: usize,
    activity: Activity<'_>,
) -> ScreenViewModel {
    let store = session.store();
    let mut targets = Vec::new();

    let (id, path) = store
        .header()
        .map(|h| (h.id.clone(), h.path.clone()))
        .unwrap_or_default();
    let crumbs = breadcrumb_paths(&path)
        .into_iter()
        .map(|(label, ancestor)| {
            targets.push(NavTarget::Node { path: ancestor });
            CrumbViewModel {
                label,
                target: targets.len() - 1,
            }
        })
        .collect();

    let document_offset = targets.len();
    let error = store.error().map(str::to_string);
    let document = if error.is_some() {
        DocumentViewModel::default()
    } else {
        present_document(&renderer.render(&store.rendered_ast()), width)
    };
    targets.extend(document.targets.iter().cloned());

    let children_offset = targets.len();
    let children = present_children(renderer, store.child_nodes(), width, preview_lines);
    targets.extend(children.iter().map(|child| NavTarget::Node {
        path: child.path.clone(),
    }));

    let selected = (!targets.is_empty()).then(|| selected.min(targets.len() - 1));

    ScreenViewModel {
        console: ConsoleViewModel { id, path, crumbs },
        status: present_status(session, activity, children.iter().count()),
        overlay: present_overlay(session),
        error,
        document,
        children,
        targets,
        document_offset,
        children_offset,
        selected,
    }
}

fn present_status(session: &Session, activity: Activity<'_>, child_count: usize) -> StatusBarViewModel {
    let store = session.store();
    let (message, level) = match activity {
        Activity::Moving { card, column } => (
            format!("moving {} to {}  (←/→ column, ⏎ drop, esc cancel)", card, column),
            StatusLevel::Info,
        ),
        Activity::Hint(hint) => (hint.to_string(), StatusLevel::Info),
        Activity::Idle => {
            if let Some(pending) = store.pending_path() {
                (format!("loading /{}…", pending), StatusLevel::Info)
            } else if let Some(notice) = session.notice() {
                let level = match session.notice_level() {
                    Some(NoticeLevel::Error) => StatusLevel::Error,
                    Some(NoticeLevel::Warning) => StatusLevel::Warning,
                    Some(NoticeLevel::Success) | None => StatusLevel::Success,
                };
                (notice.to_string(), level)
            } else if let Some(error) = store.error() {
                (error.to_string(), StatusLevel::Error)
            } else {
                (format!("{} children", child_count), StatusLevel::Info)
            }
        }
    };

    StatusBarViewModel {
        message,
        level,
        help: HELP,
    }
}

fn present_prompt(prompt: &Prompt) -> PromptViewModel {
    PromptViewModel {
        value: prompt.value().to_string(),
        cursor: prompt.cursor(),
        mode: match prompt.mode() {
            PromptMode::Insert => "INSERT",
            PromptMode::Normal => "NORMAL",
        },
        selected: prompt.is_selected(),
    }
}

fn present_overlay(session: &Session) -> Option<OverlayViewModel> {
    let overlays = session.overlays();
    match overlays.active()? {
        ModalKind::Search => {
            let search = &overlays.search;
            let state = search.state();
            let status = match state.index_state() {
                IndexState::Loading => Some("loading index…".to_string()),
                IndexState::Failed => Some("index unavailable".to_string()),
                _ if state.results().is_empty() && !search.prompt().value().is_empty() => {
                    Some("no matches".to_string())
                }
                _ => None,
            };
            Some(OverlayViewModel::Search {
                title: format!("search ({:?})", search.mode()).to_lowercase(),
                prompt: present_prompt(search.prompt()),
                results: state.results().to_vec(),
                cursor: state.cursor(),
                status,
            })
        }
        ModalKind::NewNode => Some(OverlayViewModel::NewNode {
            parent: format!("/{}", session.store().current_path()),
            prompt: present_prompt(overlays.new_node.prompt()),
        }),
        ModalKind::ConfirmDelete => Some(OverlayViewModel::ConfirmDelete {
            segments: path_segments(overlays.confirm.path())
                .into_iter()
                .map(str::to_string)
                .collect(),
            in_flight: overlays.confirm.is_in_flight(),
        }),
    }
}
