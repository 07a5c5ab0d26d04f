// Engine module - interactive core of the client
// Everything here is synchronous and free of I/O: the runtime layer feeds it
// fetched nodes and key input, and persists whatever it reports back.

pub mod columns;
pub mod input;
pub mod kanban;
pub mod modal;
pub mod overlay;
pub mod prompt;
pub mod render;
pub mod search;

pub use columns::{ChildColumns, pack_columns};
pub use input::{KeyCode, KeyInput, Modifiers, Shortcut};
pub use kanban::{CardMove, KanbanBoard, KanbanBoards};
pub use modal::{Modal, ModalKind, ModalLock};
pub use overlay::{ConfirmOverlay, NewNodeOverlay, OverlayAction, Overlays, SearchOverlay};
pub use prompt::{Prompt, PromptEvent, PromptMode};
pub use render::{Fragment, FragmentKind, LinkTarget, PartKind, RenderPass, Renderer};
pub use search::{SearchMode, SearchState};

use rat_types::NodeAstPart;

/// Render a part with the default tag registry.
pub fn render(part: &NodeAstPart) -> Fragment {
    Renderer::default().render(part)
}
