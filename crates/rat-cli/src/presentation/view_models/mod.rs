pub mod document;
pub mod listing;
pub mod screen;

pub use document::{
    ChildColumnsViewModel, ChildPreviewViewModel, DocumentLine, DocumentViewModel, NavTarget,
    StyledSpan, TextStyle,
};
pub use listing::{NodeViewModel, PathListViewModel};
pub use screen::{
    ConsoleViewModel, CrumbViewModel, OverlayViewModel, PromptViewModel, ScreenViewModel,
    StatusBarViewModel, StatusLevel,
};
