//! Runtime layer: talks to the graph server and keeps the session state the
//! front ends draw from.

pub mod api;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod session;
pub mod store;

pub use api::GraphApi;
pub use config::{Config, KanbanConfig, SearchConfig, ServerConfig, ViewConfig};
pub use dispatch::{Completion, Dispatcher};
pub use error::{Error, Result};
pub use http::HttpGraphApi;
pub use session::{NoticeLevel, Session};
pub use store::{NavigationStore, ReadOutcome};
