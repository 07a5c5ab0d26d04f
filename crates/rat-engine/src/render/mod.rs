//! AST renderer.
//!
//! Dispatch goes through a lookup table keyed by the part's `type` tag. The
//! tag set is versioned by the server, not by us, so a tag missing from the
//! table never fails: it renders as a diagnostic carrying the tag name, its
//! `text` attribute and its rendered children.

mod fragment;
mod parts;

pub use fragment::{Fragment, FragmentKind, LinkTarget};

use rat_types::NodeAstPart;
use std::collections::HashMap;

/// Renders one part. Containers recurse through [`RenderPass::children`].
pub type PartHandler = fn(&RenderPass<'_>, &NodeAstPart) -> Fragment;

/// Tags this client knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartKind<'a> {
    Document,
    Heading,
    Paragraph,
    Text,
    Span,
    Strong,
    Emphasis,
    Code,
    CodeBlock,
    HorizontalRule,
    Link,
    GraphLink,
    List,
    ListItem,
    Todo,
    TodoEntry,
    HtmlBlock,
    Kanban,
    KanbanColumn,
    KanbanCard,
    Graphviz,
    Image,
    Embed,
    ParseError,
    Table,
    TableHeader,
    TableBody,
    TableRow,
    TableCell,
    /// The server's own placeholder for syntax it could not classify.
    ServerUnknown,
    /// Any tag this client has no handler for.
    Unknown(&'a str),
}

impl<'a> PartKind<'a> {
    pub fn from_tag(tag: &'a str) -> Self {
        parts::KNOWN
            .iter()
            .map(|(kind, _)| -> PartKind<'a> { *kind })
            .find(|kind| kind.tag() == tag)
            .unwrap_or(PartKind::Unknown(tag))
    }

    pub fn tag(&self) -> &'a str {
        match *self {
            PartKind::Document => "document",
            PartKind::Heading => "heading",
            PartKind::Paragraph => "paragraph",
            PartKind::Text => "text",
            PartKind::Span => "span",
            PartKind::Strong => "strong",
            PartKind::Emphasis => "emphasis",
            PartKind::Code => "code",
            PartKind::CodeBlock => "code_block",
            PartKind::HorizontalRule => "horizontal_rule",
            PartKind::Link => "link",
            PartKind::GraphLink => "graph_link",
            PartKind::List => "list",
            PartKind::ListItem => "list_item",
            PartKind::Todo => "todo",
            PartKind::TodoEntry => "todo_entry",
            PartKind::HtmlBlock => "html_block",
            PartKind::Kanban => "kanban",
            PartKind::KanbanColumn => "kanban_column",
            PartKind::KanbanCard => "kanban_card",
            PartKind::Graphviz => "graphviz",
            PartKind::Image => "image",
            PartKind::Embed => "embed",
            PartKind::ParseError => "rat_error",
            PartKind::Table => "table",
            PartKind::TableHeader => "table_header",
            PartKind::TableBody => "table_body",
            PartKind::TableRow => "table_row",
            PartKind::TableCell => "table_cell",
            PartKind::ServerUnknown => "unknown",
            PartKind::Unknown(tag) => tag,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, PartKind::Unknown(_))
    }
}

/// Tag registry. `Default` registers every built-in part.
#[derive(Clone)]
pub struct Renderer {
    handlers: HashMap<&'static str, PartHandler>,
}

impl Renderer {
    /// A renderer with no handlers; every part takes the diagnostic path.
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Add or replace the handler for `tag`.
    pub fn register(&mut self, tag: &'static str, handler: PartHandler) -> &mut Self {
        self.handlers.insert(tag, handler);
        self
    }

    pub fn handles(&self, tag: &str) -> bool {
        self.handlers.contains_key(tag)
    }

    pub fn render(&self, part: &NodeAstPart) -> Fragment {
        RenderPass { renderer: self }.part(part)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        let mut renderer = Self::empty();
        for (kind, handler) in parts::KNOWN {
            renderer.register(kind.tag(), *handler);
        }
        renderer
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut tags: Vec<_> = self.handlers.keys().collect();
        tags.sort();
        f.debug_struct("Renderer").field("tags", &tags).finish()
    }
}

/// One traversal of a part tree.
pub struct RenderPass<'r> {
    renderer: &'r Renderer,
}

impl RenderPass<'_> {
    pub fn part(&self, part: &NodeAstPart) -> Fragment {
        match self.renderer.handlers.get(part.part_type.as_str()) {
            Some(handler) => handler(self, part),
            None => parts::unimplemented(self, part),
        }
    }

    /// Children in order. Missing children render as nothing.
    pub fn children(&self, part: &NodeAstPart) -> Vec<Fragment> {
        part.children().iter().map(|child| self.part(child)).collect()
    }
}
