use rat_types::TodoHint;

/// Where a link leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Absolute URL, left to the user's browser.
    External(String),
    /// Node path inside the graph.
    Internal(String),
}

/// Output of the renderer: a tree of typed fragments the views draw.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub kind: FragmentKind,
    pub children: Vec<Fragment>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FragmentKind {
    Document,
    Paragraph,
    Text(String),
    Span(String),
    Strong,
    Emphasis,
    Code(String),
    CodeBlock {
        language: Option<String>,
        text: String,
    },
    HorizontalRule,
    Heading {
        tier: u8,
        diagnostic: Option<String>,
    },
    List {
        ordered: bool,
    },
    ListItem,
    Link {
        target: LinkTarget,
    },
    Todo {
        hints: Vec<TodoHint>,
    },
    TodoEntry {
        done: bool,
    },
    Kanban,
    KanbanColumn {
        id: String,
        name: String,
        path: String,
    },
    KanbanCard {
        id: String,
        name: String,
    },
    Table,
    TableHeader,
    TableBody,
    TableRow,
    TableCell,
    Graphviz {
        dot: String,
    },
    Image {
        src: String,
        alt: String,
    },
    Embed {
        url: String,
    },
    /// Error the server hit while parsing the document.
    Error {
        message: String,
    },
    /// A part the client could not render faithfully.
    Diagnostic {
        message: String,
        text: Option<String>,
    },
    Empty,
}

impl Fragment {
    pub fn new(kind: FragmentKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    pub fn with_children(kind: FragmentKind, children: Vec<Fragment>) -> Self {
        Self { kind, children }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(FragmentKind::Text(text.into()))
    }

    /// Every readable string in the subtree, diagnostics included, in order.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match &self.kind {
            FragmentKind::Text(s) | FragmentKind::Span(s) | FragmentKind::Code(s) => {
                out.push_str(s)
            }
            FragmentKind::CodeBlock { text, .. } => out.push_str(text),
            FragmentKind::Heading {
                diagnostic: Some(d),
                ..
            } => {
                out.push_str(d);
                out.push(' ');
            }
            FragmentKind::KanbanColumn { name, .. } | FragmentKind::KanbanCard { name, .. } => {
                out.push_str(name)
            }
            FragmentKind::Error { message } => out.push_str(message),
            FragmentKind::Diagnostic { message, text } => {
                out.push_str(message);
                if let Some(text) = text {
                    out.push(' ');
                    out.push_str(text);
                }
            }
            _ => {}
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// Depth-first search, self included.
    pub fn find(&self, pred: &dyn Fn(&Fragment) -> bool) -> Option<&Fragment> {
        if pred(self) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(pred))
    }

    pub fn count(&self, pred: &dyn Fn(&Fragment) -> bool) -> usize {
        let own = usize::from(pred(self));
        own + self.children.iter().map(|c| c.count(pred)).sum::<usize>()
    }
}
