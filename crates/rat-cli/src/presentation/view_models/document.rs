use serde::Serialize;

/// Visual role of a run of text. Views map these to colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextStyle {
    Plain,
    Heading,
    Strong,
    Emphasis,
    Code,
    Link,
    ExternalLink,
    Column,
    Card,
    Muted,
    Diagnostic,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyledSpan {
    pub text: String,
    pub style: TextStyle,
    /// Index into the owning view model's `targets`.
    pub target: Option<usize>,
}

impl StyledSpan {
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
            target: None,
        }
    }

    pub fn width(&self) -> usize {
        self.text.chars().count()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentLine {
    pub spans: Vec<StyledSpan>,
}

impl DocumentLine {
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn width(&self) -> usize {
        self.spans.iter().map(StyledSpan::width).sum()
    }
}

/// Something the user can select and activate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavTarget {
    Node { path: String },
    Card { id: String, name: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentViewModel {
    pub lines: Vec<DocumentLine>,
    pub targets: Vec<NavTarget>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChildPreviewViewModel {
    pub name: String,
    pub path: String,
    pub length: u64,
    pub preview: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChildColumnsViewModel {
    pub left: Vec<ChildPreviewViewModel>,
    pub right: Vec<ChildPreviewViewModel>,
}

impl ChildColumnsViewModel {
    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }

    /// Left column first, then right.
    pub fn iter(&self) -> impl Iterator<Item = &ChildPreviewViewModel> {
        self.left.iter().chain(self.right.iter())
    }
}
