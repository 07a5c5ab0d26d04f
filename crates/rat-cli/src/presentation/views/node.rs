use std::fmt;

use owo_colors::OwoColorize;

use crate::presentation::presenters::fit;
use crate::presentation::view_models::{
    ChildColumnsViewModel, ChildPreviewViewModel, DocumentLine, NodeViewModel,
    PathListViewModel, StyledSpan, TextStyle,
};

pub struct PathListView<'a> {
    data: &'a PathListViewModel,
}

impl<'a> PathListView<'a> {
    pub fn new(data: &'a PathListViewModel) -> Self {
        Self { data }
    }
}

impl<'a> fmt::Display for PathListView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for path in &self.data.paths {
            writeln!(f, "{}", path)?;
        }
        Ok(())
    }
}

/// Plain-text rendering of one node for `rat show`.
pub struct NodeView<'a> {
    data: &'a NodeViewModel,
    color: bool,
}

impl<'a> NodeView<'a> {
    pub fn new(data: &'a NodeViewModel) -> Self {
        Self { data, color: false }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    fn span(&self, f: &mut fmt::Formatter<'_>, span: &StyledSpan) -> fmt::Result {
        if !self.color {
            return write!(f, "{}", span.text);
        }
        let text = span.text.as_str();
        match span.style {
            TextStyle::Plain => write!(f, "{}", text),
            TextStyle::Heading => write!(f, "{}", text.bold().cyan()),
            TextStyle::Strong => write!(f, "{}", text.bold()),
            TextStyle::Emphasis => write!(f, "{}", text.italic()),
            TextStyle::Code => write!(f, "{}", text.yellow()),
            TextStyle::Link => write!(f, "{}", text.blue().underline()),
            TextStyle::ExternalLink => write!(f, "{}", text.blue()),
            TextStyle::Column => write!(f, "{}", text.bold().magenta()),
            TextStyle::Card => write!(f, "{}", text.green()),
            TextStyle::Muted => write!(f, "{}", text.dimmed()),
            TextStyle::Diagnostic => write!(f, "{}", text.yellow().italic()),
            TextStyle::Error => write!(f, "{}", text.red()),
        }
    }

    fn line(&self, f: &mut fmt::Formatter<'_>, line: &DocumentLine) -> fmt::Result {
        for span in &line.spans {
            self.span(f, span)?;
        }
        writeln!(f)
    }

    fn children(&self, f: &mut fmt::Formatter<'_>, columns: &ChildColumnsViewModel) -> fmt::Result {
        let column_width = self.data.width / 2;
        let left = column_lines(&columns.left, column_width.saturating_sub(2));
        let right = column_lines(&columns.right, column_width.saturating_sub(2));

        for i in 0..left.len().max(right.len()) {
            let l = left.get(i).map(String::as_str).unwrap_or_default();
            let r = right.get(i).map(String::as_str).unwrap_or_default();
            if r.is_empty() {
                writeln!(f, "{}", l)?;
            } else {
                let padding = column_width.saturating_sub(l.chars().count());
                writeln!(f, "{}{}{}", l, " ".repeat(padding), r)?;
            }
        }
        Ok(())
    }
}

fn column_lines(children: &[ChildPreviewViewModel], width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for child in children {
        lines.push(fit(&format!("{}/", child.name), width));
        for preview in &child.preview {
            lines.push(fit(&format!("  {}", preview), width));
        }
    }
    lines
}

impl<'a> fmt::Display for NodeView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = format!("/{}", self.data.path);
        if self.color {
            writeln!(f, "{}  {}", title.bold(), self.data.id.dimmed())?;
        } else {
            writeln!(f, "{}  {}", title, self.data.id)?;
        }

        if !self.data.document.lines.is_empty() {
            writeln!(f)?;
            for line in &self.data.document.lines {
                self.line(f, line)?;
            }
        }

        if !self.data.children.is_empty() {
            writeln!(f)?;
            self.children(f, &self.data.children)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::presenters::present_node;
    use rat_engine::Renderer;
    use rat_testing::fixtures::{document, heading, node, paragraph, sized_node};

    #[test]
    fn test_node_view_plain() {
        let mut notes = node(
            "notes",
            document(vec![heading(1, "Notes"), paragraph("Loose ends.")]),
        );
        notes.child_nodes = vec![
            sized_node("notes/rust", 3),
            sized_node("notes/go", 1),
            sized_node("notes/zig", 1),
        ];

        let vm = present_node(&Renderer::default(), &notes, 40, 2);
        insta::assert_snapshot!(NodeView::new(&vm).to_string(), @r"
        /notes  id:notes

        # Notes

        Loose ends.

        go/                 rust/
        zig/
        ");
    }

    #[test]
    fn test_path_list_view() {
        let vm = PathListViewModel {
            paths: vec!["board".to_string(), "board/todo".to_string()],
        };
        assert_eq!(PathListView::new(&vm).to_string(), "board\nboard/todo\n");
    }
}
