//! Fragment tree -> styled lines at a fixed width.
//!
//! Block fragments become one or more lines, inline fragments become spans
//! that are word-wrapped into their block. Kanban boards lay their columns
//! out side by side and tables align their cells; both are width dependent,
//! which is why this lives here and not in the views.

use rat_engine::{Fragment, FragmentKind, LinkTarget};

use crate::presentation::view_models::{
    DocumentLine, DocumentViewModel, NavTarget, StyledSpan, TextStyle,
};

const MIN_WIDTH: usize = 20;
const KANBAN_GAP: usize = 2;
const CELL_SEPARATOR: &str = " │ ";

pub fn present_document(fragment: &Fragment, width: usize) -> DocumentViewModel {
    let mut layout = Layout::new(width.max(MIN_WIDTH));
    layout.block(fragment, 0);
    layout.finish()
}

/// Truncate to `width` characters, marking the cut with an ellipsis.
pub fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn pad(text: &str, width: usize) -> String {
    let fitted = fit(text, width);
    let len = fitted.chars().count();
    format!("{}{}", fitted, " ".repeat(width - len))
}

fn is_inline(kind: &FragmentKind) -> bool {
    matches!(
        kind,
        FragmentKind::Text(_)
            | FragmentKind::Span(_)
            | FragmentKind::Strong
            | FragmentKind::Emphasis
            | FragmentKind::Code(_)
            | FragmentKind::Link { .. }
    )
}

struct Layout {
    width: usize,
    lines: Vec<DocumentLine>,
    targets: Vec<NavTarget>,
}

impl Layout {
    fn new(width: usize) -> Self {
        Self {
            width,
            lines: Vec::new(),
            targets: Vec::new(),
        }
    }

    fn finish(mut self) -> DocumentViewModel {
        while self.lines.last().is_some_and(|l| l.spans.is_empty()) {
            self.lines.pop();
        }
        DocumentViewModel {
            lines: self.lines,
            targets: self.targets,
        }
    }

    fn target(&mut self, target: NavTarget) -> usize {
        self.targets.push(target);
        self.targets.len() - 1
    }

    fn line(&mut self, indent: usize, spans: Vec<StyledSpan>) {
        let mut line = DocumentLine::default();
        if indent > 0 {
            line.spans.push(StyledSpan::new(" ".repeat(indent), TextStyle::Plain));
        }
        line.spans.extend(spans);
        self.lines.push(line);
    }

    /// Separate blocks with a single empty line.
    fn blank(&mut self) {
        if self.lines.last().is_some_and(|l| !l.spans.is_empty()) {
            self.lines.push(DocumentLine::default());
        }
    }

    fn blocks(&mut self, children: &[Fragment], indent: usize) {
        let mut run = Vec::new();
        for child in children {
            if is_inline(&child.kind) {
                self.inline(child, TextStyle::Plain, None, &mut run);
                continue;
            }
            if !run.is_empty() {
                self.wrapped(indent, Vec::new(), std::mem::take(&mut run));
            }
            self.block(child, indent);
        }
        if !run.is_empty() {
            self.wrapped(indent, Vec::new(), run);
        }
    }

    fn block(&mut self, fragment: &Fragment, indent: usize) {
        match &fragment.kind {
            FragmentKind::Document => self.blocks(&fragment.children, indent),
            FragmentKind::Paragraph => {
                let spans = self.inline_children(fragment, TextStyle::Plain, None);
                self.wrapped(indent, Vec::new(), spans);
                self.blank();
            }
            FragmentKind::Heading { tier, diagnostic } => {
                let mut prefix = vec![StyledSpan::new(
                    format!("{} ", "#".repeat(usize::from(*tier))),
                    TextStyle::Heading,
                )];
                if let Some(diagnostic) = diagnostic {
                    prefix.push(StyledSpan::new(
                        format!("[{}] ", diagnostic),
                        TextStyle::Diagnostic,
                    ));
                }
                let spans = self.inline_children(fragment, TextStyle::Heading, None);
                self.wrapped(indent, prefix, spans);
                self.blank();
            }
            FragmentKind::CodeBlock { language, text } => {
                let fence = format!("```{}", language.as_deref().unwrap_or_default());
                self.line(indent, vec![StyledSpan::new(fence, TextStyle::Muted)]);
                for code_line in text.lines() {
                    self.line(indent, vec![StyledSpan::new(code_line, TextStyle::Code)]);
                }
                self.line(indent, vec![StyledSpan::new("```", TextStyle::Muted)]);
                self.blank();
            }
            FragmentKind::HorizontalRule => {
                let rule = "─".repeat(self.width.saturating_sub(indent));
                self.line(indent, vec![StyledSpan::new(rule, TextStyle::Muted)]);
                self.blank();
            }
            FragmentKind::List { ordered } => {
                for (i, item) in fragment.children.iter().enumerate() {
                    let marker = if *ordered {
                        format!("{}. ", i + 1)
                    } else {
                        "• ".to_string()
                    };
                    self.list_item(item, indent, marker);
                }
                if indent == 0 {
                    self.blank();
                }
            }
            FragmentKind::ListItem => self.list_item(fragment, indent, "• ".to_string()),
            FragmentKind::Todo { hints } => {
                for entry in &fragment.children {
                    self.block(entry, indent);
                }
                if !hints.is_empty() {
                    let text = hints
                        .iter()
                        .map(|h| format!("{}: {}", h.hint_type, h.display_value()))
                        .collect::<Vec<_>>()
                        .join("  ");
                    self.line(indent, vec![StyledSpan::new(text, TextStyle::Muted)]);
                }
                self.blank();
            }
            FragmentKind::TodoEntry { done } => {
                let marker = if *done { "[x] " } else { "[ ] " };
                let spans = self.inline_children(fragment, TextStyle::Plain, None);
                self.wrapped(
                    indent,
                    vec![StyledSpan::new(marker, TextStyle::Muted)],
                    spans,
                );
            }
            FragmentKind::Kanban => {
                let columns: Vec<&Fragment> = fragment
                    .children
                    .iter()
                    .filter(|c| matches!(c.kind, FragmentKind::KanbanColumn { .. }))
                    .collect();
                self.kanban(&columns, indent);
                self.blank();
            }
            FragmentKind::KanbanColumn { .. } => {
                self.kanban(&[fragment], indent);
                self.blank();
            }
            FragmentKind::KanbanCard { id, name } => {
                let target = self.target(NavTarget::Card {
                    id: id.clone(),
                    name: name.clone(),
                });
                let mut span = StyledSpan::new(format!("▪ {}", name), TextStyle::Card);
                span.target = Some(target);
                self.line(indent, vec![span]);
            }
            FragmentKind::Table => {
                self.table(fragment, indent);
                self.blank();
            }
            FragmentKind::Graphviz { dot } => {
                self.line(indent, vec![StyledSpan::new("graphviz", TextStyle::Muted)]);
                for dot_line in dot.lines() {
                    self.line(indent + 2, vec![StyledSpan::new(dot_line, TextStyle::Code)]);
                }
                self.blank();
            }
            FragmentKind::Image { src, alt } => {
                let spans = vec![
                    StyledSpan::new("[image] ", TextStyle::Muted),
                    StyledSpan::new(format!("{} ", alt), TextStyle::Plain),
                    StyledSpan::new(src.as_str(), TextStyle::ExternalLink),
                ];
                self.wrapped(indent, Vec::new(), spans);
            }
            FragmentKind::Embed { url } => {
                let spans = vec![
                    StyledSpan::new("[embed] ", TextStyle::Muted),
                    StyledSpan::new(url.as_str(), TextStyle::ExternalLink),
                ];
                self.wrapped(indent, Vec::new(), spans);
            }
            FragmentKind::Error { message } => {
                let span = StyledSpan::new(format!("parse error: {}", message), TextStyle::Error);
                self.wrapped(indent, Vec::new(), vec![span]);
                self.blank();
            }
            FragmentKind::Diagnostic { message, text } => {
                let label = match text {
                    Some(text) => format!("⚠ {} {}", message, text),
                    None => format!("⚠ {}", message),
                };
                self.wrapped(
                    indent,
                    Vec::new(),
                    vec![StyledSpan::new(label, TextStyle::Diagnostic)],
                );
                self.blocks(&fragment.children, indent + 2);
            }
            FragmentKind::Empty => {}
            FragmentKind::TableHeader
            | FragmentKind::TableBody
            | FragmentKind::TableRow
            | FragmentKind::TableCell => self.table(fragment, indent),
            FragmentKind::Text(_)
            | FragmentKind::Span(_)
            | FragmentKind::Strong
            | FragmentKind::Emphasis
            | FragmentKind::Code(_)
            | FragmentKind::Link { .. } => {
                let mut spans = Vec::new();
                self.inline(fragment, TextStyle::Plain, None, &mut spans);
                self.wrapped(indent, Vec::new(), spans);
            }
        }
    }

    /// Inline content goes on the marker line; nested blocks go below it.
    fn list_item(&mut self, item: &Fragment, indent: usize, marker: String) {
        let nested = indent + marker.chars().count();
        let mut prefix = Some(vec![StyledSpan::new(marker, TextStyle::Muted)]);
        let mut run = Vec::new();

        for child in &item.children {
            match &child.kind {
                kind if is_inline(kind) => self.inline(child, TextStyle::Plain, None, &mut run),
                FragmentKind::Paragraph => {
                    let spans = self.inline_children(child, TextStyle::Plain, None);
                    if !run.is_empty() {
                        self.flush_item_line(indent, nested, &mut prefix, std::mem::take(&mut run));
                    }
                    run = spans;
                }
                _ => {
                    if !run.is_empty() || prefix.is_some() {
                        self.flush_item_line(indent, nested, &mut prefix, std::mem::take(&mut run));
                    }
                    self.block(child, nested);
                }
            }
        }
        if !run.is_empty() || prefix.is_some() {
            self.flush_item_line(indent, nested, &mut prefix, run);
        }
    }

    fn flush_item_line(
        &mut self,
        indent: usize,
        nested: usize,
        prefix: &mut Option<Vec<StyledSpan>>,
        spans: Vec<StyledSpan>,
    ) {
        match prefix.take() {
            Some(marker) => self.wrapped(indent, marker, spans),
            None => self.wrapped(nested, Vec::new(), spans),
        }
    }

    fn inline_children(
        &mut self,
        fragment: &Fragment,
        style: TextStyle,
        target: Option<usize>,
    ) -> Vec<StyledSpan> {
        let mut spans = Vec::new();
        for child in &fragment.children {
            self.inline(child, style, target, &mut spans);
        }
        spans
    }

    fn inline(
        &mut self,
        fragment: &Fragment,
        style: TextStyle,
        target: Option<usize>,
        out: &mut Vec<StyledSpan>,
    ) {
        let push = |out: &mut Vec<StyledSpan>, text: &str, style: TextStyle| {
            let mut span = StyledSpan::new(text, style);
            span.target = target;
            out.push(span);
        };

        match &fragment.kind {
            FragmentKind::Text(text) | FragmentKind::Span(text) => push(out, text, style),
            FragmentKind::Code(text) => push(out, text, TextStyle::Code),
            FragmentKind::Strong => {
                let style = if target.is_some() { style } else { TextStyle::Strong };
                out.extend(self.inline_children(fragment, style, target));
            }
            FragmentKind::Emphasis => {
                let style = if target.is_some() { style } else { TextStyle::Emphasis };
                out.extend(self.inline_children(fragment, style, target));
            }
            FragmentKind::Link {
                target: LinkTarget::Internal(path),
            } => {
                let index = self.target(NavTarget::Node { path: path.clone() });
                out.extend(self.inline_children(fragment, TextStyle::Link, Some(index)));
            }
            FragmentKind::Link {
                target: LinkTarget::External(_),
            } => out.extend(self.inline_children(fragment, TextStyle::ExternalLink, None)),
            FragmentKind::Diagnostic { message, text } => {
                let label = match text {
                    Some(text) => format!("⚠ {} {}", message, text),
                    None => format!("⚠ {}", message),
                };
                push(out, &label, TextStyle::Diagnostic);
                out.extend(self.inline_children(fragment, style, target));
            }
            FragmentKind::Image { alt, .. } => push(out, &format!("[image: {}]", alt), TextStyle::Muted),
            FragmentKind::KanbanCard { id, name } => {
                let index = self.target(NavTarget::Card {
                    id: id.clone(),
                    name: name.clone(),
                });
                let mut span = StyledSpan::new(name.as_str(), TextStyle::Card);
                span.target = Some(index);
                out.push(span);
            }
            FragmentKind::Empty => {}
            _ if fragment.children.is_empty() => {
                let text = fragment.plain_text();
                if !text.is_empty() {
                    push(out, &text, style);
                }
            }
            _ => out.extend(self.inline_children(fragment, style, target)),
        }
    }

    /// Word-wrap `spans` after `prefix`. Continuation lines are indented by
    /// the prefix width so wrapped list items and todo entries line up.
    fn wrapped(&mut self, indent: usize, prefix: Vec<StyledSpan>, spans: Vec<StyledSpan>) {
        let prefix_width: usize = prefix.iter().map(StyledSpan::width).sum();
        let budget = self
            .width
            .saturating_sub(indent + prefix_width)
            .max(1);

        let mut lines: Vec<Vec<StyledSpan>> = vec![Vec::new()];
        let mut used = 0;

        for span in spans {
            let text = span.text.replace('\n', " ");
            for word in text.split_inclusive(' ') {
                let word_width = word.trim_end().chars().count();
                if used > 0 && used + word_width > budget {
                    trim_trailing_space(lines.last_mut());
                    lines.push(Vec::new());
                    used = 0;
                }
                if used == 0 && word.trim().is_empty() {
                    continue;
                }

                // Words longer than a whole line are split hard.
                let trailing = word.chars().rev().take_while(|c| c.is_whitespace()).count();
                let mut rest: Vec<char> = word.chars().collect();
                while rest.len() - trailing > budget {
                    let head: String = rest.drain(..budget).collect();
                    push_merged(lines.last_mut(), &head, &span);
                    lines.push(Vec::new());
                }
                let word: String = rest.into_iter().collect();
                used += word.chars().count();
                push_merged(lines.last_mut(), &word, &span);
            }
        }
        trim_trailing_space(lines.last_mut());

        let mut first_prefix = Some(prefix);
        for (i, spans) in lines.into_iter().enumerate() {
            if i > 0 && spans.is_empty() {
                continue;
            }
            let mut line = match first_prefix.take() {
                Some(prefix) => prefix,
                None if prefix_width > 0 => {
                    vec![StyledSpan::new(" ".repeat(prefix_width), TextStyle::Plain)]
                }
                None => Vec::new(),
            };
            line.extend(spans);
            if !line.is_empty() {
                self.line(indent, line);
            }
        }
    }

    /// Columns side by side: names, a rule, then one card per row.
    fn kanban(&mut self, columns: &[&Fragment], indent: usize) {
        if columns.is_empty() {
            return;
        }
        let count = columns.len();
        let usable = self
            .width
            .saturating_sub(indent + KANBAN_GAP * (count - 1));
        let column_width = (usable / count).max(8);

        // Targets follow document order: every card of a column before the next column.
        let mut cards: Vec<Vec<StyledSpan>> = Vec::new();
        for column in columns {
            let mut spans = Vec::new();
            for card in &column.children {
                if let FragmentKind::KanbanCard { id, name } = &card.kind {
                    let target = self.target(NavTarget::Card {
                        id: id.clone(),
                        name: name.clone(),
                    });
                    let mut span =
                        StyledSpan::new(pad(&format!("▪ {}", name), column_width), TextStyle::Card);
                    span.target = Some(target);
                    spans.push(span);
                }
            }
            cards.push(spans);
        }

        let gap = " ".repeat(KANBAN_GAP);
        let mut header = Vec::new();
        let mut rule = Vec::new();
        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                header.push(StyledSpan::new(gap.as_str(), TextStyle::Plain));
                rule.push(StyledSpan::new(gap.as_str(), TextStyle::Plain));
            }
            let name = match &column.kind {
                FragmentKind::KanbanColumn { name, .. } => name.as_str(),
                _ => "",
            };
            header.push(StyledSpan::new(pad(name, column_width), TextStyle::Column));
            rule.push(StyledSpan::new("─".repeat(column_width), TextStyle::Muted));
        }
        trim_trailing_space(Some(&mut header));
        self.line(indent, header);
        self.line(indent, rule);

        let rows = cards.iter().map(Vec::len).max().unwrap_or(0);
        for row in 0..rows {
            let mut line = Vec::new();
            for (i, column) in cards.iter().enumerate() {
                if i > 0 {
                    line.push(StyledSpan::new(gap.as_str(), TextStyle::Plain));
                }
                match column.get(row) {
                    Some(card) => line.push(card.clone()),
                    None => line.push(StyledSpan::new(" ".repeat(column_width), TextStyle::Plain)),
                }
            }
            trim_trailing_space(Some(&mut line));
            self.line(indent, line);
        }
    }

    fn table(&mut self, fragment: &Fragment, indent: usize) {
        let mut rows: Vec<(bool, Vec<String>)> = Vec::new();
        collect_rows(fragment, false, &mut rows);
        let columns = rows.iter().map(|(_, cells)| cells.len()).max().unwrap_or(0);
        if columns == 0 {
            return;
        }

        let mut widths = vec![0; columns];
        for (_, cells) in &rows {
            for (i, cell) in cells.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
        let separators = CELL_SEPARATOR.chars().count() * (columns - 1);
        let budget = self.width.saturating_sub(indent + separators);
        while widths.iter().sum::<usize>() > budget {
            let Some(widest) = widths.iter_mut().max() else {
                break;
            };
            if *widest <= 3 {
                break;
            }
            *widest -= 1;
        }

        let has_header = rows.iter().any(|(header, _)| *header);
        let mut ruled = false;
        for (is_header, cells) in &rows {
            if has_header && !is_header && !ruled {
                let rule = widths
                    .iter()
                    .map(|w| "─".repeat(*w))
                    .collect::<Vec<_>>()
                    .join("─┼─");
                self.line(indent, vec![StyledSpan::new(rule, TextStyle::Muted)]);
                ruled = true;
            }

            let style = if *is_header {
                TextStyle::Strong
            } else {
                TextStyle::Plain
            };
            let mut line = Vec::new();
            for (i, width) in widths.iter().enumerate() {
                if i > 0 {
                    line.push(StyledSpan::new(CELL_SEPARATOR, TextStyle::Muted));
                }
                let cell = cells.get(i).map(String::as_str).unwrap_or_default();
                line.push(StyledSpan::new(pad(cell, *width), style));
            }
            trim_trailing_space(Some(&mut line));
            self.line(indent, line);
        }
    }
}

fn collect_rows(fragment: &Fragment, header: bool, rows: &mut Vec<(bool, Vec<String>)>) {
    match fragment.kind {
        FragmentKind::TableRow => {
            let cells = fragment
                .children
                .iter()
                .map(|cell| cell.plain_text().trim().to_string())
                .collect();
            rows.push((header, cells));
        }
        FragmentKind::TableHeader => {
            for child in &fragment.children {
                collect_rows(child, true, rows);
            }
        }
        _ => {
            for child in &fragment.children {
                collect_rows(child, header, rows);
            }
        }
    }
}

fn push_merged(line: Option<&mut Vec<StyledSpan>>, text: &str, like: &StyledSpan) {
    let Some(line) = line else {
        return;
    };
    if text.is_empty() {
        return;
    }
    if let Some(last) = line.last_mut()
        && last.style == like.style
        && last.target == like.target
    {
        last.text.push_str(text);
        return;
    }
    line.push(StyledSpan {
        text: text.to_string(),
        style: like.style,
        target: like.target,
    });
}

fn trim_trailing_space(line: Option<&mut Vec<StyledSpan>>) {
    let Some(line) = line else {
        return;
    };
    while let Some(last) = line.last_mut() {
        let trimmed = last.text.trim_end().len();
        last.text.truncate(trimmed);
        if last.text.is_empty() {
            line.pop();
        } else {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rat_engine::render;
    use rat_testing::fixtures::{
        column, document, graph_link, heading, kanban, paragraph, table, text, todo,
    };
    use rat_types::NodeAstPart;

    fn lines(part: &NodeAstPart, width: usize) -> String {
        present_document(&render(part), width)
            .lines
            .iter()
            .map(DocumentLine::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_paragraph_wraps_at_width() {
        let doc = document(vec![
            heading(2, "Notes"),
            paragraph("the quick brown fox jumps over the lazy dog"),
        ]);
        insta::assert_snapshot!(lines(&doc, 20), @r"
        ## Notes

        the quick brown fox
        jumps over the lazy
        dog
        ");
    }

    #[test]
    fn test_wide_whitespace_does_not_break_wrapping() {
        let doc = document(vec![paragraph("keep\u{a0}\u{a0} together")]);
        assert_eq!(lines(&doc, 40), "keep\u{a0}\u{a0} together");

        let doc = document(vec![paragraph("abcdefghijklmnopqrstuvwxy\u{3000} z")]);
        assert_eq!(
            lines(&doc, 20),
            "abcdefghijklmnopqrst\nuvwxy\u{3000} z"
        );
    }

    #[test]
    fn test_unknown_heading_level_is_marked() {
        let doc = document(vec![heading(9, "Deep")]);
        assert_eq!(lines(&doc, 40), "# [unknown heading level] Deep");
    }

    #[test]
    fn test_kanban_columns_side_by_side() {
        let doc = document(vec![kanban(vec![
            column("col-todo", "board/todo", &["parser", "search"]),
            column("col-done", "board/done", &["tui"]),
        ])]);
        let vm = present_document(&render(&doc), 22);
        let text: Vec<String> = vm.lines.iter().map(DocumentLine::text).collect();
        assert_eq!(
            text,
            vec![
                "todo        done",
                "──────────  ──────────",
                "▪ parser    ▪ tui",
                "▪ search",
            ]
        );

        // Column-major target order.
        let names: Vec<_> = vm
            .targets
            .iter()
            .map(|t| match t {
                NavTarget::Card { name, .. } => name.as_str(),
                NavTarget::Node { path } => path.as_str(),
            })
            .collect();
        assert_eq!(names, vec!["parser", "search", "tui"]);
    }

    #[test]
    fn test_table_rows_joined_with_separator() {
        let doc = document(vec![table(&["name", "state"], &[&["parser", "done"], &["tui", "doing"]])]);
        insta::assert_snapshot!(lines(&doc, 40), @r"
        name   │ state
        ───────┼──────
        parser │ done
        tui    │ doing
        ");
    }

    #[test]
    fn test_graph_link_is_a_target() {
        let doc = document(vec![NodeAstPart::container(
            "paragraph",
            vec![text("see "), graph_link("board", "the board")],
        )]);
        let vm = present_document(&render(&doc), 40);
        assert_eq!(
            vm.targets,
            vec![NavTarget::Node {
                path: "board".to_string()
            }]
        );
        let link = vm.lines[0]
            .spans
            .iter()
            .find(|s| s.target == Some(0))
            .map(|s| s.text.as_str());
        assert_eq!(link, Some("the board"));
    }

    #[test]
    fn test_todo_entries_and_hints() {
        let doc = document(vec![todo(&[("ship it", true), ("write docs", false)])]);
        insta::assert_snapshot!(lines(&doc, 40), @r"
        [x] ship it
        [ ] write docs
        due: friday
        ");
    }

    #[test]
    fn test_unknown_tag_shows_diagnostic() {
        let doc = document(vec![
            NodeAstPart::leaf("footnote_definition").with_attr("text", "[^1]"),
        ]);
        assert_eq!(lines(&doc, 60), "⚠ unimplemented parser for footnote_definition [^1]");
    }

    #[test]
    fn test_fit_marks_truncation() {
        assert_eq!(fit("parser", 10), "parser");
        assert_eq!(fit("parser", 4), "par…");
    }
}
