use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::selected_style;
use crate::presentation::view_models::{ChildColumnsViewModel, ChildPreviewViewModel};

/// The current node's children, two bin-packed columns of previews.
pub struct ChildColumnsView<'a> {
    model: &'a ChildColumnsViewModel,
    offset: usize,
    selected: Option<usize>,
}

impl<'a> ChildColumnsView<'a> {
    pub fn new(model: &'a ChildColumnsViewModel, offset: usize, selected: Option<usize>) -> Self {
        Self {
            model,
            offset,
            selected,
        }
    }

    fn column(&self, children: &'a [ChildPreviewViewModel], first: usize) -> Paragraph<'a> {
        let name_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let preview_style = Style::default().fg(Color::Gray);

        let mut lines = Vec::new();
        for (i, child) in children.iter().enumerate() {
            let style = if self.selected == Some(first + i) {
                selected_style(name_style)
            } else {
                name_style
            };
            lines.push(Line::from(Span::styled(format!("{}/", child.name), style)));
            for preview in &child.preview {
                lines.push(Line::from(Span::styled(
                    format!("  {}", preview),
                    preview_style,
                )));
            }
            lines.push(Line::default());
        }
        Paragraph::new(lines)
    }
}

impl<'a> Widget for ChildColumnsView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::TOP)
            .title(" children ");
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(inner);
        self.column(&self.model.left, self.offset)
            .render(chunks[0], buf);
        self.column(&self.model.right, self.offset + self.model.left.len())
            .render(chunks[1], buf);
    }
}
