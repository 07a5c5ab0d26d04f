//! Console bar: node path as clickable-by-keyboard breadcrumbs, plus its id.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::selected_style;
use crate::presentation::view_models::ConsoleViewModel;

pub struct ConsoleView<'a> {
    model: &'a ConsoleViewModel,
    selected: Option<usize>,
}

impl<'a> ConsoleView<'a> {
    pub fn new(model: &'a ConsoleViewModel, selected: Option<usize>) -> Self {
        Self { model, selected }
    }
}

impl<'a> Widget for ConsoleView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                format!(" {} ", self.model.id),
                Style::default().fg(Color::DarkGray),
            ));

        let crumb_style = Style::default().fg(Color::Cyan);
        let mut spans = vec![Span::styled("/", Style::default().fg(Color::DarkGray))];
        for (i, crumb) in self.model.crumbs.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("/", Style::default().fg(Color::DarkGray)));
            }
            let style = if self.selected == Some(crumb.target) {
                selected_style(crumb_style)
            } else {
                crumb_style
            };
            spans.push(Span::styled(crumb.label.as_str(), style));
        }

        Paragraph::new(Line::from(spans)).block(block).render(area, buf);
    }
}
