use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use super::{selected_style, text_style};
use crate::presentation::view_models::DocumentViewModel;

pub struct DocumentView<'a> {
    model: &'a DocumentViewModel,
    error: Option<&'a str>,
    /// Global index of this document's first target.
    offset: usize,
    selected: Option<usize>,
    scroll: u16,
}

impl<'a> DocumentView<'a> {
    pub fn new(model: &'a DocumentViewModel, offset: usize) -> Self {
        Self {
            model,
            error: None,
            offset,
            selected: None,
            scroll: 0,
        }
    }

    pub fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }

    pub fn selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected;
        self
    }

    pub fn scroll(mut self, scroll: u16) -> Self {
        self.scroll = scroll;
        self
    }
}

impl<'a> Widget for DocumentView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default().borders(Borders::LEFT | Borders::RIGHT);

        if let Some(error) = self.error {
            Paragraph::new(Span::styled(error, Style::default().fg(Color::Red)))
                .wrap(Wrap { trim: false })
                .block(block.title("error"))
                .render(area, buf);
            return;
        }

        let local = self
            .selected
            .and_then(|s| s.checked_sub(self.offset));
        let lines: Vec<Line> = self
            .model
            .lines
            .iter()
            .map(|line| {
                Line::from(
                    line.spans
                        .iter()
                        .map(|span| {
                            let style = text_style(span.style);
                            let style = if span.target.is_some() && span.target == local {
                                selected_style(style)
                            } else {
                                style
                            };
                            Span::styled(span.text.as_str(), style)
                        })
                        .collect::<Vec<_>>(),
                )
            })
            .collect();

        Paragraph::new(lines)
            .block(block)
            .scroll((self.scroll, 0))
            .render(area, buf);
    }
}
