use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use super::selected_style;
use crate::presentation::view_models::{OverlayViewModel, PromptViewModel};

const MAX_RESULTS: usize = 12;

/// Centred box drawn over the screen for whichever overlay is open.
pub struct OverlayView<'a> {
    model: &'a OverlayViewModel,
}

impl<'a> OverlayView<'a> {
    pub fn new(model: &'a OverlayViewModel) -> Self {
        Self { model }
    }

    fn height(&self) -> u16 {
        match self.model {
            OverlayViewModel::Search { results, .. } => {
                4 + results.len().clamp(1, MAX_RESULTS) as u16
            }
            OverlayViewModel::NewNode { .. } => 4,
            OverlayViewModel::ConfirmDelete { .. } => 5,
        }
    }
}

/// `area` shrunk to `width` x `height` around its centre.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 3,
        width,
        height,
    }
}

fn prompt_line(prompt: &PromptViewModel) -> Line<'_> {
    let mode_style = match prompt.mode {
        "NORMAL" => Style::default().fg(Color::Black).bg(Color::Yellow),
        _ => Style::default().fg(Color::Black).bg(Color::Cyan),
    };
    let value_style = if prompt.selected {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    };

    let before: String = prompt.value.chars().take(prompt.cursor).collect();
    let at: String = prompt
        .value
        .chars()
        .nth(prompt.cursor)
        .map(String::from)
        .unwrap_or_else(|| " ".to_string());
    let after: String = prompt.value.chars().skip(prompt.cursor + 1).collect();

    Line::from(vec![
        Span::styled(format!(" {} ", prompt.mode), mode_style),
        Span::raw(" "),
        Span::styled(before, value_style),
        Span::styled(at, value_style.add_modifier(Modifier::UNDERLINED)),
        Span::styled(after, value_style),
    ])
}

impl<'a> Widget for OverlayView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = (area.width * 3 / 5).max(30);
        let area = centered(area, width, self.height());
        Clear.render(area, buf);

        let (title, body) = match self.model {
            OverlayViewModel::Search {
                title,
                prompt,
                results,
                cursor,
                status,
            } => {
                let mut lines = vec![prompt_line(prompt), Line::default()];
                if let Some(status) = status {
                    lines.push(Line::from(Span::styled(
                        status.as_str(),
                        Style::default().fg(Color::DarkGray),
                    )));
                }
                // Keep the cursor in view.
                let skip = cursor.saturating_sub(MAX_RESULTS - 1);
                for (i, path) in results.iter().enumerate().skip(skip).take(MAX_RESULTS) {
                    let style = if i == *cursor {
                        selected_style(Style::default().fg(Color::Cyan))
                    } else {
                        Style::default()
                    };
                    lines.push(Line::from(Span::styled(format!("/{}", path), style)));
                }
                (format!(" {} ", title), lines)
            }
            OverlayViewModel::NewNode { parent, prompt } => (
                format!(" new node under {} ", parent),
                vec![prompt_line(prompt)],
            ),
            OverlayViewModel::ConfirmDelete {
                segments,
                in_flight,
            } => {
                let mut path = vec![Span::styled("/", Style::default().fg(Color::DarkGray))];
                for (i, segment) in segments.iter().enumerate() {
                    if i > 0 {
                        path.push(Span::styled("/", Style::default().fg(Color::DarkGray)));
                    }
                    path.push(Span::styled(
                        segment.as_str(),
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ));
                }
                let hint = if *in_flight {
                    "deleting…"
                } else {
                    "⏎/y delete   esc/n cancel"
                };
                (
                    " delete node? ".to_string(),
                    vec![
                        Line::from(path),
                        Line::default(),
                        Line::from(Span::styled(hint, Style::default().fg(Color::Yellow))),
                    ],
                )
            }
        };

        let block = Block::default().borders(Borders::ALL).title(title);
        let inner = block.inner(area);
        block.render(area, buf);
        Paragraph::new(body).render(inner, buf);
    }
}
