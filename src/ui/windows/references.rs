use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::models::ReferencePreview;

/// Cross-reference column: the lookup key, then each citation with a
/// preview of the verse it points at.
pub struct ReferencesWindow;

impl ReferencesWindow {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        key: &str,
        entries: &[ReferencePreview],
        selected_index: usize,
        focused: bool,
        empty_message: &str,
    ) {
        let border_style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        let block = Block::default()
            .title("관주 (References)")
            .borders(Borders::ALL)
            .border_style(border_style)
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        let caption = Paragraph::new(Line::from(Span::styled(
            format!("기준: {}", key),
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(caption, chunks[0]);

        if entries.is_empty() {
            let paragraph = Paragraph::new(empty_message)
                .style(Style::default().fg(Color::DarkGray))
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, chunks[1]);
            return;
        }

        let width = chunks[1].width as usize;
        let items: Vec<ListItem> = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let style = if focused && i == selected_index {
                    Style::default().bg(Color::Blue).fg(Color::White)
                } else {
                    Style::default()
                };
                ListItem::new(Self::entry_text(entry, width)).style(style)
            })
            .collect();

        let mut state = ListState::default();
        state.select(Some(selected_index.min(entries.len() - 1)));
        frame.render_stateful_widget(List::new(items), chunks[1], &mut state);
    }

    /// Citation line in green, wrapped preview below it, blank separator.
    pub fn entry_text(entry: &ReferencePreview, width: usize) -> Text<'static> {
        let mut lines = vec![Line::from(Span::styled(
            entry.citation.clone(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ))];
        for line in textwrap::wrap(&entry.preview_text, width.max(1)) {
            lines.push(Line::from(line.into_owned()));
        }
        lines.push(Line::from(""));
        Text::from(lines)
    }
}
