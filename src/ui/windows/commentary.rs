use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

pub struct CommentaryWindow;

impl CommentaryWindow {
    /// Commentary column. `None` shows the placeholder in a muted style.
    pub fn render(frame: &mut Frame, area: Rect, commentary: Option<&str>, placeholder: &str) {
        let block = Block::default()
            .title("주석 (Commentary)")
            .borders(Borders::ALL)
            .padding(Padding::horizontal(1));

        let paragraph = match commentary {
            Some(text) => Paragraph::new(text).style(Style::default().fg(Color::Yellow)),
            None => Paragraph::new(placeholder).style(Style::default().fg(Color::DarkGray)),
        };

        frame.render_widget(paragraph.block(block).wrap(Wrap { trim: true }), area);
    }
}
