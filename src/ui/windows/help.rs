use ratatui::{
    Frame,
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::settings::Keymaps;

pub struct HelpWindow;

impl HelpWindow {
    pub fn lines(keymaps: &Keymaps) -> Vec<String> {
        let row = |keys: String, action: &str| format!("   {:<18}{}", keys, action);
        vec![
            " 본문 (Text):".to_string(),
            row(format!("{} / Down", keymaps.next_verse), "Next Verse"),
            row(format!("{} / Up", keymaps.prev_verse), "Previous Verse"),
            row(format!("{} / Right", keymaps.next_chapter), "Next Chapter"),
            row(format!("{} / Left", keymaps.prev_chapter), "Previous Chapter"),
            row(keymaps.books.clone(), "Books & Chapters"),
            String::new(),
            " 관주 (References):".to_string(),
            row(keymaps.focus_references.clone(), "Focus Reference List"),
            row(format!("{} / {}", keymaps.next_verse, keymaps.prev_verse), "Select Reference"),
            row(keymaps.follow.clone(), "Go To Reference"),
            String::new(),
            row(keymaps.help.clone(), "Help"),
            row(format!("{} / Esc", keymaps.quit), "Quit / Close Window"),
        ]
    }

    pub fn render(frame: &mut Frame, area: Rect, keymaps: &Keymaps) {
        let help_content: Vec<Line> = Self::lines(keymaps).into_iter().map(Line::from).collect();

        let max_width = help_content.iter().map(|l| l.width()).max().unwrap_or(0) as u16;
        let width = (max_width + 4).min(area.width);
        let height = (help_content.len() as u16 + 2).min(area.height);

        let x = area.x + (area.width - width) / 2;
        let y = area.y + (area.height - height) / 2;
        let popup_area = Rect::new(x, y, width, height);

        frame.render_widget(Clear, popup_area);

        let help_paragraph =
            Paragraph::new(help_content).block(Block::default().title("Help").borders(Borders::ALL));

        frame.render_widget(help_paragraph, popup_area);
    }
}
