use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

/// Board widget for the chapter text column
pub struct Board {
    title: String,
    verses: Vec<(String, String)>,
    selected_verse: Option<String>,
    show_verse_numbers: bool,
    empty_message: String,
    focused: bool,
}

impl Board {
    pub fn new() -> Self {
        Self {
            title: String::from("본문"),
            verses: Vec::new(),
            selected_verse: None,
            show_verse_numbers: true,
            empty_message: String::new(),
            focused: true,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_verses(mut self, verses: Vec<(String, String)>) -> Self {
        self.verses = verses;
        self
    }

    pub fn with_selected_verse(mut self, verse: impl Into<String>) -> Self {
        self.selected_verse = Some(verse.into());
        self
    }

    pub fn with_verse_numbers(mut self, show: bool) -> Self {
        self.show_verse_numbers = show;
        self
    }

    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn with_focus(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Index of the highlighted verse within the chapter, if it is present.
    pub fn selected_index(&self) -> Option<usize> {
        let selected = self.selected_verse.as_deref()?;
        self.verses.iter().position(|(verse, _)| verse == selected)
    }

    /// Verse lines wrapped to `width` columns, number prefix included.
    pub fn wrapped_lines(&self, index: usize, width: usize) -> Vec<String> {
        let Some((verse, text)) = self.verses.get(index) else {
            return Vec::new();
        };
        let content = if self.show_verse_numbers {
            format!("{}. {}", verse, text)
        } else {
            text.clone()
        };
        textwrap::wrap(&content, width.max(1))
            .into_iter()
            .map(|line| line.into_owned())
            .collect()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(self.title.as_str());

        let inner_area = block.inner(area);
        frame.render_widget(block, area);

        if self.verses.is_empty() {
            self.render_empty(frame, inner_area);
        } else {
            self.render_content(frame, inner_area);
        }
    }

    fn render_content(&self, frame: &mut Frame, area: Rect) {
        let width = area.width as usize;
        let selected = self.selected_index();

        let items: Vec<ListItem> = (0..self.verses.len())
            .map(|i| {
                let lines: Vec<Line> = self
                    .wrapped_lines(i, width)
                    .into_iter()
                    .map(Line::from)
                    .collect();
                let style = if Some(i) == selected {
                    Style::default()
                        .bg(Color::Blue)
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(Text::from(lines)).style(style)
            })
            .collect();

        let mut state = ListState::default();
        state.select(selected);
        frame.render_stateful_widget(List::new(items), area, &mut state);
    }

    fn render_empty(&self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(Line::from(Span::raw(self.empty_message.as_str())))
            .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))
            .wrap(Wrap { trim: true });

        frame.render_widget(paragraph, area);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verses() -> Vec<(String, String)> {
        vec![
            ("1".to_string(), "태초에 하나님이 천지를 창조하시니라".to_string()),
            ("2".to_string(), "땅이 혼돈하고 공허하며".to_string()),
        ]
    }

    #[test]
    fn test_board_new() {
        let board = Board::new();
        assert!(board.verses.is_empty());
        assert!(board.selected_verse.is_none());
        assert!(board.show_verse_numbers);
        assert!(board.focused);
    }

    #[test]
    fn test_board_builder() {
        let board = Board::new()
            .with_title("창세기 1장")
            .with_verses(verses())
            .with_selected_verse("2")
            .with_verse_numbers(false)
            .with_focus(false);

        assert_eq!(board.title, "창세기 1장");
        assert_eq!(board.verses.len(), 2);
        assert_eq!(board.selected_index(), Some(1));
        assert!(!board.show_verse_numbers);
        assert!(!board.focused);
    }

    #[test]
    fn test_board_selected_index_missing_verse() {
        let board = Board::new().with_verses(verses()).with_selected_verse("99");
        assert_eq!(board.selected_index(), None);
    }

    #[test]
    fn test_board_wrapped_lines_prefix_verse_number() {
        let board = Board::new().with_verses(verses());
        assert_eq!(board.wrapped_lines(1, 80), vec!["2. 땅이 혼돈하고 공허하며"]);

        let bare = Board::new().with_verses(verses()).with_verse_numbers(false);
        assert_eq!(bare.wrapped_lines(1, 80), vec!["땅이 혼돈하고 공허하며"]);
        assert!(bare.wrapped_lines(5, 80).is_empty());
    }

    #[test]
    fn test_board_wrapped_lines_respects_width() {
        let board = Board::new().with_verses(verses());
        let lines = board.wrapped_lines(0, 12);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|line| textwrap::core::display_width(line) <= 12));
    }
}
