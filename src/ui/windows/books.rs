use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use super::centered_popup_area;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickerStage {
    #[default]
    Book,
    Chapter,
}

/// Two-step book then chapter chooser.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookPicker {
    pub stage: PickerStage,
    pub books: Vec<String>,
    pub chapters: Vec<String>,
    pub book_index: usize,
    pub chapter_index: usize,
}

impl BookPicker {
    /// Start on the book list with `current` preselected when present.
    pub fn open(books: Vec<String>, current: &str) -> Self {
        let book_index = books.iter().position(|b| b == current).unwrap_or(0);
        Self {
            stage: PickerStage::Book,
            books,
            chapters: Vec::new(),
            book_index,
            chapter_index: 0,
        }
    }

    pub fn entries(&self) -> &[String] {
        match self.stage {
            PickerStage::Book => &self.books,
            PickerStage::Chapter => &self.chapters,
        }
    }

    pub fn selected_index(&self) -> usize {
        match self.stage {
            PickerStage::Book => self.book_index,
            PickerStage::Chapter => self.chapter_index,
        }
    }

    fn selected_index_mut(&mut self) -> &mut usize {
        match self.stage {
            PickerStage::Book => &mut self.book_index,
            PickerStage::Chapter => &mut self.chapter_index,
        }
    }

    pub fn next(&mut self) {
        let len = self.entries().len();
        if len > 0 {
            let index = self.selected_index_mut();
            *index = (*index + 1).min(len - 1);
        }
    }

    pub fn previous(&mut self) {
        let index = self.selected_index_mut();
        *index = index.saturating_sub(1);
    }

    pub fn selected_book(&self) -> Option<&str> {
        self.books.get(self.book_index).map(String::as_str)
    }

    pub fn selected_chapter(&self) -> Option<&str> {
        match self.stage {
            PickerStage::Book => None,
            PickerStage::Chapter => self.chapters.get(self.chapter_index).map(String::as_str),
        }
    }

    /// Switch to the chapter list of the selected book.
    pub fn show_chapters(&mut self, chapters: Vec<String>, current: Option<&str>) {
        self.chapter_index = current
            .and_then(|c| chapters.iter().position(|ch| ch == c))
            .unwrap_or(0);
        self.chapters = chapters;
        self.stage = PickerStage::Chapter;
    }

    /// Go back to the book list. Returns false when already there.
    pub fn back(&mut self) -> bool {
        match self.stage {
            PickerStage::Book => false,
            PickerStage::Chapter => {
                self.stage = PickerStage::Book;
                self.chapters.clear();
                true
            }
        }
    }
}

pub struct BooksWindow;

impl BooksWindow {
    pub fn render(frame: &mut Frame, area: Rect, picker: &BookPicker) {
        let popup_area = centered_popup_area(area, 40, 80);
        frame.render_widget(Clear, popup_area);

        let title = match (picker.stage, picker.selected_book()) {
            (PickerStage::Chapter, Some(book)) => format!("{} - 장 선택", book),
            _ => "성경 선택".to_string(),
        };
        let block = Block::default().title(title).borders(Borders::ALL);

        if picker.entries().is_empty() {
            let paragraph = Paragraph::new("No books loaded")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(paragraph, popup_area);
            return;
        }

        let selected = picker.selected_index();
        let items: Vec<ListItem> = picker
            .entries()
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let label = match picker.stage {
                    PickerStage::Book => entry.clone(),
                    PickerStage::Chapter => format!("{}장", entry),
                };
                let style = if i == selected {
                    Style::default().bg(Color::Blue).fg(Color::White)
                } else {
                    Style::default()
                };
                ListItem::new(label).style(style)
            })
            .collect();

        let mut state = ListState::default();
        state.select(Some(selected));
        frame.render_stateful_widget(List::new(items).block(block), popup_area, &mut state);
    }
}
