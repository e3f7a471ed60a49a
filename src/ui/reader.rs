use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::books::canonicalize;
use crate::config::Config;
use crate::logging;
use crate::models::{FIRST_VERSE, Focus, Position, ReferencePreview, WindowType};
use crate::navigation::Navigator;
use crate::references::Resolver;
use crate::settings::Keymaps;
use crate::store::{CrossRefMap, VerseStore};
use crate::ui::board::Board;
use crate::ui::windows::{
    books::{BookPicker, BooksWindow, PickerStage},
    commentary::CommentaryWindow,
    help::HelpWindow,
    references::ReferencesWindow,
};

const APP_TITLE: &str = "관주 성경";
const MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Everything the reader needs between frames: the loaded data, the
/// navigator and the UI state.
#[derive(Debug, Clone)]
pub struct ApplicationState {
    pub store: VerseStore,
    pub refs: CrossRefMap,
    pub navigator: Navigator,
    pub config: Config,
    pub ui_state: UiState,
    pub should_quit: bool,
}

impl ApplicationState {
    pub fn new(config: Config, store: VerseStore, refs: CrossRefMap, navigator: Navigator) -> Self {
        let mut state = Self {
            store,
            refs,
            navigator,
            config,
            ui_state: UiState::new(),
            should_quit: false,
        };
        state.refresh_references();
        state
    }

    pub fn position(&self) -> &Position {
        self.navigator.position()
    }

    /// Recompute the reference column for the current position.
    pub fn refresh_references(&mut self) {
        let resolver = Resolver::new(&self.store, &self.refs);
        self.ui_state.references = resolver.references_at(self.navigator.position());
        self.ui_state.references_selected_index = 0;
        if self.ui_state.references.is_empty() && self.ui_state.focus == Focus::References {
            self.ui_state.focus = Focus::Text;
        }
    }

    /// Move to a position the store itself handed out.
    fn goto(&mut self, book: &str, chapter: &str, verse: &str) {
        // A book change resets chapter and verse, a chapter change resets
        // the verse, so reaching an arbitrary target takes up to three steps.
        for _ in 0..3 {
            let position = self.navigator.select_direct(book, chapter, verse);
            if position.book == book && position.chapter == chapter && position.verse == verse {
                break;
            }
        }
        self.refresh_references();
    }

    fn first_verse_of(&self, book: &str, chapter: &str) -> String {
        self.store
            .verses_of(book, chapter)
            .ok()
            .and_then(|verses| verses.into_iter().next())
            .unwrap_or_else(|| FIRST_VERSE.to_string())
    }

    fn last_verse_of(&self, book: &str, chapter: &str) -> String {
        self.store
            .verses_of(book, chapter)
            .ok()
            .and_then(|verses| verses.into_iter().last())
            .unwrap_or_else(|| FIRST_VERSE.to_string())
    }

    fn adjacent_book(&self, book: &str, forward: bool) -> Option<String> {
        let books = self.store.books();
        let canonical = canonicalize(book);
        let index = books.iter().position(|name| name == canonical)?;
        if forward {
            books.get(index + 1).cloned()
        } else {
            index.checked_sub(1).and_then(|i| books.get(i).cloned())
        }
    }

    /// `(book, chapter)` after the current chapter, crossing into the next book.
    fn chapter_after(&self, position: &Position) -> Option<(String, String)> {
        let chapters = self.store.chapters_of(&position.book).unwrap_or_default();
        match index_of(&chapters, &position.chapter) {
            Some(i) if i + 1 < chapters.len() => {
                Some((position.book.clone(), chapters[i + 1].clone()))
            }
            None if !chapters.is_empty() => Some((position.book.clone(), chapters[0].clone())),
            _ => {
                let book = self.adjacent_book(&position.book, true)?;
                let chapter = self.store.chapters_of(&book).ok()?.into_iter().next()?;
                Some((book, chapter))
            }
        }
    }

    /// `(book, chapter)` before the current chapter, crossing into the previous book.
    fn chapter_before(&self, position: &Position) -> Option<(String, String)> {
        let chapters = self.store.chapters_of(&position.book).unwrap_or_default();
        match index_of(&chapters, &position.chapter) {
            Some(i) if i > 0 => Some((position.book.clone(), chapters[i - 1].clone())),
            None if !chapters.is_empty() => Some((position.book.clone(), chapters[0].clone())),
            _ => {
                let book = self.adjacent_book(&position.book, false)?;
                let chapter = self.store.chapters_of(&book).ok()?.into_iter().last()?;
                Some((book, chapter))
            }
        }
    }

    pub fn next_verse(&mut self) {
        let position = self.position().clone();
        let verses = self
            .store
            .verses_of(&position.book, &position.chapter)
            .unwrap_or_default();
        match index_of(&verses, &position.verse) {
            Some(i) if i + 1 < verses.len() => {
                self.goto(&position.book, &position.chapter, &verses[i + 1])
            }
            None if !verses.is_empty() => self.goto(&position.book, &position.chapter, &verses[0]),
            _ => self.next_chapter(),
        }
    }

    pub fn prev_verse(&mut self) {
        let position = self.position().clone();
        let verses = self
            .store
            .verses_of(&position.book, &position.chapter)
            .unwrap_or_default();
        match index_of(&verses, &position.verse) {
            Some(i) if i > 0 => self.goto(&position.book, &position.chapter, &verses[i - 1]),
            None if !verses.is_empty() => self.goto(&position.book, &position.chapter, &verses[0]),
            _ => match self.chapter_before(&position) {
                Some((book, chapter)) => {
                    let verse = self.last_verse_of(&book, &chapter);
                    self.goto(&book, &chapter, &verse);
                }
                None => self.at_boundary("첫 구절입니다."),
            },
        }
    }

    pub fn next_chapter(&mut self) {
        let position = self.position().clone();
        match self.chapter_after(&position) {
            Some((book, chapter)) => {
                let verse = self.first_verse_of(&book, &chapter);
                self.goto(&book, &chapter, &verse);
            }
            None => self.at_boundary("마지막 장입니다."),
        }
    }

    pub fn prev_chapter(&mut self) {
        let position = self.position().clone();
        match self.chapter_before(&position) {
            Some((book, chapter)) => {
                let verse = self.first_verse_of(&book, &chapter);
                self.goto(&book, &chapter, &verse);
            }
            None => self.at_boundary("첫 장입니다."),
        }
    }

    fn at_boundary(&mut self, message: &str) {
        if self.store.is_empty() {
            let message = self.config.settings.no_data_message.clone();
            self.ui_state.set_message(message, MessageType::Error);
        } else {
            self.ui_state
                .set_message(message.to_string(), MessageType::Info);
        }
    }

    pub fn focus_references(&mut self) {
        if self.ui_state.references.is_empty() {
            let message = self.config.settings.no_refs_message.clone();
            self.ui_state.set_message(message, MessageType::Info);
        } else {
            self.ui_state.focus = Focus::References;
        }
    }

    pub fn select_next_reference(&mut self) {
        let len = self.ui_state.references.len();
        if len > 0 {
            self.ui_state.references_selected_index =
                (self.ui_state.references_selected_index + 1).min(len - 1);
        }
    }

    pub fn select_prev_reference(&mut self) {
        self.ui_state.references_selected_index =
            self.ui_state.references_selected_index.saturating_sub(1);
    }

    pub fn selected_reference(&self) -> Option<&ReferencePreview> {
        self.ui_state
            .references
            .get(self.ui_state.references_selected_index)
    }

    /// Jump to the highlighted cross-reference. A citation that does not
    /// parse leaves the position alone and shows a warning instead.
    pub fn follow_selected_reference(&mut self) {
        let Some(citation) = self.selected_reference().map(|entry| entry.citation.clone()) else {
            return;
        };

        if self.navigator.follow_reference(&citation).is_none() {
            self.ui_state.set_message(
                format!("관주를 해석할 수 없습니다: {}", citation),
                MessageType::Warning,
            );
            return;
        }

        self.ui_state.focus = Focus::Text;
        self.refresh_references();

        let position = self.position().clone();
        if self
            .store
            .get_text(&position.book, &position.chapter, &position.verse)
            .is_none()
        {
            self.ui_state.set_message(
                format!("본문에 없는 구절입니다: {}", position),
                MessageType::Warning,
            );
        }
    }

    pub fn open_book_picker(&mut self) {
        let books = self.store.books();
        if books.is_empty() {
            let message = self.config.settings.no_data_message.clone();
            self.ui_state.set_message(message, MessageType::Warning);
            return;
        }
        self.ui_state.picker = BookPicker::open(books, &self.position().book);
        self.ui_state.open_window(WindowType::Books);
    }

    /// Confirm the picker selection: a book first, then one of its chapters.
    pub fn confirm_picker(&mut self) {
        let current = self.position().clone();
        match self.ui_state.picker.stage {
            PickerStage::Book => {
                let Some(book) = self.ui_state.picker.selected_book().map(str::to_string) else {
                    self.ui_state.open_window(WindowType::Reader);
                    return;
                };
                self.navigator
                    .select_direct(&book, &current.chapter, &current.verse);
                let chapters = self.store.chapters_of(&book).unwrap_or_default();
                let chapter = self.position().chapter.clone();
                self.ui_state.picker.show_chapters(chapters, Some(&chapter));
                self.refresh_references();
            }
            PickerStage::Chapter => {
                let Some(chapter) = self.ui_state.picker.selected_chapter().map(str::to_string)
                else {
                    return;
                };
                self.navigator
                    .select_direct(&current.book, &chapter, &current.verse);
                self.refresh_references();
                self.ui_state.open_window(WindowType::Reader);
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.ui_state.message.is_some() && self.ui_state.active_window == WindowType::Reader {
            self.ui_state.clear_message();
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.ui_state.active_window {
            WindowType::Help => self.handle_help_mode_keys(key),
            WindowType::Books => self.handle_books_mode_keys(key),
            WindowType::Reader => match self.ui_state.focus {
                Focus::References => self.handle_references_keys(key),
                Focus::Text => self.handle_normal_mode_keys(key),
            },
        }
    }

    fn handle_normal_mode_keys(&mut self, key: KeyEvent) {
        let keymaps = self.config.keymaps.clone();
        let pressed = key_name(&key);
        let bound = |binding: &str| Keymaps::matches(binding, &pressed);

        if bound(&keymaps.quit) || key.code == KeyCode::Esc {
            self.should_quit = true;
        } else if bound(&keymaps.help) {
            self.ui_state.open_window(WindowType::Help);
        } else if bound(&keymaps.books) {
            self.open_book_picker();
        } else if bound(&keymaps.focus_references) {
            self.focus_references();
        } else if bound(&keymaps.next_verse) || key.code == KeyCode::Down {
            self.next_verse();
        } else if bound(&keymaps.prev_verse) || key.code == KeyCode::Up {
            self.prev_verse();
        } else if bound(&keymaps.next_chapter) || key.code == KeyCode::Right {
            self.next_chapter();
        } else if bound(&keymaps.prev_chapter) || key.code == KeyCode::Left {
            self.prev_chapter();
        }
    }

    fn handle_references_keys(&mut self, key: KeyEvent) {
        let keymaps = self.config.keymaps.clone();
        let pressed = key_name(&key);
        let bound = |binding: &str| Keymaps::matches(binding, &pressed);

        if key.code == KeyCode::Esc || bound(&keymaps.focus_references) {
            self.ui_state.focus = Focus::Text;
        } else if bound(&keymaps.follow) {
            self.follow_selected_reference();
        } else if bound(&keymaps.next_verse) || key.code == KeyCode::Down {
            self.select_next_reference();
        } else if bound(&keymaps.prev_verse) || key.code == KeyCode::Up {
            self.select_prev_reference();
        } else if bound(&keymaps.quit) {
            self.should_quit = true;
        } else if bound(&keymaps.help) {
            self.ui_state.open_window(WindowType::Help);
        } else if bound(&keymaps.books) {
            self.open_book_picker();
        }
    }

    fn handle_help_mode_keys(&mut self, key: KeyEvent) {
        let pressed = key_name(&key);
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter)
            || Keymaps::matches(&self.config.keymaps.quit, &pressed)
            || Keymaps::matches(&self.config.keymaps.help, &pressed)
        {
            self.ui_state.open_window(WindowType::Reader);
        }
    }

    fn handle_books_mode_keys(&mut self, key: KeyEvent) {
        let keymaps = self.config.keymaps.clone();
        let pressed = key_name(&key);
        let bound = |binding: &str| Keymaps::matches(binding, &pressed);

        if key.code == KeyCode::Esc || bound(&keymaps.quit) {
            if !self.ui_state.picker.back() {
                self.ui_state.open_window(WindowType::Reader);
            }
        } else if key.code == KeyCode::Enter || bound(&keymaps.follow) {
            self.confirm_picker();
        } else if bound(&keymaps.next_verse) || key.code == KeyCode::Down {
            self.ui_state.picker.next();
        } else if bound(&keymaps.prev_verse) || key.code == KeyCode::Up {
            self.ui_state.picker.previous();
        }
    }
}

/// UI-specific state management
#[derive(Debug, Clone)]
pub struct UiState {
    pub active_window: WindowType,
    pub focus: Focus,
    pub references: Vec<ReferencePreview>,
    pub references_selected_index: usize,
    pub picker: BookPicker,
    pub message: Option<String>,
    pub message_type: MessageType,
    pub message_time: Option<Instant>,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiState {
    pub fn new() -> Self {
        Self {
            active_window: WindowType::Reader,
            focus: Focus::Text,
            references: Vec::new(),
            references_selected_index: 0,
            picker: BookPicker::default(),
            message: None,
            message_type: MessageType::Info,
            message_time: None,
        }
    }

    pub fn set_message(&mut self, message: String, message_type: MessageType) {
        logging::debug(format!("status message: {}", message));
        self.message = Some(message);
        self.message_type = message_type;
        self.message_time = Some(Instant::now());
    }

    pub fn clear_message(&mut self) {
        self.message = None;
        self.message_time = None;
    }

    /// Returns true if the current message has expired (older than 3 seconds).
    pub fn message_expired(&self) -> bool {
        self.message_time
            .is_some_and(|t| t.elapsed() >= MESSAGE_TTL)
    }

    pub fn open_window(&mut self, window_type: WindowType) {
        if window_type == WindowType::Reader {
            self.picker = BookPicker::default();
        }
        self.active_window = window_type;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageType {
    Info,
    Warning,
    Error,
}

/// Key name as written in the `Keymap` section of the configuration.
pub fn key_name(key: &KeyEvent) -> String {
    match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "BackTab".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        other => format!("{:?}", other),
    }
}

/// Position of `current` among store keys, `"01"` matching `"1"`.
fn index_of(keys: &[String], current: &str) -> Option<usize> {
    keys.iter().position(|key| key == current).or_else(|| {
        let wanted = current.trim().parse::<u64>().ok()?;
        keys.iter()
            .position(|key| key.trim().parse::<u64>().ok() == Some(wanted))
    })
}

pub struct Reader {
    state: ApplicationState,
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl Reader {
    pub fn new(state: ApplicationState) -> eyre::Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self { state, terminal })
    }

    pub fn state(&self) -> &ApplicationState {
        &self.state
    }

    /// Run the main application loop
    pub fn run(&mut self) -> eyre::Result<()> {
        crossterm::terminal::enable_raw_mode()?;
        crossterm::execute!(io::stdout(), crossterm::terminal::EnterAlternateScreen)?;

        self.terminal.clear()?;
        self.terminal.hide_cursor()?;

        let result = self.event_loop();

        self.terminal.clear()?;
        self.terminal.show_cursor()?;
        crossterm::execute!(io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;
        crossterm::terminal::disable_raw_mode()?;

        logging::debug(format!("leaving reader at {}", self.state.position()));
        result
    }

    fn event_loop(&mut self) -> eyre::Result<()> {
        loop {
            if self.state.should_quit {
                return Ok(());
            }

            if self.state.ui_state.message_expired() {
                self.state.ui_state.clear_message();
            }

            let state = &self.state;
            self.terminal.draw(|frame| Self::render_static(frame, state))?;

            // Wake up in time to clear an expiring message.
            let poll_timeout = match self.state.ui_state.message_time {
                Some(t) => MESSAGE_TTL
                    .checked_sub(t.elapsed())
                    .unwrap_or(Duration::from_millis(100)),
                None => Duration::from_secs(60),
            };

            if !crossterm::event::poll(poll_timeout)? {
                continue;
            }

            match crossterm::event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.state.handle_key(key),
                _ => {}
            }
        }
    }

    fn render_static(frame: &mut Frame, state: &ApplicationState) {
        let frame_area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(frame_area);

        let position = state.position();
        let header = Self::build_header_line(APP_TITLE, &position.to_string(), chunks[0].width);
        frame.render_widget(Paragraph::new(Line::from(header)), chunks[0]);

        Self::render_columns(frame, chunks[1], state);

        let keymaps = &state.config.keymaps;
        let footer = format!(
            " {} 도움말  {} 성경 선택  {} 관주  {} 종료",
            keymaps.help, keymaps.books, keymaps.focus_references, keymaps.quit
        );
        frame.render_widget(
            Paragraph::new(footer).style(Style::default().fg(Color::DarkGray)),
            chunks[2],
        );

        match state.ui_state.active_window {
            WindowType::Help => HelpWindow::render(frame, frame_area, keymaps),
            WindowType::Books => BooksWindow::render(frame, frame_area, &state.ui_state.picker),
            WindowType::Reader => {}
        }

        if let Some(ref message) = state.ui_state.message {
            Self::render_message_static(frame, message, &state.ui_state.message_type);
        }
    }

    fn render_columns(frame: &mut Frame, area: Rect, state: &ApplicationState) {
        let settings = &state.config.settings;
        let text_ratio = u32::from(settings.text_column_ratio.max(1));
        let side_ratio = u32::from(settings.side_column_ratio.max(1));
        let total = text_ratio + side_ratio * 2;

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(text_ratio, total),
                Constraint::Ratio(side_ratio, total),
                Constraint::Ratio(side_ratio, total),
            ])
            .split(area);

        let position = state.position();
        let (verses, empty_message) = if state.store.is_empty() {
            (Vec::new(), settings.no_data_message.clone())
        } else {
            match state.store.chapter_text(&position.book, &position.chapter) {
                Ok(verses) => (verses, settings.no_data_message.clone()),
                Err(err) => (Vec::new(), err.to_string()),
            }
        };

        Board::new()
            .with_title(format!("{} {}장", position.book, position.chapter))
            .with_verses(verses)
            .with_selected_verse(position.verse.clone())
            .with_verse_numbers(settings.show_verse_numbers)
            .with_empty_message(empty_message)
            .with_focus(state.ui_state.focus == Focus::Text)
            .render(frame, columns[0]);

        ReferencesWindow::render(
            frame,
            columns[1],
            &position.key(),
            &state.ui_state.references,
            state.ui_state.references_selected_index,
            state.ui_state.focus == Focus::References,
            &settings.no_refs_message,
        );

        CommentaryWindow::render(
            frame,
            columns[2],
            state
                .store
                .commentary(&position.book, &position.chapter, &position.verse),
            &settings.no_commentary_message,
        );
    }

    /// Title on the left, `right_text` flush right, padded to `width` cells.
    fn build_header_line(title: &str, right_text: &str, width: u16) -> String {
        let width = width as usize;
        let used = textwrap::core::display_width(title) + textwrap::core::display_width(right_text);
        if used >= width {
            return format!("{} {}", title, right_text);
        }
        format!("{}{}{}", title, " ".repeat(width - used), right_text)
    }

    fn render_message_static(frame: &mut Frame, message: &str, message_type: &MessageType) {
        let color = match message_type {
            MessageType::Info => Color::Blue,
            MessageType::Warning => Color::Yellow,
            MessageType::Error => Color::Red,
        };

        let message_paragraph = Paragraph::new(message)
            .style(Style::default().fg(color))
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: true });

        let frame_area = frame.area();
        let area = Rect {
            x: frame_area.x + 2,
            y: frame_area.y + 2,
            width: frame_area.width.saturating_sub(4),
            height: 3.min(frame_area.height),
        };

        frame.render_widget(Clear, area);
        frame.render_widget(message_paragraph, area);
    }
}
