use serde::{Deserialize, Serialize};

pub const DEFAULT_BIBLE_DATA_FILE: &str = "bible_data.json";
pub const DEFAULT_REFS_DATA_FILE: &str = "bible_refs.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Verse store JSON. Relative paths resolve against the working directory.
    pub bible_data_path: String,
    pub refs_data_path: String,
    pub show_verse_numbers: bool,
    /// Width ratio of the chapter text column against each side column.
    pub text_column_ratio: u16,
    pub side_column_ratio: u16,
    pub no_data_message: String,
    pub no_refs_message: String,
    pub no_commentary_message: String,
}

impl Settings {
    pub fn merge(&mut self, other: Self) {
        self.bible_data_path = other.bible_data_path;
        self.refs_data_path = other.refs_data_path;
        self.show_verse_numbers = other.show_verse_numbers;
        self.text_column_ratio = other.text_column_ratio;
        self.side_column_ratio = other.side_column_ratio;
        if !other.no_data_message.is_empty() {
            self.no_data_message = other.no_data_message;
        }
        if !other.no_refs_message.is_empty() {
            self.no_refs_message = other.no_refs_message;
        }
        if !other.no_commentary_message.is_empty() {
            self.no_commentary_message = other.no_commentary_message;
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bible_data_path: DEFAULT_BIBLE_DATA_FILE.to_string(),
            refs_data_path: DEFAULT_REFS_DATA_FILE.to_string(),
            show_verse_numbers: true,
            text_column_ratio: 2,
            side_column_ratio: 1,
            no_data_message: "본문 데이터가 없습니다.".to_string(),
            no_refs_message: "등록된 관주 데이터가 없습니다.".to_string(),
            no_commentary_message: "주석 데이터가 준비되지 않았습니다.".to_string(),
        }
    }
}

/// User-facing key bindings, one key name per action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Keymaps {
    pub next_verse: String,
    pub prev_verse: String,
    pub next_chapter: String,
    pub prev_chapter: String,
    pub books: String,
    pub focus_references: String,
    pub follow: String,
    pub help: String,
    pub quit: String,
}

impl Default for Keymaps {
    fn default() -> Self {
        Self {
            next_verse: "j".to_string(),
            prev_verse: "k".to_string(),
            next_chapter: "L".to_string(),
            prev_chapter: "H".to_string(),
            books: "t".to_string(),
            focus_references: "Tab".to_string(),
            follow: "Enter".to_string(),
            help: "?".to_string(),
            quit: "q".to_string(),
        }
    }
}

impl Keymaps {
    pub fn merge(&mut self, other: Self) {
        self.next_verse = other.next_verse;
        self.prev_verse = other.prev_verse;
        self.next_chapter = other.next_chapter;
        self.prev_chapter = other.prev_chapter;
        self.books = other.books;
        self.focus_references = other.focus_references;
        self.follow = other.follow;
        self.help = other.help;
        self.quit = other.quit;
    }

    /// Whether a key name from the config matches a pressed key.
    ///
    /// Single characters compare exactly; longer names (`Enter`, `Tab`,
    /// `Esc`, `Space`) compare case-insensitively.
    pub fn matches(binding: &str, pressed: &str) -> bool {
        if binding.chars().count() == 1 {
            binding == pressed
        } else {
            binding.eq_ignore_ascii_case(pressed)
        }
    }
}
