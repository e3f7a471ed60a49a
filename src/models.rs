use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_BOOK: &str = "창세기";
pub const FIRST_CHAPTER: &str = "1";
pub const FIRST_VERSE: &str = "1";

#[derive(Debug, Clone, PartialEq)]
pub enum WindowType {
    Reader,
    Help,
    Books,
}

impl Default for WindowType {
    fn default() -> Self {
        WindowType::Reader
    }
}

/// Which reader column receives list navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Text,
    References,
}

/// Where the reader currently is. Chapter and verse are kept as the literal
/// decimal strings used by the store and the cross-reference keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub book: String,
    pub chapter: String,
    pub verse: String,
}

impl Position {
    pub fn new(
        book: impl Into<String>,
        chapter: impl Into<String>,
        verse: impl Into<String>,
    ) -> Self {
        Self {
            book: book.into(),
            chapter: chapter.into(),
            verse: verse.into(),
        }
    }

    /// Cross-reference map key, e.g. `창세기 1:1`.
    pub fn key(&self) -> String {
        format!("{} {}:{}", self.book, self.chapter, self.verse)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(DEFAULT_BOOK, FIRST_CHAPTER, FIRST_VERSE)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}:{}", self.book, self.chapter, self.verse)
    }
}

/// A verse with annotations attached. Only `text` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedVerse {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comm: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One stored verse: either the bare text or a record carrying it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VerseRecord {
    PlainText(String),
    Annotated(AnnotatedVerse),
}

impl VerseRecord {
    pub fn text(&self) -> &str {
        match self {
            VerseRecord::PlainText(text) => text,
            VerseRecord::Annotated(verse) => &verse.text,
        }
    }

    pub fn commentary(&self) -> Option<&str> {
        match self {
            VerseRecord::PlainText(_) => None,
            VerseRecord::Annotated(verse) => verse.comm.as_deref(),
        }
    }
}

/// A cross-reference as shown next to the current verse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferencePreview {
    pub citation: String,
    /// Text of the first cited verse, empty when the citation did not resolve.
    pub preview_text: String,
}
