use std::cmp::Ordering;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use eyre::{Result, WrapErr};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::books::{canonicalize, ordered_book_list};
use crate::logging;
use crate::models::{Position, VerseRecord};

pub type Chapter = HashMap<String, VerseRecord>;
pub type Book = HashMap<String, Chapter>;

/// Raised when a book, chapter or verse is not in the store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotFound {
    #[error("book '{0}' is not in the verse store")]
    Book(String),
    #[error("chapter {chapter} of '{book}' is not in the verse store")]
    Chapter { book: String, chapter: String },
    #[error("verse {book} {chapter}:{verse} is not in the verse store")]
    Verse {
        book: String,
        chapter: String,
        verse: String,
    },
}

/// Nested `book -> chapter -> verse -> record` text store.
///
/// Books remember the order they were loaded in; chapters and verses are
/// always handed out in ascending numeric order.
#[derive(Debug, Clone, Default)]
pub struct VerseStore {
    books: HashMap<String, Book>,
    load_order: Vec<String>,
}

impl VerseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the `bible_data.json` layout.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let root: Map<String, Value> =
            serde_json::from_str(json).wrap_err("verse store must be a JSON object of books")?;

        let mut store = Self::new();
        for (name, value) in root {
            let book: Book = serde_json::from_value(value)
                .wrap_err_with(|| format!("malformed chapters for book '{}'", name))?;
            store.load_order.push(name.clone());
            store.books.insert(name, book);
        }
        Ok(store)
    }

    /// Load a verse store from disk. A missing file gives an empty store.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            logging::warn(format!("verse data file {} not found", path.display()));
            return Ok(Self::new());
        }
        let json = fs::read_to_string(path)
            .wrap_err_with(|| format!("could not read {}", path.display()))?;
        let store = Self::from_json_str(&json)
            .wrap_err_with(|| format!("could not parse {}", path.display()))?;
        logging::info(format!(
            "loaded {} books from {}",
            store.load_order.len(),
            path.display()
        ));
        Ok(store)
    }

    pub fn insert(
        &mut self,
        book: impl Into<String>,
        chapter: impl Into<String>,
        verse: impl Into<String>,
        record: VerseRecord,
    ) {
        let book = book.into();
        if !self.books.contains_key(&book) {
            self.load_order.push(book.clone());
        }
        self.books
            .entry(book)
            .or_default()
            .entry(chapter.into())
            .or_default()
            .insert(verse.into(), record);
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Book names in display order.
    pub fn books(&self) -> Vec<String> {
        ordered_book_list(&self.load_order)
    }

    fn book(&self, book: &str) -> Result<&Book, NotFound> {
        let canonical = canonicalize(book);
        self.books
            .get(canonical)
            .ok_or_else(|| NotFound::Book(canonical.to_string()))
    }

    fn chapter(&self, book: &str, chapter: &str) -> Result<&Chapter, NotFound> {
        find_key(self.book(book)?, chapter).ok_or_else(|| NotFound::Chapter {
            book: canonicalize(book).to_string(),
            chapter: chapter.to_string(),
        })
    }

    /// Full record for one verse.
    pub fn lookup(&self, book: &str, chapter: &str, verse: &str) -> Result<&VerseRecord, NotFound> {
        find_key(self.chapter(book, chapter)?, verse).ok_or_else(|| NotFound::Verse {
            book: canonicalize(book).to_string(),
            chapter: chapter.to_string(),
            verse: verse.to_string(),
        })
    }

    /// Verse text, whichever shape the record was stored in.
    pub fn get_text(&self, book: &str, chapter: &str, verse: &str) -> Option<&str> {
        self.lookup(book, chapter, verse)
            .ok()
            .map(VerseRecord::text)
    }

    /// Commentary attached to a verse, if its record carries one.
    pub fn commentary(&self, book: &str, chapter: &str, verse: &str) -> Option<&str> {
        self.lookup(book, chapter, verse)
            .ok()
            .and_then(VerseRecord::commentary)
    }

    pub fn chapters_of(&self, book: &str) -> Result<Vec<String>, NotFound> {
        Ok(sorted_keys(self.book(book)?))
    }

    pub fn verses_of(&self, book: &str, chapter: &str) -> Result<Vec<String>, NotFound> {
        Ok(sorted_keys(self.chapter(book, chapter)?))
    }

    /// Every verse of a chapter with its text, in verse order.
    pub fn chapter_text(&self, book: &str, chapter: &str) -> Result<Vec<(String, String)>, NotFound> {
        let verses = self.chapter(book, chapter)?;
        Ok(sorted_keys(verses)
            .into_iter()
            .map(|verse| {
                let text = verses[&verse].text().to_string();
                (verse, text)
            })
            .collect())
    }

    /// First book, chapter and verse in display order.
    pub fn first_position(&self) -> Option<Position> {
        let book = self.books().into_iter().next()?;
        let chapter = self.chapters_of(&book).ok()?.into_iter().next()?;
        let verse = self.verses_of(&book, &chapter).ok()?.into_iter().next()?;
        Some(Position::new(book, chapter, verse))
    }
}

/// Exact key first, then a key with the same numeric value (`"01"` for `"1"`).
fn find_key<'a, V>(map: &'a HashMap<String, V>, key: &str) -> Option<&'a V> {
    if let Some(value) = map.get(key) {
        return Some(value);
    }
    let wanted = key.trim().parse::<u64>().ok()?;
    map.iter()
        .find(|(candidate, _)| candidate.trim().parse::<u64>().ok() == Some(wanted))
        .map(|(_, value)| value)
}

fn sorted_keys<V>(map: &HashMap<String, V>) -> Vec<String> {
    let mut keys: Vec<String> = map.keys().cloned().collect();
    keys.sort_by(|a, b| numeric_order(a, b));
    keys
}

/// Numeric keys ascending, then any non-numeric keys lexically.
pub fn numeric_order(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<u64>(), b.trim().parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Read-only `"<book> <chapter>:<verse>" -> [citation, ...]` map.
#[derive(Debug, Clone, Default)]
pub struct CrossRefMap {
    entries: HashMap<String, Vec<String>>,
}

impl CrossRefMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: HashMap<String, Vec<String>> = serde_json::from_str(json)
            .wrap_err("cross-reference data must map keys to lists of citations")?;
        Ok(Self { entries })
    }

    /// Load `bible_refs.json`. A missing file gives an empty map.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            logging::warn(format!("cross-reference file {} not found", path.display()));
            return Ok(Self::new());
        }
        let json = fs::read_to_string(path)
            .wrap_err_with(|| format!("could not read {}", path.display()))?;
        let refs = Self::from_json_str(&json)
            .wrap_err_with(|| format!("could not parse {}", path.display()))?;
        logging::info(format!(
            "loaded {} cross-reference keys from {}",
            refs.len(),
            path.display()
        ));
        Ok(refs)
    }

    pub fn insert(&mut self, key: impl Into<String>, citations: Vec<String>) {
        self.entries.insert(key.into(), citations);
    }

    /// Citations for a key, in stored order. Unknown keys have none.
    pub fn get(&self, key: &str) -> &[String] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Vec<String>)> for CrossRefMap {
    fn from_iter<T: IntoIterator<Item = (String, Vec<String>)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
