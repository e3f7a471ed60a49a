use crate::citation;
use crate::logging;
use crate::models::{FIRST_CHAPTER, FIRST_VERSE, Position};
use crate::store::VerseStore;

/// Owns the reader's current position for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    position: Position,
}

impl Navigator {
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Start at the first verse of the store, or at Genesis 1:1 when empty.
    pub fn starting_at(store: &VerseStore) -> Self {
        Self::new(store.first_position().unwrap_or_default())
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Move to a position picked from the store's own keys.
    ///
    /// A new book resets chapter and verse to 1; a new chapter resets the
    /// verse to 1.
    pub fn select_direct(&mut self, book: &str, chapter: &str, verse: &str) -> &Position {
        if book != self.position.book {
            self.position = Position::new(book, FIRST_CHAPTER, FIRST_VERSE);
        } else if chapter != self.position.chapter {
            self.position.chapter = chapter.to_string();
            self.position.verse = FIRST_VERSE.to_string();
        } else {
            self.position.verse = verse.to_string();
        }
        &self.position
    }

    /// Jump to the verse a cross-reference citation points at.
    ///
    /// Unparseable citations leave the position untouched and return `None`.
    /// The target is not checked against the store.
    pub fn follow_reference(&mut self, raw: &str) -> Option<&Position> {
        match citation::parse(raw) {
            Ok(parsed) => {
                self.position = parsed.to_position();
                logging::debug(format!(
                    "followed '{}' ({}) to {}",
                    raw,
                    parsed.key(),
                    self.position
                ));
                Some(&self.position)
            }
            Err(err) => {
                logging::debug(format!("ignored reference '{}': {}", raw, err));
                None
            }
        }
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Position::default())
    }
}
