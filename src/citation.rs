use thiserror::Error;

use crate::books::canonicalize;
use crate::models::Position;

/// Why a citation string could not be split into book, chapter and verse.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("citation has no ':' between chapter and verse")]
    MissingColon,
    #[error("citation has no chapter after the book name")]
    MissingChapter,
    #[error("citation verse does not start with a number")]
    InvalidVerse,
}

/// A parsed citation. `book` is still the alias as written in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub book: String,
    pub chapter: String,
    pub verse: String,
}

impl Citation {
    /// Resolve the book alias and turn the citation into a position.
    pub fn to_position(&self) -> Position {
        Position::new(canonicalize(&self.book), &self.chapter, &self.verse)
    }

    pub fn key(&self) -> String {
        format!("{} {}:{}", self.book, self.chapter, self.verse)
    }
}

/// Parse `"<book> <chapter>:<verse>[suffix]"`.
///
/// The book may contain spaces (`1 John 2:3`, `Song of Solomon 1:1`). Only
/// the first verse of a range survives: `John 3:16-18` parses as verse 16.
pub fn parse(citation: &str) -> Result<Citation, ParseError> {
    let (head, verse_part) = citation.rsplit_once(':').ok_or(ParseError::MissingColon)?;

    let head = head.trim();
    let (book, chapter) = head
        .rsplit_once(char::is_whitespace)
        .ok_or(ParseError::MissingChapter)?;
    let (book, chapter) = (book.trim(), chapter.trim());
    if book.is_empty() || chapter.is_empty() {
        return Err(ParseError::MissingChapter);
    }

    let verse_part = verse_part.trim();
    let digits = verse_part
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(verse_part.len());
    if digits == 0 {
        return Err(ParseError::InvalidVerse);
    }

    Ok(Citation {
        book: book.to_string(),
        chapter: chapter.to_string(),
        verse: verse_part[..digits].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn citation(book: &str, chapter: &str, verse: &str) -> Citation {
        Citation {
            book: book.to_string(),
            chapter: chapter.to_string(),
            verse: verse.to_string(),
        }
    }

    #[test]
    fn test_parse_strips_range_suffix() {
        assert_eq!(parse("John 3:16-18"), Ok(citation("John", "3", "16")));
    }

    #[test]
    fn test_parse_strips_letter_suffix() {
        assert_eq!(parse("창세기 2:4a"), Ok(citation("창세기", "2", "4")));
        assert_eq!(parse("Ps 23:1,3"), Ok(citation("Ps", "23", "1")));
    }

    #[test]
    fn test_parse_korean_abbreviation() {
        assert_eq!(parse("눅 1:1"), Ok(citation("눅", "1", "1")));
        assert_eq!(parse("Luk 1:1"), Ok(citation("Luk", "1", "1")));
    }

    #[test]
    fn test_parse_multi_word_book() {
        assert_eq!(parse("1 John 2:3"), Ok(citation("1 John", "2", "3")));
        assert_eq!(
            parse("Song of Solomon 1:1"),
            Ok(citation("Song of Solomon", "1", "1"))
        );
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse("  요한복음   3 :  16 "), Ok(citation("요한복음", "3", "16")));
    }

    #[test]
    fn test_parse_missing_colon() {
        assert_eq!(parse("Genesis 1"), Err(ParseError::MissingColon));
        assert_eq!(parse(""), Err(ParseError::MissingColon));
        assert_eq!(parse("not a citation"), Err(ParseError::MissingColon));
    }

    #[test]
    fn test_parse_missing_chapter() {
        assert_eq!(parse("Genesis:1"), Err(ParseError::MissingChapter));
        assert_eq!(parse("Genesis1:1"), Err(ParseError::MissingChapter));
        assert_eq!(parse(" 3:16"), Err(ParseError::MissingChapter));
    }

    #[test]
    fn test_parse_invalid_verse() {
        assert_eq!(parse("John 3:"), Err(ParseError::InvalidVerse));
        assert_eq!(parse("John 3:a16"), Err(ParseError::InvalidVerse));
        assert_eq!(parse("John 3:-16"), Err(ParseError::InvalidVerse));
    }

    #[test]
    fn test_parse_uses_last_colon() {
        assert_eq!(parse("Note: John 3:16"), Ok(citation("Note: John", "3", "16")));
    }

    #[test]
    fn test_citation_to_position_canonicalizes_book() {
        let position = parse("Luke 1:1").unwrap().to_position();
        assert_eq!(position, Position::new("누가복음", "1", "1"));

        let unknown = parse("Foo 2:3").unwrap().to_position();
        assert_eq!(unknown, Position::new("Foo", "2", "3"));
    }
}
