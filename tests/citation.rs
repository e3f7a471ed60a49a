use gwanju::books::canonicalize;
use gwanju::citation::{ParseError, parse};
use gwanju::models::Position;

#[test]
fn test_parse_then_canonicalize_korean_and_english() {
    let citation = parse("Luk 1:1").unwrap();
    assert_eq!(citation.book, "Luk");
    assert_eq!(canonicalize(&citation.book), "누가복음");
    assert_eq!(citation.to_position(), Position::new("누가복음", "1", "1"));

    let korean = parse("요 3:16").unwrap();
    assert_eq!(korean.to_position(), Position::new("요한복음", "3", "16"));
}

#[test]
fn test_parse_multi_word_books() {
    let first_john = parse("1 John 4:9").unwrap();
    assert_eq!(first_john.book, "1 John");
    assert_eq!(first_john.to_position().book, "요한일서");

    let song = parse("Song of Solomon 2:1").unwrap();
    assert_eq!(song.to_position(), Position::new("아가", "2", "1"));
}

#[test]
fn test_parse_keeps_only_first_verse_of_range() {
    assert_eq!(parse("Jn 1:3-4").unwrap().verse, "3");
    assert_eq!(parse("요한복음 3:16,18").unwrap().verse, "16");
    assert_eq!(parse("창세기 1:1a").unwrap().verse, "1");
}

#[test]
fn test_parse_failures() {
    assert_eq!(parse("broken citation"), Err(ParseError::MissingColon));
    assert_eq!(parse("창세기:1"), Err(ParseError::MissingChapter));
    assert_eq!(parse(" 1:1"), Err(ParseError::MissingChapter));
    assert_eq!(parse("창세기 1:"), Err(ParseError::InvalidVerse));
    assert_eq!(parse("창세기 1:a"), Err(ParseError::InvalidVerse));
}

#[test]
fn test_unknown_book_passes_through() {
    let citation = parse("Tobit 1:1").unwrap();
    assert_eq!(citation.to_position(), Position::new("Tobit", "1", "1"));
}
