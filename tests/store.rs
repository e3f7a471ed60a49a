use std::path::Path;

use gwanju::store::{CrossRefMap, NotFound, VerseStore};

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_load_fixture_store() {
    let store = VerseStore::load(&fixture("bible_data.json")).unwrap();
    assert_eq!(store.books(), vec!["창세기", "요한복음", "히브리서"]);
    assert_eq!(store.chapters_of("창세기").unwrap(), vec!["1", "2"]);
    assert_eq!(store.verses_of("요한복음", "1").unwrap(), vec!["1", "3"]);
}

#[test]
fn test_plain_and_annotated_records() {
    let store = VerseStore::load(&fixture("bible_data.json")).unwrap();
    assert_eq!(
        store.get_text("창세기", "1", "1"),
        Some("태초에 하나님이 천지를 창조하시니라")
    );
    assert_eq!(
        store.get_text("창세기", "1", "3"),
        Some("하나님이 이르시되 빛이 있으라 하시니 빛이 있었고")
    );
    assert_eq!(store.commentary("창세기", "1", "1"), None);
    assert_eq!(store.commentary("요 ", "3", "16"), Some("복음의 요약"));
}

#[test]
fn test_lookup_reports_missing_level() {
    let store = VerseStore::load(&fixture("bible_data.json")).unwrap();
    assert_eq!(
        store.lookup("출애굽기", "1", "1"),
        Err(NotFound::Book("출애굽기".to_string()))
    );
    assert!(matches!(
        store.lookup("창세기", "50", "1"),
        Err(NotFound::Chapter { .. })
    ));
    assert!(matches!(
        store.lookup("창세기", "1", "99"),
        Err(NotFound::Verse { .. })
    ));
    assert_eq!(store.get_text("창세기", "1", "99"), None);
}

#[test]
fn test_numeric_chapter_order() {
    let store = VerseStore::from_json_str(
        r#"{"시편": {"1": {"1": "a"}, "10": {"1": "b"}, "2": {"1": "c"}, "9": {"1": "d"}}}"#,
    )
    .unwrap();
    assert_eq!(store.chapters_of("시편").unwrap(), vec!["1", "2", "9", "10"]);
}

#[test]
fn test_missing_files_load_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = VerseStore::load(&dir.path().join("bible_data.json")).unwrap();
    assert!(store.is_empty());
    assert!(store.first_position().is_none());

    let refs = CrossRefMap::load(&dir.path().join("bible_refs.json")).unwrap();
    assert!(refs.is_empty());
}

#[test]
fn test_malformed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bible_data.json");
    std::fs::write(&path, "[1, 2, 3]").unwrap();
    assert!(VerseStore::load(&path).is_err());
}

#[test]
fn test_load_fixture_refs() {
    let refs = CrossRefMap::load(&fixture("bible_refs.json")).unwrap();
    assert_eq!(refs.len(), 4);
    assert_eq!(refs.get("창세기 1:3"), ["고린도후서 4:6".to_string()]);
    assert!(refs.get("창세기 2:1").is_empty());
}
