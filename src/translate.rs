//! One-shot conversion of the English cross-reference dataset into the
//! Korean `bible_refs.json` the reader consumes.

use std::cmp::Reverse;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

use eyre::{Result, WrapErr};
use regex::{Captures, Regex};
use serde_json::{Map, Value};

use crate::books::{BOOKS, canonicalize};
use crate::logging;

pub const ENGLISH_REFS_URL: &str =
    "https://raw.githubusercontent.com/josephilipraja/bible-cross-reference-json/master/cross_references.json";

/// Alternation of English book names, longest first so `1 John` wins over `John`.
fn english_names_pattern() -> String {
    let mut names: Vec<&str> = BOOKS.iter().map(|info| info.english).collect();
    names.sort_by_key(|name| Reverse(name.len()));
    names
        .iter()
        .map(|name| regex::escape(name))
        .collect::<Vec<_>>()
        .join("|")
}

static KEY_BOOK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^({})\s+(\S.*)$", english_names_pattern()))
        .expect("key pattern is a valid regex")
});

static CITATION_BOOK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b({})\b", english_names_pattern()))
        .expect("citation pattern is a valid regex")
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Translation {
    pub refs: Map<String, Value>,
    pub translated: usize,
    pub skipped: usize,
}

/// `"Genesis 1:1"` -> `"창세기 1:1"`. Keys that do not start with a known
/// English book name are not translated.
pub fn translate_key(key: &str) -> Option<String> {
    let captures = KEY_BOOK.captures(key.trim())?;
    Some(format!("{} {}", canonicalize(&captures[1]), &captures[2]))
}

/// Replace every English book name inside a citation, leaving the rest
/// (chapter, verse ranges, unknown words) as written.
pub fn translate_citation(citation: &str) -> String {
    CITATION_BOOK
        .replace_all(citation, |captures: &Captures| canonicalize(&captures[1]).to_string())
        .into_owned()
}

pub fn translate_refs(english: &Map<String, Value>) -> Translation {
    let mut translation = Translation::default();

    for (key, value) in english {
        let Some(new_key) = translate_key(key) else {
            logging::debug(format!("skipping key with unknown book: {}", key));
            translation.skipped += 1;
            continue;
        };
        let citations: Vec<String> = match serde_json::from_value(value.clone()) {
            Ok(citations) => citations,
            Err(err) => {
                logging::warn(format!("skipping '{}': citations are not strings: {}", key, err));
                translation.skipped += 1;
                continue;
            }
        };

        let translated: Vec<Value> = citations
            .iter()
            .map(|citation| Value::String(translate_citation(citation)))
            .collect();
        translation.refs.insert(new_key, Value::Array(translated));
        translation.translated += 1;
    }

    translation
}

pub fn translate_file(input: &Path, output: &Path) -> Result<Translation> {
    let json = fs::read_to_string(input)
        .wrap_err_with(|| format!("could not read {}", input.display()))?;
    let english: Map<String, Value> = serde_json::from_str(&json)
        .wrap_err_with(|| format!("{} is not a JSON object", input.display()))?;

    let translation = translate_refs(&english);

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(output, serde_json::to_string_pretty(&translation.refs)?)
        .wrap_err_with(|| format!("could not write {}", output.display()))?;

    logging::info(format!(
        "translated {} keys ({} skipped) into {}",
        translation.translated,
        translation.skipped,
        output.display()
    ));
    Ok(translation)
}

/// Fetch the English dataset to `dest`.
pub fn download(url: &str, dest: &Path, timeout: Duration) -> Result<()> {
    let mut builder = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent("gwanju");
    if url.starts_with("http://127.0.0.1") || url.starts_with("http://localhost") {
        builder = builder.no_proxy();
    }
    let client = builder.build()?;

    let body = client.get(url).send()?.error_for_status()?.bytes()?;
    fs::write(dest, &body).wrap_err_with(|| format!("could not write {}", dest.display()))?;
    logging::info(format!("downloaded {} bytes to {}", body.len(), dest.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;

    #[test]
    fn translate_key_replaces_leading_book() {
        assert_eq!(translate_key("Genesis 1:1"), Some("창세기 1:1".to_string()));
        assert_eq!(translate_key("1 John 2:3"), Some("요한일서 2:3".to_string()));
        assert_eq!(
            translate_key("Song of Solomon 2:1"),
            Some("아가 2:1".to_string())
        );
    }

    #[test]
    fn translate_key_rejects_unknown_book() {
        assert_eq!(translate_key("Tobit 1:1"), None);
        assert_eq!(translate_key("Genesis"), None);
        assert_eq!(translate_key("Johnny 1:1"), None);
    }

    #[test]
    fn translate_citation_prefers_numbered_books() {
        assert_eq!(translate_citation("1 John 1:1"), "요한일서 1:1");
        assert_eq!(translate_citation("John 3:16-18"), "요한복음 3:16-18");
        assert_eq!(translate_citation("Tobit 1:1"), "Tobit 1:1");
    }

    #[test]
    fn translate_refs_counts_and_keeps_order() {
        let english: Map<String, Value> = serde_json::from_str(
            r#"{
                "Genesis 1:1": ["John 1:1", "Hebrews 11:3"],
                "Tobit 1:1": ["John 1:1"],
                "Exodus 3:14": "John 8:58",
                "Exodus 3:15": ["Matthew 22:32"]
            }"#,
        )
        .unwrap();

        let translation = translate_refs(&english);
        assert_eq!(translation.translated, 2);
        assert_eq!(translation.skipped, 2);
        let keys: Vec<&String> = translation.refs.keys().collect();
        assert_eq!(keys, vec!["창세기 1:1", "출애굽기 3:15"]);
        assert_eq!(
            translation.refs["창세기 1:1"],
            serde_json::json!(["요한복음 1:1", "히브리서 11:3"])
        );
    }

    #[test]
    fn translate_file_writes_korean_json() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("english_refs.json");
        let output = dir.path().join("out").join("bible_refs.json");
        fs::write(&input, r#"{"Luke 1:1": ["Acts 1:1"]}"#).unwrap();

        let translation = translate_file(&input, &output).unwrap();
        assert_eq!(translation.translated, 1);

        let written = fs::read_to_string(&output).unwrap();
        assert!(written.contains("누가복음 1:1"));
        assert!(written.contains("사도행전 1:1"));
    }

    #[test]
    fn download_writes_response_body() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let body = r#"{"Genesis 1:1": ["John 1:1"]}"#;

        let server = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            let mut line = String::new();
            while reader.read_line(&mut line).unwrap() > 0 {
                if line == "\r\n" {
                    break;
                }
                line.clear();
            }
            let mut stream = reader.into_inner();
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
        });

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("english_refs.json");
        download(
            &format!("http://{}/cross_references.json", addr),
            &dest,
            Duration::from_secs(5),
        )
        .unwrap();
        server.join().unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), body);
    }
}
