use crate::citation;
use crate::logging;
use crate::models::{Position, ReferencePreview};
use crate::store::{CrossRefMap, VerseStore};

/// Resolves the cross-references of a verse into previewable entries.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    store: &'a VerseStore,
    refs: &'a CrossRefMap,
}

impl<'a> Resolver<'a> {
    pub fn new(store: &'a VerseStore, refs: &'a CrossRefMap) -> Self {
        Self { store, refs }
    }

    pub fn references_for(&self, book: &str, chapter: &str, verse: &str) -> Vec<ReferencePreview> {
        references_for(self.store, self.refs, book, chapter, verse)
    }

    pub fn references_at(&self, position: &Position) -> Vec<ReferencePreview> {
        self.references_for(&position.book, &position.chapter, &position.verse)
    }

    /// Text a single citation points at, if it parses and exists.
    pub fn preview(&self, citation: &str) -> Option<&'a str> {
        preview_text(self.store, citation)
    }
}

/// Cross-references recorded for `<book> <chapter>:<verse>`, in stored order.
///
/// The key is built from the values as given; only the citation targets go
/// through alias resolution. Entries that fail to resolve keep an empty
/// preview instead of being dropped.
pub fn references_for(
    store: &VerseStore,
    refs: &CrossRefMap,
    book: &str,
    chapter: &str,
    verse: &str,
) -> Vec<ReferencePreview> {
    let key = format!("{} {}:{}", book, chapter, verse);
    refs.get(&key)
        .iter()
        .map(|citation| ReferencePreview {
            citation: citation.clone(),
            preview_text: preview_text(store, citation)
                .map(str::to_string)
                .unwrap_or_default(),
        })
        .collect()
}

fn preview_text<'s>(store: &'s VerseStore, raw: &str) -> Option<&'s str> {
    let parsed = match citation::parse(raw) {
        Ok(parsed) => parsed,
        Err(err) => {
            logging::debug(format!("skipping preview for '{}': {}", raw, err));
            return None;
        }
    };
    let text = store.get_text(&parsed.book, &parsed.chapter, &parsed.verse);
    if text.is_none() {
        logging::debug(format!(
            "no verse text for cross-reference '{}' ({})",
            raw,
            parsed.to_position().key()
        ));
    }
    text
}
