use std::collections::HashMap;
use std::sync::LazyLock;

/// One book of the 66-book canon and every spelling that should resolve to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookInfo {
    pub canonical: &'static str,
    pub english: &'static str,
    pub abbreviations: &'static [&'static str],
    pub korean_abbreviation: &'static str,
}

const fn book(
    canonical: &'static str,
    english: &'static str,
    abbreviations: &'static [&'static str],
    korean_abbreviation: &'static str,
) -> BookInfo {
    BookInfo {
        canonical,
        english,
        abbreviations,
        korean_abbreviation,
    }
}

/// Canonical book sequence, Genesis through Revelation.
pub const BOOKS: [BookInfo; 66] = [
    book("창세기", "Genesis", &["Gen", "Ge", "Gn"], "창"),
    book("출애굽기", "Exodus", &["Exo", "Exod", "Ex"], "출"),
    book("레위기", "Leviticus", &["Lev", "Le", "Lv"], "레"),
    book("민수기", "Numbers", &["Num", "Nu", "Nm"], "민"),
    book("신명기", "Deuteronomy", &["Deu", "Deut", "Dt"], "신"),
    book("여호수아", "Joshua", &["Jos", "Josh"], "수"),
    book("사사기", "Judges", &["Jdg", "Judg", "Jg"], "삿"),
    book("룻기", "Ruth", &["Rut", "Ru"], "룻"),
    book("사무엘상", "1 Samuel", &["1Sa", "1Sam", "1 Sam"], "삼상"),
    book("사무엘하", "2 Samuel", &["2Sa", "2Sam", "2 Sam"], "삼하"),
    book("열왕기상", "1 Kings", &["1Ki", "1Kgs", "1 Kgs"], "왕상"),
    book("열왕기하", "2 Kings", &["2Ki", "2Kgs", "2 Kgs"], "왕하"),
    book("역대상", "1 Chronicles", &["1Ch", "1Chr", "1 Chr"], "대상"),
    book("역대하", "2 Chronicles", &["2Ch", "2Chr", "2 Chr"], "대하"),
    book("에스라", "Ezra", &["Ezr"], "스"),
    book("느헤미야", "Nehemiah", &["Neh", "Ne"], "느"),
    book("에스더", "Esther", &["Est", "Esth"], "에"),
    book("욥기", "Job", &["Jb"], "욥"),
    book("시편", "Psalms", &["Psa", "Ps", "Psalm", "Pss"], "시"),
    book("잠언", "Proverbs", &["Pro", "Prov", "Pr"], "잠"),
    book("전도서", "Ecclesiastes", &["Ecc", "Eccl", "Qoh"], "전"),
    book("아가", "Song of Solomon", &["Sng", "Song", "SS", "Song of Songs"], "아"),
    book("이사야", "Isaiah", &["Isa", "Is"], "사"),
    book("예레미야", "Jeremiah", &["Jer", "Je"], "렘"),
    book("예레미야애가", "Lamentations", &["Lam", "La"], "애"),
    book("에스겔", "Ezekiel", &["Eze", "Ezek", "Ezk"], "겔"),
    book("다니엘", "Daniel", &["Dan", "Da", "Dn"], "단"),
    book("호세아", "Hosea", &["Hos", "Ho"], "호"),
    book("요엘", "Joel", &["Joe", "Jl"], "욜"),
    book("아모스", "Amos", &["Amo", "Am"], "암"),
    book("오바댜", "Obadiah", &["Oba", "Obad", "Ob"], "옵"),
    book("요나", "Jonah", &["Jon", "Jnh"], "욘"),
    book("미가", "Micah", &["Mic", "Mi"], "미"),
    book("나훔", "Nahum", &["Nah", "Na"], "나"),
    book("하박국", "Habakkuk", &["Hab"], "합"),
    book("스바냐", "Zephaniah", &["Zep", "Zeph"], "습"),
    book("학개", "Haggai", &["Hag"], "학"),
    book("스가랴", "Zechariah", &["Zec", "Zech"], "슥"),
    book("말라기", "Malachi", &["Mal"], "말"),
    book("마태복음", "Matthew", &["Mat", "Matt", "Mt"], "마"),
    book("마가복음", "Mark", &["Mar", "Mrk", "Mk"], "막"),
    book("누가복음", "Luke", &["Luk", "Lk"], "눅"),
    book("요한복음", "John", &["Joh", "Jhn", "Jn"], "요"),
    book("사도행전", "Acts", &["Act", "Ac"], "행"),
    book("로마서", "Romans", &["Rom", "Ro", "Rm"], "롬"),
    book("고린도전서", "1 Corinthians", &["1Co", "1Cor", "1 Cor"], "고전"),
    book("고린도후서", "2 Corinthians", &["2Co", "2Cor", "2 Cor"], "고후"),
    book("갈라디아서", "Galatians", &["Gal", "Ga"], "갈"),
    book("에베소서", "Ephesians", &["Eph"], "엡"),
    book("빌립보서", "Philippians", &["Php", "Phil"], "빌"),
    book("골로새서", "Colossians", &["Col"], "골"),
    book("데살로니가전서", "1 Thessalonians", &["1Th", "1Thess", "1 Thess"], "살전"),
    book("데살로니가후서", "2 Thessalonians", &["2Th", "2Thess", "2 Thess"], "살후"),
    book("디모데전서", "1 Timothy", &["1Ti", "1Tim", "1 Tim"], "딤전"),
    book("디모데후서", "2 Timothy", &["2Ti", "2Tim", "2 Tim"], "딤후"),
    book("디도서", "Titus", &["Tit"], "딛"),
    book("빌레몬서", "Philemon", &["Phm", "Phlm"], "몬"),
    book("히브리서", "Hebrews", &["Heb"], "히"),
    book("야고보서", "James", &["Jas", "Jam", "Jm"], "약"),
    book("베드로전서", "1 Peter", &["1Pe", "1Pet", "1 Pet"], "벧전"),
    book("베드로후서", "2 Peter", &["2Pe", "2Pet", "2 Pet"], "벧후"),
    book("요한일서", "1 John", &["1Jn", "1Jo", "1Joh"], "요일"),
    book("요한이서", "2 John", &["2Jn", "2Jo", "2Joh"], "요이"),
    book("요한삼서", "3 John", &["3Jn", "3Jo", "3Joh"], "요삼"),
    book("유다서", "Jude", &["Jud", "Jde"], "유"),
    book("요한계시록", "Revelation", &["Rev", "Re", "Rv"], "계"),
];

/// Lowercased alias -> canonical name. Canonical names map to themselves.
static ALIASES: LazyLock<HashMap<String, &'static str>> = LazyLock::new(|| {
    let mut aliases = HashMap::new();
    for info in BOOKS.iter() {
        aliases.insert(info.canonical.to_lowercase(), info.canonical);
        aliases.insert(info.english.to_lowercase(), info.canonical);
        aliases.insert(info.korean_abbreviation.to_lowercase(), info.canonical);
        for abbreviation in info.abbreviations {
            aliases.insert(abbreviation.to_lowercase(), info.canonical);
        }
    }
    aliases
});

/// Resolve any known spelling of a book to its canonical name.
///
/// Unknown names are returned unchanged, so callers can always use the
/// result as a store key.
pub fn canonicalize(alias: &str) -> &str {
    match ALIASES.get(&alias.trim().to_lowercase()) {
        Some(canonical) => *canonical,
        None => alias,
    }
}

/// Look up the table entry for a name in any recognized spelling.
pub fn book_info(name: &str) -> Option<&'static BookInfo> {
    let canonical = canonicalize(name);
    BOOKS.iter().find(|info| info.canonical == canonical)
}

/// English full name of a book, as used by the English cross-reference data.
pub fn english_name(name: &str) -> Option<&'static str> {
    book_info(name).map(|info| info.english)
}

/// Order the books present in a store for display.
///
/// Known books come first in canonical order; anything the table does not
/// know follows in the order it was given. Duplicates are collapsed.
pub fn ordered_book_list<I, S>(present: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let present: Vec<String> = present
        .into_iter()
        .map(|name| name.as_ref().to_string())
        .collect();

    let mut ordered: Vec<String> = BOOKS
        .iter()
        .filter(|info| present.iter().any(|name| name == info.canonical))
        .map(|info| info.canonical.to_string())
        .collect();

    for name in present {
        if !ordered.contains(&name) {
            ordered.push(name);
        }
    }

    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_all_spellings_of_luke() {
        assert_eq!(canonicalize("Luk"), "누가복음");
        assert_eq!(canonicalize("Luke"), "누가복음");
        assert_eq!(canonicalize("눅"), "누가복음");
        assert_eq!(canonicalize("누가복음"), "누가복음");
    }

    #[test]
    fn test_canonicalize_is_case_insensitive_for_english() {
        assert_eq!(canonicalize("john"), "요한복음");
        assert_eq!(canonicalize("GEN"), "창세기");
        assert_eq!(canonicalize("1 john"), "요한일서");
    }

    #[test]
    fn test_canonicalize_unknown_passes_through() {
        assert_eq!(canonicalize("XYZ"), "XYZ");
        assert_eq!(canonicalize(""), "");
    }

    #[test]
    fn test_canonicalize_is_idempotent() {
        for info in BOOKS.iter() {
            for alias in [info.canonical, info.english, info.korean_abbreviation]
                .into_iter()
                .chain(info.abbreviations.iter().copied())
            {
                let once = canonicalize(alias);
                assert_eq!(canonicalize(once), once, "alias {alias}");
            }
        }
        assert_eq!(canonicalize(canonicalize("Foo")), "Foo");
    }

    #[test]
    fn test_aliases_do_not_collide() {
        let mut seen: HashMap<String, &str> = HashMap::new();
        for info in BOOKS.iter() {
            for alias in [info.canonical, info.english, info.korean_abbreviation]
                .into_iter()
                .chain(info.abbreviations.iter().copied())
            {
                if let Some(previous) = seen.insert(alias.to_lowercase(), info.canonical) {
                    assert_eq!(previous, info.canonical, "alias {alias} is ambiguous");
                }
            }
        }
    }

    #[test]
    fn test_ordered_book_list_appends_unknown() {
        let ordered = ordered_book_list(["창세기", "누가복음", "Foo"]);
        assert_eq!(ordered, vec!["창세기", "누가복음", "Foo"]);
    }

    #[test]
    fn test_ordered_book_list_reorders_known_books() {
        let ordered = ordered_book_list(["Bar", "요한계시록", "Foo", "창세기", "출애굽기"]);
        assert_eq!(ordered, vec!["창세기", "출애굽기", "요한계시록", "Bar", "Foo"]);
    }

    #[test]
    fn test_ordered_book_list_empty() {
        let ordered = ordered_book_list(Vec::<String>::new());
        assert!(ordered.is_empty());
    }

    #[test]
    fn test_english_name() {
        assert_eq!(english_name("요한일서"), Some("1 John"));
        assert_eq!(english_name("Song"), Some("Song of Solomon"));
        assert_eq!(english_name("Foo"), None);
    }
}
