use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::BookCatalog;
use crate::domain::AppError;

/// `[<digit>][ ]<letters>[ ]<chapter>:<start>[-<end>]`, applied after normalization.
static REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d?)\s*([a-z]+)\s*(\d+):(\d+)(?:-(\d+))?$").expect("reference pattern is valid")
});

/// A parsed verse range within one chapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptureReference {
    /// Canonical title-case book name. Not guaranteed to exist in the catalog.
    pub book: String,
    pub chapter: u32,
    pub start_verse: u32,
    pub end_verse: u32,
}

impl ScriptureReference {
    /// Parse a human-entered reference such as `John 3:16-17` or `1 Sam. 23:1`.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let normalized = raw.trim().to_lowercase().replace('.', "");
        let captures = REFERENCE_RE.captures(&normalized).ok_or_else(|| {
            AppError::invalid_reference(raw, "expected '<book> <chapter>:<verse>[-<verse>]'")
        })?;

        let prefix = captures.get(1).map_or("", |m| m.as_str());
        let letters = &captures[2];
        let book_token =
            if prefix.is_empty() { letters.to_string() } else { format!("{prefix} {letters}") };

        let book = match BookCatalog::resolve_alias(&book_token) {
            Some(canonical) => canonical.to_string(),
            None => title_case(&book_token),
        };

        let chapter = parse_number(raw, &captures[3], "chapter")?;
        let start_verse = parse_number(raw, &captures[4], "start verse")?;
        let end_verse = match captures.get(5) {
            Some(end) => parse_number(raw, end.as_str(), "end verse")?,
            None => start_verse,
        };

        if end_verse < start_verse {
            return Err(AppError::invalid_reference(
                raw,
                format!("end verse {end_verse} precedes start verse {start_verse}"),
            ));
        }

        Ok(Self { book, chapter, start_verse, end_verse })
    }

    pub fn is_single_verse(&self) -> bool {
        self.start_verse == self.end_verse
    }
}

impl fmt::Display for ScriptureReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:{}", self.book, self.chapter, self.start_verse)?;
        if !self.is_single_verse() {
            write!(f, "-{}", self.end_verse)?;
        }
        Ok(())
    }
}

fn parse_number(raw: &str, digits: &str, what: &str) -> Result<u32, AppError> {
    match digits.parse::<u32>() {
        Ok(0) => Err(AppError::invalid_reference(raw, format!("{what} must be at least 1"))),
        Ok(value) => Ok(value),
        Err(_) => Err(AppError::invalid_reference(raw, format!("{what} '{digits}' is out of range"))),
    }
}

/// Capitalize each space-separated word, leaving purely numeric words as-is.
fn title_case(token: &str) -> String {
    token
        .split(' ')
        .map(|word| {
            if word.chars().all(|c| c.is_ascii_digit()) {
                return word.to_string();
            }
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
