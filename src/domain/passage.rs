//! Chapter payloads from the scripture source and the per-verse records built from them.

use serde::Deserialize;
use serde_json::Value;

/// Top-level chapter document returned by the scripture API.
#[derive(Debug, Clone, Deserialize)]
pub struct ChapterPayload {
    pub chapter: ChapterBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChapterBody {
    pub content: Vec<ContentItem>,
}

/// One entry of a chapter's content stream (verse, heading, line break, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct ContentItem {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub number: Option<Value>,
    #[serde(default)]
    pub content: Vec<Value>,
}

impl ContentItem {
    pub fn is_verse(&self) -> bool {
        self.kind == "verse"
    }

    pub fn is_heading(&self) -> bool {
        self.kind == "heading"
    }

    /// Verse number, when present and a non-negative integer.
    pub fn verse_number(&self) -> Option<u32> {
        self.number.as_ref().and_then(Value::as_u64).and_then(|n| u32::try_from(n).ok())
    }

    /// Textual parts joined by single spaces, trimmed.
    ///
    /// Parts are either plain strings or objects carrying a `text` string; anything else
    /// (footnote markers, line breaks) is skipped.
    pub fn text(&self) -> String {
        let parts: Vec<&str> = self
            .content
            .iter()
            .filter_map(|part| match part {
                Value::String(text) => Some(text.as_str()),
                Value::Object(map) => map.get("text").and_then(Value::as_str),
                _ => None,
            })
            .filter(|text| !text.is_empty())
            .collect();
        parts.join(" ").trim().to_string()
    }
}

/// A single verse ready to be rendered into a scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseRecord {
    /// `Book C:V`.
    pub reference: String,
    pub verse: u32,
    /// Verse body as delivered, before wrapping.
    pub text: String,
    /// Header line plus the wrapped verse body.
    pub render_text: String,
    /// `Scripture-<bookId>-<chapter>:<verse>`.
    pub scene_name: String,
}

impl VerseRecord {
    pub fn scene_name_for(book_id: &str, chapter: u32, verse: u32) -> String {
        format!("Scripture-{book_id}-{chapter}:{verse}")
    }
}

/// Verses matched for a reference, plus the chapter heading that precedes them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Passage {
    pub title: Option<String>,
    pub verses: Vec<VerseRecord>,
}

impl Passage {
    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }

    /// Unwrapped verse bodies, one `[N] text` line per verse.
    pub fn plain_text(&self) -> String {
        self.verses
            .iter()
            .map(|verse| format!("[{}] {}", verse.verse, verse.text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
