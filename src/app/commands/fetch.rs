//! Turn a parsed reference into render-ready verse records.

use tracing::debug;

use crate::domain::text_wrap::wrap;
use crate::domain::{
    AppError, BibleApiConfig, BookCatalog, Passage, ScriptureReference, VerseRecord,
};
use crate::ports::ScriptureSource;

/// Fetch the reference's chapter and keep the verses inside its range.
///
/// The passage title is the last heading that appears before the first matching verse.
pub fn fetch_passage<S: ScriptureSource + ?Sized>(
    reference: &ScriptureReference,
    source: &S,
    config: &BibleApiConfig,
) -> Result<Passage, AppError> {
    let book_id = BookCatalog::book_id(&reference.book)
        .ok_or_else(|| AppError::UnknownBook(reference.book.clone()))?;
    let payload = source.fetch_chapter(book_id, reference.chapter)?;

    let mut passage = Passage::default();
    let mut current_heading: Option<String> = None;

    for item in &payload.chapter.content {
        if item.is_heading() {
            let heading = item.text();
            if !heading.is_empty() {
                current_heading = Some(heading);
            }
            continue;
        }
        if !item.is_verse() {
            continue;
        }
        let Some(number) = item.verse_number() else {
            continue;
        };
        if number < reference.start_verse || number > reference.end_verse {
            continue;
        }

        if passage.verses.is_empty() {
            passage.title = current_heading.clone();
        }
        passage.verses.push(render_verse(reference, book_id, number, &item.text(), config));
    }

    debug!(
        reference = %reference,
        verses = passage.verses.len(),
        title = passage.title.as_deref().unwrap_or(""),
        "fetched passage"
    );
    Ok(passage)
}

/// Verse records only.
pub fn fetch<S: ScriptureSource + ?Sized>(
    reference: &ScriptureReference,
    source: &S,
    config: &BibleApiConfig,
) -> Result<Vec<VerseRecord>, AppError> {
    Ok(fetch_passage(reference, source, config)?.verses)
}

fn render_verse(
    reference: &ScriptureReference,
    book_id: &str,
    verse: u32,
    text: &str,
    config: &BibleApiConfig,
) -> VerseRecord {
    let header =
        format!("{} {}:{} ({})\n", reference.book, reference.chapter, verse, config.translation);
    VerseRecord {
        reference: format!("{} {}:{}", reference.book, reference.chapter, verse),
        verse,
        text: text.to_string(),
        render_text: format!("{header}{}", wrap(text, config.max_chars_per_line)),
        scene_name: VerseRecord::scene_name_for(book_id, reference.chapter, verse),
    }
}
