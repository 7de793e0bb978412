//! Scripture source port definition.

use crate::domain::{AppError, ChapterPayload};

/// Port for fetching whole chapters from a scripture API.
pub trait ScriptureSource {
    /// Fetch chapter `chapter` of the book with API identifier `book_id` (e.g. `JHN`).
    fn fetch_chapter(&self, book_id: &str, chapter: u32) -> Result<ChapterPayload, AppError>;
}
