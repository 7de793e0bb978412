use std::sync::{Arc, Mutex};

use crate::domain::{AppError, ChapterPayload};
use crate::ports::ScriptureSource;

/// Serves one canned chapter and records what was requested.
#[derive(Clone)]
pub struct FakeScriptureSource {
    pub payload: Option<ChapterPayload>,
    pub requests: Arc<Mutex<Vec<(String, u32)>>>,
}

impl FakeScriptureSource {
    pub fn new(payload_json: serde_json::Value) -> Self {
        Self {
            payload: Some(serde_json::from_value(payload_json).unwrap()),
            requests: Arc::new(Mutex::new(vec![])),
        }
    }

    /// A source whose every fetch fails.
    pub fn unavailable() -> Self {
        Self { payload: None, requests: Arc::new(Mutex::new(vec![])) }
    }

    /// John 3 with a heading before verse 16 and a line break item.
    pub fn john_3() -> Self {
        Self::new(serde_json::json!({
            "chapter": {"content": [
                {"type": "heading", "content": ["Jesus and Nicodemus"]},
                {"type": "verse", "number": 15, "content": ["that everyone who believes in Him may have eternal life."]},
                {"type": "heading", "content": ["For God So Loved the World"]},
                {"type": "verse", "number": 16, "content": [
                    "For God so loved the world that He gave His one and only Son,",
                    {"noteId": 7},
                    "that everyone who believes in Him shall not perish but have eternal life."
                ]},
                {"type": "line_break"},
                {"type": "verse", "number": 17, "content": [{"text": "For God did not send His Son into the world to condemn the world,"}, "but to save the world through Him."]}
            ]}
        }))
    }

    pub fn requests(&self) -> Vec<(String, u32)> {
        self.requests.lock().unwrap().clone()
    }
}

impl ScriptureSource for FakeScriptureSource {
    fn fetch_chapter(&self, book_id: &str, chapter: u32) -> Result<ChapterPayload, AppError> {
        self.requests.lock().unwrap().push((book_id.to_string(), chapter));
        self.payload
            .clone()
            .ok_or_else(|| AppError::Api(format!("{book_id} {chapter} unavailable")))
    }
}
