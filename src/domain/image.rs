//! Illustration scenes: prompts suggested for a passage and the images generated from them.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::ScriptureReference;

/// One moment of a passage worth illustrating, as suggested by the prompt model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenePrompt {
    /// Verses the moment covers, e.g. `16` or `17-18`.
    pub verse_range: String,
    /// Short caption for the moment.
    pub description: String,
    /// Prompt handed to the image model.
    pub image_prompt: String,
}

/// An image saved for a plan item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub filename: String,
    pub verse_range: String,
    pub description: String,
}

/// A saved image waiting to be placed into its own scene.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSceneRequest {
    /// `Image-<bookId>-<chapter>:<start>-<end>-<n>`.
    pub scene_name: String,
    /// Absolute path handed to the image source.
    pub file_path: String,
    pub prompt: ScenePrompt,
}

impl ImageSceneRequest {
    pub fn scene_name_for(book_id: &str, reference: &ScriptureReference, number: usize) -> String {
        format!(
            "Image-{book_id}-{}:{}-{}-{number}",
            reference.chapter, reference.start_verse, reference.end_verse
        )
    }

    /// Settings object that points an image source at this request's file.
    pub fn file_settings(&self) -> Map<String, Value> {
        let mut settings = Map::new();
        settings.insert("file".to_string(), Value::String(self.file_path.clone()));
        settings
    }

    pub fn record(&self) -> GeneratedImage {
        GeneratedImage {
            filename: self.file_path.clone(),
            verse_range: self.prompt.verse_range.clone(),
            description: self.prompt.description.clone(),
        }
    }
}

/// Per-reference output directory, `<Book>_<C>_<S>-<E>` with spaces turned into `_`.
pub fn output_dir_name(reference: &ScriptureReference) -> String {
    format!(
        "{}_{}_{}-{}",
        reference.book.replace(' ', "_"),
        reference.chapter,
        reference.start_verse,
        reference.end_verse
    )
}

/// `img_<n>.png`, numbered from 1.
pub fn image_file_name(number: usize) -> String {
    format!("img_{number}.png")
}

/// Display form of an image path for plan records.
pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(raw: &str) -> ScriptureReference {
        ScriptureReference::parse(raw).unwrap()
    }

    #[test]
    fn output_dir_always_names_the_full_range() {
        assert_eq!(output_dir_name(&reference("1 Sam 23:1-5")), "1_Samuel_23_1-5");
        assert_eq!(output_dir_name(&reference("John 3:16")), "John_3_16-16");
    }

    #[test]
    fn scene_name_includes_range_and_number() {
        assert_eq!(
            ImageSceneRequest::scene_name_for("JHN", &reference("John 3:16-17"), 2),
            "Image-JHN-3:16-17-2"
        );
    }

    #[test]
    fn scene_prompts_parse_from_model_json() {
        let prompts: Vec<ScenePrompt> = serde_json::from_str(
            r#"[{"verse_range":"16","description":"God's Love","image_prompt":"sunrise over hills"}]"#,
        )
        .unwrap();
        assert_eq!(prompts[0].verse_range, "16");
        assert_eq!(prompts[0].description, "God's Love");
    }

    #[test]
    fn request_carries_file_setting_and_plan_record() {
        let request = ImageSceneRequest {
            scene_name: "Image-JHN-3:16-16-1".to_string(),
            file_path: "/tmp/out/img_1.png".to_string(),
            prompt: ScenePrompt {
                verse_range: "16".to_string(),
                description: "God's Love".to_string(),
                image_prompt: "sunrise".to_string(),
            },
        };
        let settings = request.file_settings();
        assert_eq!(settings.len(), 1);
        assert_eq!(settings["file"], "/tmp/out/img_1.png");
        assert_eq!(request.record().filename, "/tmp/out/img_1.png");
        assert_eq!(request.record().description, "God's Love");
    }
}
