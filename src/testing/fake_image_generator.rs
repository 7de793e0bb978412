use std::sync::{Arc, Mutex};

use crate::domain::{AppError, ScenePrompt};
use crate::ports::ImageGenerator;

/// Suggests canned prompts, renders `image for <prompt>` as the image bytes, and records both calls.
#[derive(Clone, Default)]
pub struct FakeImageGenerator {
    pub prompts: Option<Vec<ScenePrompt>>,
    pub failing_images: Arc<Mutex<Vec<String>>>,
    pub passage_texts: Arc<Mutex<Vec<String>>>,
    pub image_prompts: Arc<Mutex<Vec<String>>>,
}

impl FakeImageGenerator {
    /// One prompt per description, each covering verse 16, with image prompt `<description> prompt`.
    pub fn with_prompts(descriptions: &[&str]) -> Self {
        let prompts = descriptions
            .iter()
            .map(|description| ScenePrompt {
                verse_range: "16".to_string(),
                description: description.to_string(),
                image_prompt: format!("{description} prompt"),
            })
            .collect();
        Self { prompts: Some(prompts), ..Default::default() }
    }

    /// A generator whose prompt request fails.
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn fail_image(&self, image_prompt: &str) {
        self.failing_images.lock().unwrap().push(image_prompt.to_string());
    }

    pub fn passage_texts(&self) -> Vec<String> {
        self.passage_texts.lock().unwrap().clone()
    }

    pub fn image_prompts(&self) -> Vec<String> {
        self.image_prompts.lock().unwrap().clone()
    }
}

impl ImageGenerator for FakeImageGenerator {
    fn scene_prompts(&self, passage_text: &str) -> Result<Vec<ScenePrompt>, AppError> {
        self.passage_texts.lock().unwrap().push(passage_text.to_string());
        self.prompts.clone().ok_or_else(|| AppError::ImageApi("prompt model unavailable".into()))
    }

    fn generate_image(&self, prompt: &str) -> Result<Vec<u8>, AppError> {
        self.image_prompts.lock().unwrap().push(prompt.to_string());
        if self.failing_images.lock().unwrap().iter().any(|failing| failing == prompt) {
            return Err(AppError::ImageApi(
                "Image generation was blocked by safety filters".into(),
            ));
        }
        Ok(format!("image for {prompt}").into_bytes())
    }
}
