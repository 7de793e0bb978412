//! Illustration generation port definition.

use crate::domain::{AppError, ScenePrompt};

/// Port for the model that suggests and renders illustrations of a passage.
pub trait ImageGenerator {
    /// Suggest the moments of `passage_text` worth illustrating.
    fn scene_prompts(&self, passage_text: &str) -> Result<Vec<ScenePrompt>, AppError>;

    /// Render `prompt` and return the encoded image bytes.
    fn generate_image(&self, prompt: &str) -> Result<Vec<u8>, AppError>;
}
