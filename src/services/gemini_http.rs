//! Gemini `generateContent` client implementation using reqwest.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::domain::{AppError, ImageConfig, ScenePrompt};
use crate::ports::ImageGenerator;

const X_GOOG_API_KEY: &str = "X-Goog-Api-Key";

/// HTTP client for the Gemini text and image models.
#[derive(Clone)]
pub struct GeminiImageGenerator {
    api_key: String,
    base_url: Url,
    prompt_model: String,
    image_model: String,
    temperature: f32,
    client: Client,
}

impl std::fmt::Debug for GeminiImageGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiImageGenerator")
            .field("base_url", &self.base_url)
            .field("prompt_model", &self.prompt_model)
            .field("image_model", &self.image_model)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl GeminiImageGenerator {
    pub fn new(config: &ImageConfig) -> Result<Self, AppError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AppError::Configuration("GEMINI_API_KEY is not set".into()))?;
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            base_url: config.base_url.clone(),
            prompt_model: config.prompt_model.clone(),
            image_model: config.image_model.clone(),
            temperature: config.temperature,
            client,
        })
    }

    /// `<base>/models/<model>:generateContent`; a leading `models/` on the name is accepted.
    pub fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.as_str().trim_end_matches('/'),
            model.trim_start_matches("models/")
        )
    }

    fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<Candidate, AppError> {
        let url = self.endpoint(model);
        debug!(%url, "sending generateContent request");

        let response = self
            .client
            .post(&url)
            .header(X_GOOG_API_KEY, &self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .map_err(|e| AppError::ImageApi(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::ImageApi(format!(
                "{} returned status {}: {}",
                model,
                status.as_u16(),
                error_text.trim()
            )));
        }

        let body: GenerateContentResponse = response
            .json()
            .map_err(|e| AppError::ImageApi(format!("Failed to parse response: {}", e)))?;
        body.candidates
            .into_iter()
            .next()
            .ok_or_else(|| AppError::ImageApi(format!("{} returned no candidates", model)))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    fn text(prompt: String, generation_config: Option<GenerationConfig>) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: Some(prompt), inline_data: None }],
            }],
            generation_config,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    response_mime_type: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default)]
    mime_type: Option<String>,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

impl Candidate {
    fn parts(&self) -> &[Part] {
        self.content.as_ref().map(|content| content.parts.as_slice()).unwrap_or_default()
    }

    fn finish_reason(&self) -> &str {
        self.finish_reason.as_deref().unwrap_or("UNSPECIFIED")
    }
}

fn scene_prompt_request(passage_text: &str) -> String {
    format!(
        "Read the bible passage below and pick one to three key moments or themes that would \
         work as illustrations.\n\
         Answer with a JSON array. Each element is an object with three string fields:\n\
         - \"verse_range\": the verse or verses it covers, e.g. \"16\" or \"17-18\".\n\
         - \"description\": a 3-5 word caption, e.g. \"God's Love for the World\".\n\
         - \"image_prompt\": a detailed prompt for an image model describing the scene, mood, \
         style and composition.\n\n\
         Passage:\n---\n{passage_text}\n---\n"
    )
}

impl ImageGenerator for GeminiImageGenerator {
    fn scene_prompts(&self, passage_text: &str) -> Result<Vec<ScenePrompt>, AppError> {
        let request = GenerateContentRequest::text(
            scene_prompt_request(passage_text),
            Some(GenerationConfig {
                temperature: self.temperature,
                response_mime_type: "application/json".to_string(),
            }),
        );
        let candidate = self.generate_content(&self.prompt_model, &request)?;
        let text = candidate
            .parts()
            .iter()
            .find_map(|part| part.text.as_deref())
            .ok_or_else(|| AppError::ImageApi("Prompt response contained no text".into()))?;

        let prompts: Vec<ScenePrompt> = serde_json::from_str(text)
            .map_err(|e| AppError::ImageApi(format!("Failed to parse scene prompts: {}", e)))?;
        info!(prompts = prompts.len(), "received scene prompts");
        Ok(prompts)
    }

    fn generate_image(&self, prompt: &str) -> Result<Vec<u8>, AppError> {
        let request = GenerateContentRequest::text(prompt.to_string(), None);
        let candidate = self.generate_content(&self.image_model, &request)?;
        if candidate.finish_reason() == "SAFETY" {
            return Err(AppError::ImageApi("Image generation was blocked by safety filters".into()));
        }

        let inline = candidate
            .parts()
            .iter()
            .find_map(|part| part.inline_data.as_ref())
            .ok_or_else(|| {
                AppError::ImageApi(format!(
                    "No image data in response (finish reason: {})",
                    candidate.finish_reason()
                ))
            })?;
        debug!(mime_type = inline.mime_type.as_deref().unwrap_or(""), "received image");
        STANDARD
            .decode(&inline.data)
            .map_err(|e| AppError::ImageApi(format!("Failed to decode image data: {}", e)))
    }
}
