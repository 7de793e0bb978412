//! Application configuration domain models.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::AppError;

/// Configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Scripture API configuration.
    #[serde(default)]
    pub bible: BibleApiConfig,
    /// OBS WebSocket connection.
    #[serde(default)]
    pub obs: ObsConfig,
    /// Template scene layout.
    #[serde(default)]
    pub template: TemplateConfig,
    /// Generated illustration scenes.
    #[serde(default)]
    pub images: ImageConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.bible.validate()?;
        self.obs.validate()?;
        self.template.validate()?;
        self.images.validate()?;
        Ok(())
    }
}

/// Scripture API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BibleApiConfig {
    /// Translation root; chapters live at `<base_url>/<BookId>/<chapter>.json`.
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// Tag shown in each verse header, e.g. `BSB`.
    #[serde(default = "default_translation")]
    pub translation: String,
    /// Request timeout in seconds.
    #[serde(default = "default_bible_timeout")]
    pub timeout_secs: u64,
    /// Wrap width for verse bodies.
    #[serde(default = "default_max_chars_per_line")]
    pub max_chars_per_line: usize,
}

impl Default for BibleApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            translation: default_translation(),
            timeout_secs: default_bible_timeout(),
            max_chars_per_line: default_max_chars_per_line(),
        }
    }
}

impl BibleApiConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::InvalidConfig(
                "bible.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.max_chars_per_line == 0 {
            return Err(AppError::InvalidConfig(
                "bible.max_chars_per_line must be greater than 0".to_string(),
            ));
        }
        if self.translation.trim().is_empty() {
            return Err(AppError::InvalidConfig("bible.translation must not be empty".to_string()));
        }
        Ok(())
    }
}

fn default_base_url() -> Url {
    Url::parse("https://bible.helloao.org/api/BSB").expect("Default API URL must be valid")
}

fn default_translation() -> String {
    "BSB".to_string()
}

fn default_bible_timeout() -> u64 {
    30
}

fn default_max_chars_per_line() -> usize {
    50
}

/// OBS WebSocket connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObsConfig {
    #[serde(default = "default_obs_host")]
    pub host: String,
    #[serde(default = "default_obs_port")]
    pub port: u16,
    /// WebSocket server password; `None` when the server has authentication disabled.
    #[serde(default)]
    pub password: Option<String>,
    /// Connect and per-request timeout in seconds.
    #[serde(default = "default_obs_timeout")]
    pub timeout_secs: u64,
    /// Connect attempts made while OBS refuses connections.
    #[serde(default = "default_connect_attempts")]
    pub connect_attempts: u32,
    /// Fixed delay between connect attempts in milliseconds.
    #[serde(default = "default_connect_retry_delay_ms")]
    pub connect_retry_delay_ms: u64,
}

impl Default for ObsConfig {
    fn default() -> Self {
        Self {
            host: default_obs_host(),
            port: default_obs_port(),
            password: None,
            timeout_secs: default_obs_timeout(),
            connect_attempts: default_connect_attempts(),
            connect_retry_delay_ms: default_connect_retry_delay_ms(),
        }
    }
}

impl ObsConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.host.trim().is_empty() {
            return Err(AppError::InvalidConfig("obs.host must not be empty".to_string()));
        }
        if self.port == 0 {
            return Err(AppError::InvalidConfig("obs.port must be greater than 0".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(AppError::InvalidConfig(
                "obs.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.connect_attempts == 0 {
            return Err(AppError::InvalidConfig(
                "obs.connect_attempts must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.connect_retry_delay_ms)
    }
}

fn default_obs_host() -> String {
    "localhost".to_string()
}

fn default_obs_port() -> u16 {
    4455
}

fn default_obs_timeout() -> u64 {
    5
}

fn default_connect_attempts() -> u32 {
    5
}

fn default_connect_retry_delay_ms() -> u64 {
    2000
}

/// Template scene and the sources the run writes to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateConfig {
    /// Scene whose items are copied into each verse scene.
    #[serde(default = "default_template_scene")]
    pub scene_name: String,
    /// Scrolling text source within the template scene.
    #[serde(default = "default_text_source")]
    pub text_source_name: String,
    /// Scene collection that holds the template; switched to when not current.
    #[serde(default)]
    pub scene_collection: Option<String>,
    /// Shared text source receiving the passage title.
    #[serde(default)]
    pub title_source: Option<String>,
    /// Shared text source receiving the reference.
    #[serde(default)]
    pub reference_source: Option<String>,
    /// Make the first verse scene the program scene after the run.
    #[serde(default = "default_true")]
    pub activate_first_scene: bool,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            scene_name: default_template_scene(),
            text_source_name: default_text_source(),
            scene_collection: None,
            title_source: None,
            reference_source: None,
            activate_first_scene: default_true(),
        }
    }
}

impl TemplateConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.scene_name.trim().is_empty() {
            return Err(AppError::InvalidConfig(
                "template.scene_name must not be empty".to_string(),
            ));
        }
        if self.text_source_name.trim().is_empty() {
            return Err(AppError::InvalidConfig(
                "template.text_source_name must not be empty".to_string(),
            ));
        }
        for (key, value) in [
            ("scene_collection", &self.scene_collection),
            ("title_source", &self.title_source),
            ("reference_source", &self.reference_source),
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(AppError::InvalidConfig(format!("template.{key} must not be empty")));
            }
        }
        Ok(())
    }
}

fn default_template_scene() -> String {
    "Scripture-Template".to_string()
}

fn default_text_source() -> String {
    "sTextScrolling".to_string()
}

fn default_true() -> bool {
    true
}

/// Illustration scenes generated from the passage through the Gemini API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageConfig {
    /// Generate illustration scenes after the verse scenes.
    #[serde(default)]
    pub enabled: bool,
    /// Gemini API key; `GEMINI_API_KEY` overrides it.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_gemini_url")]
    pub base_url: Url,
    /// Text model that suggests the moments to illustrate.
    #[serde(default = "default_prompt_model")]
    pub prompt_model: String,
    #[serde(default = "default_image_model")]
    pub image_model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_image_timeout")]
    pub timeout_secs: u64,
    /// Images land in `<output_dir>/<Book>_<C>_<S>-<E>/`.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Scene whose items are copied into each illustration scene.
    #[serde(default = "default_image_template_scene")]
    pub template_scene: String,
    /// Image source within the image template scene.
    #[serde(default = "default_image_source")]
    pub image_source_name: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: None,
            base_url: default_gemini_url(),
            prompt_model: default_prompt_model(),
            image_model: default_image_model(),
            temperature: default_temperature(),
            timeout_secs: default_image_timeout(),
            output_dir: default_output_dir(),
            template_scene: default_image_template_scene(),
            image_source_name: default_image_source(),
        }
    }
}

impl ImageConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::InvalidConfig(
                "images.timeout_secs must be greater than 0".to_string(),
            ));
        }
        for (key, value) in [
            ("prompt_model", &self.prompt_model),
            ("image_model", &self.image_model),
            ("template_scene", &self.template_scene),
            ("image_source_name", &self.image_source_name),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::InvalidConfig(format!("images.{key} must not be empty")));
            }
        }
        if self.enabled && self.api_key.as_deref().is_none_or(|key| key.trim().is_empty()) {
            return Err(AppError::InvalidConfig(
                "images.api_key (or GEMINI_API_KEY) is required when images are enabled"
                    .to_string(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_gemini_url() -> Url {
    Url::parse("https://generativelanguage.googleapis.com/v1beta")
        .expect("Default Gemini URL must be valid")
}

fn default_prompt_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_image_model() -> String {
    "gemini-2.5-flash-image".to_string()
}

fn default_temperature() -> f32 {
    0.2
}

fn default_image_timeout() -> u64 {
    120
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_image_template_scene() -> String {
    "ImageAndDiscussion".to_string()
}

fn default_image_source() -> String {
    "ScriptureIllustration".to_string()
}
