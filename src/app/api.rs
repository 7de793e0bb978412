//! API Facade for the application.
//!
//! This module exposes high-level functions that glue together context creation
//! and command execution.

use std::path::Path;

use chrono::Utc;

use crate::app::{
    AppContext,
    commands::{fetch, generate, plan},
    configuration,
};
use crate::services::{
    FilesystemPlanStore, GeminiImageGenerator, HttpScriptureSource, ObsWebSocketFactory,
};

pub use crate::app::commands::generate::{GenerateOptions, GenerateOutcome};
pub use crate::app::commands::replicate::ReplicationReport;
pub use crate::domain::{
    AppConfig, AppError, GeneratedImage, ScriptureReference, StudyItem, VerseRecord,
};

type DefaultContext = AppContext<
    HttpScriptureSource,
    ObsWebSocketFactory,
    FilesystemPlanStore,
    GeminiImageGenerator,
>;

fn create_context(config: AppConfig) -> Result<DefaultContext, AppError> {
    let scripture = HttpScriptureSource::new(&config.bible)?;
    let scenes = ObsWebSocketFactory::new(config.obs.clone());
    let plans = FilesystemPlanStore::from_home()?;
    let images = if config.images.enabled {
        Some(GeminiImageGenerator::new(&config.images)?)
    } else {
        None
    };
    Ok(AppContext::new(config, scripture, scenes, plans, images))
}

/// Load configuration from `path` or the default location, with `OBS_*` and
/// `GEMINI_API_KEY` overrides applied.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, AppError> {
    configuration::load_config(path)
}

/// Parse a human-entered reference such as `John 3:16-18`.
pub fn parse_reference(raw: &str) -> Result<ScriptureReference, AppError> {
    ScriptureReference::parse(raw)
}

/// Fetch and render the verses of `reference` without touching the scene system.
pub fn fetch_verses(config: &AppConfig, reference: &str) -> Result<Vec<VerseRecord>, AppError> {
    let source = HttpScriptureSource::new(&config.bible)?;
    fetch::fetch(&ScriptureReference::parse(reference)?, &source, &config.bible)
}

/// Generate verse scenes for a reference.
pub fn generate(config: AppConfig, options: &GenerateOptions) -> Result<GenerateOutcome, AppError> {
    let ctx = create_context(config)?;
    generate::execute(&ctx, options)
}

// =============================================================================
// Study Plan API
// =============================================================================

pub fn plan_add(reference: &str) -> Result<StudyItem, AppError> {
    plan::add(&FilesystemPlanStore::from_home()?, reference, Utc::now())
}

pub fn plan_list() -> Result<Vec<StudyItem>, AppError> {
    plan::list(&FilesystemPlanStore::from_home()?)
}

/// First pending plan item, if any.
pub fn plan_next() -> Result<Option<StudyItem>, AppError> {
    plan::next_pending(&FilesystemPlanStore::from_home()?)
}

pub fn plan_complete(reference: &str) -> Result<(), AppError> {
    plan::complete(&FilesystemPlanStore::from_home()?, reference, Utc::now())
}
