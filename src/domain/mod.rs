pub mod configuration;
pub mod error;
pub mod image;
pub mod passage;
pub mod plan;
pub mod reference;
pub mod scene;
pub mod text_wrap;

pub use configuration::{AppConfig, BibleApiConfig, ImageConfig, ObsConfig, TemplateConfig};
pub use error::AppError;
pub use image::{GeneratedImage, ImageSceneRequest, ScenePrompt};
pub use passage::{ChapterPayload, ContentItem, Passage, VerseRecord};
pub use plan::{PlanStatus, StudyItem, StudyPlan};
pub use reference::{BookCatalog, ScriptureReference};
pub use scene::{
    InputSettings, SceneExistenceIndex, SceneItem, SceneItemId, SceneItemTransform,
    TemplateSceneItem,
};
