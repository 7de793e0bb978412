mod image_generator;
mod plan_store;
mod scene_client;
mod scripture_source;

pub use image_generator::ImageGenerator;
pub use plan_store::PlanStore;
pub use scene_client::{SceneClient, SceneClientFactory};
pub use scripture_source::ScriptureSource;
