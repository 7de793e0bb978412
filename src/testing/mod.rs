mod fake_image_generator;
mod fake_scene_client;
mod fake_scripture_source;
mod memory_plan_store;

pub use fake_image_generator::FakeImageGenerator;
pub use fake_scene_client::{
    FakeSceneClient, FakeSceneClientFactory, IMAGE_KIND, IMAGE_SOURCE, IMAGE_TEMPLATE_SCENE,
    SceneCall, TEMPLATE_SCENE, TEXT_KIND, TEXT_SOURCE,
};
pub use fake_scripture_source::FakeScriptureSource;
pub use memory_plan_store::MemoryPlanStore;
