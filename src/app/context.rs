use crate::domain::AppConfig;
use crate::ports::{ImageGenerator, PlanStore, SceneClientFactory, ScriptureSource};

/// Application context holding configuration and adapters for command execution.
pub struct AppContext<S: ScriptureSource, F: SceneClientFactory, P: PlanStore, G: ImageGenerator> {
    config: AppConfig,
    scripture: S,
    scenes: F,
    plans: P,
    images: Option<G>,
}

impl<S, F, P, G> AppContext<S, F, P, G>
where
    S: ScriptureSource,
    F: SceneClientFactory,
    P: PlanStore,
    G: ImageGenerator,
{
    pub fn new(config: AppConfig, scripture: S, scenes: F, plans: P, images: Option<G>) -> Self {
        Self { config, scripture, scenes, plans, images }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a reference to the scripture source.
    pub fn scripture(&self) -> &S {
        &self.scripture
    }

    /// Get a reference to the scene client factory.
    pub fn scenes(&self) -> &F {
        &self.scenes
    }

    /// Get a reference to the study plan store.
    pub fn plans(&self) -> &P {
        &self.plans
    }

    /// Illustration generator; `None` when illustrations are disabled.
    pub fn images(&self) -> Option<&G> {
        self.images.as_ref()
    }
}
