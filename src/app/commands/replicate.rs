//! Template scene replication.
//!
//! Each target scene is either created from a template (every template item duplicated,
//! the designated source replaced by a per-scene copy) or, when a scene of that name already
//! existed at the start of the run, only has its per-scene settings refreshed. Verse scenes
//! overlay text on the scrolling text source; illustration scenes overlay the image file.

use serde_json::{Map, Value};
use tracing::{debug, error, info};

use crate::domain::scene::{text_settings, unique_source_name};
use crate::domain::{
    AppError, ImageSceneRequest, InputSettings, SceneExistenceIndex, TemplateConfig,
    TemplateSceneItem, VerseRecord,
};
use crate::ports::SceneClient;

/// Template state captured once per run.
#[derive(Debug, Clone)]
pub struct TemplateSnapshot {
    pub scene_name: String,
    /// Source copied per scene instead of duplicated.
    pub source_name: String,
    pub items: Vec<TemplateSceneItem>,
    pub source: InputSettings,
}

/// A scene to build from the template.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneTarget {
    pub scene_name: String,
    /// Suffix of the per-scene source name.
    pub label: String,
    /// Overlaid on the per-scene source.
    pub settings: Map<String, Value>,
}

impl From<&VerseRecord> for SceneTarget {
    fn from(verse: &VerseRecord) -> Self {
        Self {
            scene_name: verse.scene_name.clone(),
            label: verse.reference.clone(),
            settings: text_settings(&verse.render_text),
        }
    }
}

impl From<&ImageSceneRequest> for SceneTarget {
    fn from(request: &ImageSceneRequest) -> Self {
        Self {
            scene_name: request.scene_name.clone(),
            label: request.scene_name.clone(),
            settings: request.file_settings(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneOutcome {
    Created,
    Updated,
}

#[derive(Debug, Default)]
pub struct ReplicationReport {
    /// Scene names created this run, in target order.
    pub created: Vec<String>,
    /// Existing scene names whose settings were refreshed.
    pub updated: Vec<String>,
    /// One [`AppError::SceneOperation`] per failed scene.
    pub failures: Vec<AppError>,
}

impl ReplicationReport {
    pub fn total(&self) -> usize {
        self.created.len() + self.updated.len() + self.failures.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn succeeded(&self, scene_name: &str) -> bool {
        self.created.iter().chain(&self.updated).any(|done| done == scene_name)
    }

    /// `ReplicationIncomplete` when any scene failed.
    pub fn ensure_complete(&self) -> Result<(), AppError> {
        if self.is_complete() {
            Ok(())
        } else {
            let failed = self.failures.len();
            Err(AppError::ReplicationIncomplete { failed, total: self.total() })
        }
    }
}

pub struct SceneReplicator<'a, C: SceneClient + ?Sized> {
    client: &'a mut C,
    template: TemplateSnapshot,
    existing: SceneExistenceIndex,
}

impl<'a, C: SceneClient + ?Sized> SceneReplicator<'a, C> {
    /// Replicator for verse scenes built from the text template.
    pub fn prepare(client: &'a mut C, config: &TemplateConfig) -> Result<Self, AppError> {
        Self::for_template(client, &config.scene_name, &config.text_source_name)
    }

    /// Capture the scene list, the per-scene source and the items of `scene_name`.
    pub fn for_template(
        client: &'a mut C,
        scene_name: &str,
        source_name: &str,
    ) -> Result<Self, AppError> {
        let existing: SceneExistenceIndex = client.get_scene_list()?.into_iter().collect();
        let source = client.get_input_settings(source_name)?;
        let items = client.get_scene_item_list(scene_name)?;

        if !items.iter().any(|item| item.source_name == source_name) {
            return Err(AppError::TemplateSourceMissing {
                scene: scene_name.to_string(),
                source_name: source_name.to_string(),
            });
        }
        debug!(
            template = scene_name,
            scenes = existing.len(),
            template_items = items.len(),
            kind = %source.kind,
            "captured template"
        );

        Ok(Self {
            client,
            template: TemplateSnapshot {
                scene_name: scene_name.to_string(),
                source_name: source_name.to_string(),
                items,
                source,
            },
            existing,
        })
    }

    /// Replicate every target, continuing past failures.
    pub fn replicate_all(
        &mut self,
        targets: impl IntoIterator<Item = SceneTarget>,
    ) -> ReplicationReport {
        let mut report = ReplicationReport::default();
        for target in targets {
            match self.replicate(&target) {
                Ok(SceneOutcome::Created) => report.created.push(target.scene_name),
                Ok(SceneOutcome::Updated) => report.updated.push(target.scene_name),
                Err(err) => {
                    error!("{err}");
                    report.failures.push(err);
                }
            }
        }
        report
    }

    /// Create or refresh one scene.
    pub fn replicate(&mut self, target: &SceneTarget) -> Result<SceneOutcome, AppError> {
        let result = if self.existing.contains(&target.scene_name) {
            self.update_source(target).map(|_| SceneOutcome::Updated)
        } else {
            self.create_scene(target).map(|_| SceneOutcome::Created)
        };
        result.map_err(|source| AppError::SceneOperation {
            scene: target.scene_name.clone(),
            source: Box::new(source),
        })
    }

    fn update_source(&mut self, target: &SceneTarget) -> Result<(), AppError> {
        let source_name = unique_source_name(&self.template.source_name, &target.label);
        self.client.set_input_settings(&source_name, &target.settings, true)?;
        info!(scene = %target.scene_name, "refreshed scene source");
        Ok(())
    }

    fn create_scene(&mut self, target: &SceneTarget) -> Result<(), AppError> {
        let scene = target.scene_name.as_str();
        let source_name = unique_source_name(&self.template.source_name, &target.label);
        self.client.create_scene(scene)?;

        for item in &self.template.items {
            if item.source_name == self.template.source_name {
                self.client.create_input(
                    scene,
                    &source_name,
                    &self.template.source.kind,
                    &self.template.source.settings,
                )?;
                let transform = self
                    .client
                    .get_scene_item_transform(&self.template.scene_name, item.scene_item_id)?
                    .clamp_bounds();
                let new_item_id = self.client.get_scene_item_id(scene, &source_name)?;
                self.client.set_scene_item_transform(scene, new_item_id, &transform)?;
            } else {
                self.client.duplicate_scene_item(
                    &self.template.scene_name,
                    item.scene_item_id,
                    scene,
                )?;
            }
        }

        self.client.set_input_settings(&source_name, &target.settings, true)?;
        info!(scene, items = self.template.items.len(), "created scene from template");
        Ok(())
    }
}
