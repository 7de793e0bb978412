//! Scene-composition entities as seen through the control channel.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier the scene system assigns to an item placement within a scene.
pub type SceneItemId = i64;

/// An item of a scene, as listed by the scene system.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneItem {
    pub source_name: String,
    pub scene_item_id: SceneItemId,
}

/// The ordered items of the template scene.
pub type TemplateSceneItem = SceneItem;

/// Position/scale/bounds record of a scene item.
///
/// Only the bounds are interpreted; every other field is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneItemTransform {
    #[serde(default)]
    pub bounds_width: f64,
    #[serde(default)]
    pub bounds_height: f64,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl SceneItemTransform {
    /// Smallest bounds dimension the scene system accepts.
    pub const MIN_BOUND: f64 = 1.0;

    /// Raise any bounds dimension below [`Self::MIN_BOUND`] up to it.
    pub fn clamp_bounds(mut self) -> Self {
        if self.bounds_width < Self::MIN_BOUND {
            self.bounds_width = Self::MIN_BOUND;
        }
        if self.bounds_height < Self::MIN_BOUND {
            self.bounds_height = Self::MIN_BOUND;
        }
        self
    }
}

/// Kind and settings of an input (source).
#[derive(Debug, Clone, PartialEq)]
pub struct InputSettings {
    pub kind: String,
    pub settings: Map<String, Value>,
}

/// Settings object that sets only the `text` field of a text source.
pub fn text_settings(text: &str) -> Map<String, Value> {
    let mut settings = Map::new();
    settings.insert("text".to_string(), Value::String(text.to_string()));
    settings
}

/// Names of scenes present when the run started.
#[derive(Debug, Clone, Default)]
pub struct SceneExistenceIndex {
    names: HashSet<String>,
}

impl SceneExistenceIndex {
    pub fn contains(&self, scene_name: &str) -> bool {
        self.names.contains(scene_name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SceneExistenceIndex {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self { names: iter.into_iter().map(Into::into).collect() }
    }
}

/// Per-verse text source name: `<base>_<reference>` with spaces → `_` and colons → `-`.
pub fn unique_source_name(base: &str, reference: &str) -> String {
    format!("{base}_{}", reference.replace(' ', "_").replace(':', "-"))
}
