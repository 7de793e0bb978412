//! Scene-composition client port definition.

use serde_json::{Map, Value};

use crate::domain::{AppError, InputSettings, SceneItem, SceneItemId, SceneItemTransform};

/// Port for the scene-composition control channel. Every call is a blocking RPC.
pub trait SceneClient {
    /// Names of all scenes in the current collection.
    fn get_scene_list(&mut self) -> Result<Vec<String>, AppError>;

    fn get_input_settings(&mut self, input_name: &str) -> Result<InputSettings, AppError>;

    /// Apply `settings` to an input; with `overlay` unspecified keys are left untouched.
    fn set_input_settings(
        &mut self,
        input_name: &str,
        settings: &Map<String, Value>,
        overlay: bool,
    ) -> Result<(), AppError>;

    /// Items of a scene, in scene order.
    fn get_scene_item_list(&mut self, scene_name: &str) -> Result<Vec<SceneItem>, AppError>;

    fn get_scene_item_transform(
        &mut self,
        scene_name: &str,
        item_id: SceneItemId,
    ) -> Result<SceneItemTransform, AppError>;

    fn set_scene_item_transform(
        &mut self,
        scene_name: &str,
        item_id: SceneItemId,
        transform: &SceneItemTransform,
    ) -> Result<(), AppError>;

    fn create_scene(&mut self, scene_name: &str) -> Result<(), AppError>;

    /// Create a new input and place it, enabled, in `scene_name`.
    fn create_input(
        &mut self,
        scene_name: &str,
        input_name: &str,
        input_kind: &str,
        settings: &Map<String, Value>,
    ) -> Result<(), AppError>;

    /// Copy an item of `scene_name` into `destination_scene`, transform included.
    fn duplicate_scene_item(
        &mut self,
        scene_name: &str,
        item_id: SceneItemId,
        destination_scene: &str,
    ) -> Result<SceneItemId, AppError>;

    fn get_scene_item_id(
        &mut self,
        scene_name: &str,
        source_name: &str,
    ) -> Result<SceneItemId, AppError>;

    fn get_scene_collection_list(&mut self) -> Result<Vec<String>, AppError>;

    fn get_current_scene_collection(&mut self) -> Result<String, AppError>;

    fn set_current_scene_collection(&mut self, collection_name: &str) -> Result<(), AppError>;

    fn create_scene_collection(&mut self, collection_name: &str) -> Result<(), AppError>;

    fn set_current_program_scene(&mut self, scene_name: &str) -> Result<(), AppError>;

    /// Release the session. Further calls fail.
    fn disconnect(&mut self) -> Result<(), AppError>;
}

/// Factory producing connected scene clients.
pub trait SceneClientFactory {
    /// Make a single connection attempt.
    fn connect(&self) -> Result<Box<dyn SceneClient>, AppError>;
}
