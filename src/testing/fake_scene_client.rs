use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use serde_json::{Map, Value};

use crate::domain::{AppError, InputSettings, SceneItem, SceneItemId, SceneItemTransform};
use crate::ports::{SceneClient, SceneClientFactory};

/// One call made against the fake, with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneCall {
    GetSceneList,
    GetInputSettings(String),
    SetInputSettings { input: String, settings: Map<String, Value>, overlay: bool },
    GetSceneItemList(String),
    GetSceneItemTransform { scene: String, item_id: SceneItemId },
    SetSceneItemTransform { scene: String, item_id: SceneItemId, transform: SceneItemTransform },
    CreateScene(String),
    CreateInput { scene: String, input: String, kind: String, settings: Map<String, Value> },
    DuplicateSceneItem { scene: String, item_id: SceneItemId, destination: String },
    GetSceneItemId { scene: String, source: String },
    GetSceneCollectionList,
    GetCurrentSceneCollection,
    SetCurrentSceneCollection(String),
    CreateSceneCollection(String),
    SetCurrentProgramScene(String),
    Disconnect,
}

#[derive(Debug, Default)]
pub struct FakeSceneState {
    pub scene_items: HashMap<String, Vec<SceneItem>>,
    pub scene_order: Vec<String>,
    pub inputs: HashMap<String, InputSettings>,
    pub transforms: HashMap<(String, SceneItemId), SceneItemTransform>,
    pub collections: Vec<String>,
    pub current_collection: String,
    pub program_scene: Option<String>,
    pub failing_scenes: HashSet<String>,
    pub calls: Vec<SceneCall>,
    next_item_id: SceneItemId,
}

/// In-memory scene system that records every call and mimics OBS rejections.
#[derive(Debug, Clone, Default)]
pub struct FakeSceneClient {
    pub state: Arc<Mutex<FakeSceneState>>,
}

pub const TEMPLATE_SCENE: &str = "Scripture-Template";
pub const TEXT_SOURCE: &str = "sTextScrolling";
pub const TEXT_KIND: &str = "text_ft2_source_v2";
pub const IMAGE_TEMPLATE_SCENE: &str = "ImageAndDiscussion";
pub const IMAGE_SOURCE: &str = "ScriptureIllustration";
pub const IMAGE_KIND: &str = "image_source";

impl FakeSceneClient {
    /// A scene system holding the standard template: a background plus the scrolling text.
    pub fn with_template() -> Self {
        let fake = Self::default();
        {
            let mut state = fake.state.lock().unwrap();
            state.next_item_id = 100;
            state.collections = vec!["Untitled".to_string(), "Daily-Template".to_string()];
            state.current_collection = "Untitled".to_string();
        }
        fake.add_scene(TEMPLATE_SCENE, &["Background", TEXT_SOURCE, "Logo"]);
        fake.add_input(TEXT_SOURCE, TEXT_KIND, serde_json::json!({"text": "template", "font": {"size": 64}}));
        fake.set_transform(
            TEMPLATE_SCENE,
            2,
            serde_json::json!({"positionX": 60.0, "positionY": 300.0, "boundsWidth": 0.0, "boundsHeight": 1400.0}),
        );
        fake
    }

    /// The standard template plus an illustration template around an image source.
    pub fn with_image_template() -> Self {
        let fake = Self::with_template();
        fake.add_scene(IMAGE_TEMPLATE_SCENE, &["Background", IMAGE_SOURCE, "Discussion"]);
        fake.add_input(IMAGE_SOURCE, IMAGE_KIND, serde_json::json!({"file": "/placeholder.png"}));
        fake.set_transform(
            IMAGE_TEMPLATE_SCENE,
            2,
            serde_json::json!({"positionX": 0.0, "boundsWidth": 1080.0, "boundsHeight": 1080.0}),
        );
        fake
    }

    /// Add a scene whose items get ids 1, 2, ... in order.
    pub fn add_scene(&self, name: &str, sources: &[&str]) {
        let mut state = self.state.lock().unwrap();
        let items = sources
            .iter()
            .enumerate()
            .map(|(index, source)| SceneItem {
                source_name: source.to_string(),
                scene_item_id: index as SceneItemId + 1,
            })
            .collect();
        state.scene_items.insert(name.to_string(), items);
        state.scene_order.push(name.to_string());
    }

    pub fn add_input(&self, name: &str, kind: &str, settings: Value) {
        let settings = match settings {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        self.state
            .lock()
            .unwrap()
            .inputs
            .insert(name.to_string(), InputSettings { kind: kind.to_string(), settings });
    }

    pub fn set_transform(&self, scene: &str, item_id: SceneItemId, transform: Value) {
        let transform: SceneItemTransform = serde_json::from_value(transform).unwrap();
        self.state.lock().unwrap().transforms.insert((scene.to_string(), item_id), transform);
    }

    /// Make `CreateScene` for this name fail.
    pub fn fail_scene(&self, name: &str) {
        self.state.lock().unwrap().failing_scenes.insert(name.to_string());
    }

    pub fn calls(&self) -> Vec<SceneCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count(&self, predicate: impl Fn(&SceneCall) -> bool) -> usize {
        self.calls().iter().filter(|call| predicate(call)).count()
    }

    pub fn input(&self, name: &str) -> Option<InputSettings> {
        self.state.lock().unwrap().inputs.get(name).cloned()
    }

    pub fn items_of(&self, scene: &str) -> Vec<SceneItem> {
        self.state.lock().unwrap().scene_items.get(scene).cloned().unwrap_or_default()
    }

    fn record(&self, call: SceneCall) -> std::sync::MutexGuard<'_, FakeSceneState> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        state
    }
}

fn not_found(request_type: &str, what: &str) -> AppError {
    AppError::SceneRequest {
        request_type: request_type.to_string(),
        code: 600,
        comment: Some(format!("No source was found by the name of `{what}`.")),
    }
}

impl SceneClient for FakeSceneClient {
    fn get_scene_list(&mut self) -> Result<Vec<String>, AppError> {
        let state = self.record(SceneCall::GetSceneList);
        Ok(state.scene_order.clone())
    }

    fn get_input_settings(&mut self, input_name: &str) -> Result<InputSettings, AppError> {
        let state = self.record(SceneCall::GetInputSettings(input_name.to_string()));
        state.inputs.get(input_name).cloned().ok_or_else(|| not_found("GetInputSettings", input_name))
    }

    fn set_input_settings(
        &mut self,
        input_name: &str,
        settings: &Map<String, Value>,
        overlay: bool,
    ) -> Result<(), AppError> {
        let mut state = self.record(SceneCall::SetInputSettings {
            input: input_name.to_string(),
            settings: settings.clone(),
            overlay,
        });
        let input =
            state.inputs.get_mut(input_name).ok_or_else(|| not_found("SetInputSettings", input_name))?;
        if !overlay {
            input.settings.clear();
        }
        input.settings.extend(settings.clone());
        Ok(())
    }

    fn get_scene_item_list(&mut self, scene_name: &str) -> Result<Vec<SceneItem>, AppError> {
        let state = self.record(SceneCall::GetSceneItemList(scene_name.to_string()));
        state.scene_items.get(scene_name).cloned().ok_or_else(|| not_found("GetSceneItemList", scene_name))
    }

    fn get_scene_item_transform(
        &mut self,
        scene_name: &str,
        item_id: SceneItemId,
    ) -> Result<SceneItemTransform, AppError> {
        let state = self.record(SceneCall::GetSceneItemTransform {
            scene: scene_name.to_string(),
            item_id,
        });
        state
            .transforms
            .get(&(scene_name.to_string(), item_id))
            .cloned()
            .ok_or_else(|| not_found("GetSceneItemTransform", scene_name))
    }

    fn set_scene_item_transform(
        &mut self,
        scene_name: &str,
        item_id: SceneItemId,
        transform: &SceneItemTransform,
    ) -> Result<(), AppError> {
        let mut state = self.record(SceneCall::SetSceneItemTransform {
            scene: scene_name.to_string(),
            item_id,
            transform: transform.clone(),
        });
        if transform.bounds_width < 1.0 || transform.bounds_height < 1.0 {
            return Err(AppError::SceneRequest {
                request_type: "SetSceneItemTransform".to_string(),
                code: 402,
                comment: Some("bounds must be at least 1.0".to_string()),
            });
        }
        state.transforms.insert((scene_name.to_string(), item_id), transform.clone());
        Ok(())
    }

    fn create_scene(&mut self, scene_name: &str) -> Result<(), AppError> {
        let mut state = self.record(SceneCall::CreateScene(scene_name.to_string()));
        if state.failing_scenes.contains(scene_name) || state.scene_items.contains_key(scene_name) {
            return Err(AppError::SceneRequest {
                request_type: "CreateScene".to_string(),
                code: 601,
                comment: Some("A source already exists by that scene name.".to_string()),
            });
        }
        state.scene_items.insert(scene_name.to_string(), Vec::new());
        state.scene_order.push(scene_name.to_string());
        Ok(())
    }

    fn create_input(
        &mut self,
        scene_name: &str,
        input_name: &str,
        input_kind: &str,
        settings: &Map<String, Value>,
    ) -> Result<(), AppError> {
        let mut state = self.record(SceneCall::CreateInput {
            scene: scene_name.to_string(),
            input: input_name.to_string(),
            kind: input_kind.to_string(),
            settings: settings.clone(),
        });
        if state.inputs.contains_key(input_name) {
            return Err(AppError::SceneRequest {
                request_type: "CreateInput".to_string(),
                code: 601,
                comment: Some("A source already exists by that input name.".to_string()),
            });
        }
        state.next_item_id += 1;
        let item = SceneItem { source_name: input_name.to_string(), scene_item_id: state.next_item_id };
        state
            .scene_items
            .get_mut(scene_name)
            .ok_or_else(|| not_found("CreateInput", scene_name))?
            .push(item);
        state.inputs.insert(
            input_name.to_string(),
            InputSettings { kind: input_kind.to_string(), settings: settings.clone() },
        );
        Ok(())
    }

    fn duplicate_scene_item(
        &mut self,
        scene_name: &str,
        item_id: SceneItemId,
        destination_scene: &str,
    ) -> Result<SceneItemId, AppError> {
        let mut state = self.record(SceneCall::DuplicateSceneItem {
            scene: scene_name.to_string(),
            item_id,
            destination: destination_scene.to_string(),
        });
        let source = state
            .scene_items
            .get(scene_name)
            .and_then(|items| items.iter().find(|item| item.scene_item_id == item_id))
            .cloned()
            .ok_or_else(|| not_found("DuplicateSceneItem", scene_name))?;
        state.next_item_id += 1;
        let new_id = state.next_item_id;
        state
            .scene_items
            .get_mut(destination_scene)
            .ok_or_else(|| not_found("DuplicateSceneItem", destination_scene))?
            .push(SceneItem { source_name: source.source_name, scene_item_id: new_id });
        Ok(new_id)
    }

    fn get_scene_item_id(
        &mut self,
        scene_name: &str,
        source_name: &str,
    ) -> Result<SceneItemId, AppError> {
        let state = self.record(SceneCall::GetSceneItemId {
            scene: scene_name.to_string(),
            source: source_name.to_string(),
        });
        state
            .scene_items
            .get(scene_name)
            .and_then(|items| items.iter().find(|item| item.source_name == source_name))
            .map(|item| item.scene_item_id)
            .ok_or_else(|| not_found("GetSceneItemId", source_name))
    }

    fn get_scene_collection_list(&mut self) -> Result<Vec<String>, AppError> {
        let state = self.record(SceneCall::GetSceneCollectionList);
        Ok(state.collections.clone())
    }

    fn get_current_scene_collection(&mut self) -> Result<String, AppError> {
        let state = self.record(SceneCall::GetCurrentSceneCollection);
        Ok(state.current_collection.clone())
    }

    fn set_current_scene_collection(&mut self, collection_name: &str) -> Result<(), AppError> {
        let mut state = self.record(SceneCall::SetCurrentSceneCollection(collection_name.to_string()));
        if !state.collections.iter().any(|name| name == collection_name) {
            return Err(not_found("SetCurrentSceneCollection", collection_name));
        }
        state.current_collection = collection_name.to_string();
        Ok(())
    }

    fn create_scene_collection(&mut self, collection_name: &str) -> Result<(), AppError> {
        let mut state = self.record(SceneCall::CreateSceneCollection(collection_name.to_string()));
        state.collections.push(collection_name.to_string());
        state.current_collection = collection_name.to_string();
        Ok(())
    }

    fn set_current_program_scene(&mut self, scene_name: &str) -> Result<(), AppError> {
        let mut state = self.record(SceneCall::SetCurrentProgramScene(scene_name.to_string()));
        if !state.scene_items.contains_key(scene_name) {
            return Err(not_found("SetCurrentProgramScene", scene_name));
        }
        state.program_scene = Some(scene_name.to_string());
        Ok(())
    }

    fn disconnect(&mut self) -> Result<(), AppError> {
        drop(self.record(SceneCall::Disconnect));
        Ok(())
    }
}

/// Factory that refuses a fixed number of connections before handing out the fake.
pub struct FakeSceneClientFactory {
    pub client: FakeSceneClient,
    refusals: Mutex<u32>,
    pub attempts: Mutex<u32>,
    terminal_error: Option<String>,
}

impl FakeSceneClientFactory {
    pub fn new(client: FakeSceneClient) -> Self {
        Self { client, refusals: Mutex::new(0), attempts: Mutex::new(0), terminal_error: None }
    }

    pub fn refusing(client: FakeSceneClient, refusals: u32) -> Self {
        Self { refusals: Mutex::new(refusals), ..Self::new(client) }
    }

    pub fn failing(message: &str) -> Self {
        Self { terminal_error: Some(message.to_string()), ..Self::new(FakeSceneClient::default()) }
    }

    pub fn attempts(&self) -> u32 {
        *self.attempts.lock().unwrap()
    }
}

impl SceneClientFactory for FakeSceneClientFactory {
    fn connect(&self) -> Result<Box<dyn SceneClient>, AppError> {
        *self.attempts.lock().unwrap() += 1;
        if let Some(message) = &self.terminal_error {
            return Err(AppError::Connection(message.clone()));
        }
        let mut refusals = self.refusals.lock().unwrap();
        if *refusals > 0 {
            *refusals -= 1;
            return Err(AppError::ConnectionRefused { address: "localhost:4455".to_string() });
        }
        Ok(Box::new(self.client.clone()))
    }
}
