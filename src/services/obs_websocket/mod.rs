//! OBS WebSocket v5 client over a blocking tungstenite socket.

mod auth;
mod protocol;

use std::io::ErrorKind;
use std::net::{TcpStream, ToSocketAddrs};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use tracing::{debug, info};
use tungstenite::{Message, WebSocket};

use crate::domain::{
    AppError, InputSettings, ObsConfig, SceneItem, SceneItemId, SceneItemTransform,
};
use crate::ports::{SceneClient, SceneClientFactory};

pub use auth::authentication_string;
use protocol::{
    Frame, Hello, Identified, Identify, InputSettingsResponse, OP_HELLO, OP_IDENTIFIED,
    OP_IDENTIFY, OP_REQUEST, OP_REQUEST_RESPONSE, RPC_VERSION, Request, RequestResponse,
    SceneCollectionList, SceneItemIdResponse, SceneItemList, SceneItemTransformResponse,
    SceneList,
};

/// Connected OBS WebSocket session.
pub struct ObsWebSocketClient {
    address: String,
    socket: WebSocket<TcpStream>,
    next_request_id: u64,
    closed: bool,
}

impl std::fmt::Debug for ObsWebSocketClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObsWebSocketClient")
            .field("address", &self.address)
            .field("next_request_id", &self.next_request_id)
            .field("closed", &self.closed)
            .finish()
    }
}

impl ObsWebSocketClient {
    /// Open the socket and complete the Hello/Identify handshake.
    pub fn connect(config: &ObsConfig) -> Result<Self, AppError> {
        let address = config.address();
        let stream = open_stream(config, &address)?;

        let (socket, _response) = tungstenite::client(format!("ws://{}", address), stream)
            .map_err(|e| AppError::Connection(format!("WebSocket handshake failed: {}", e)))?;

        let mut client = Self { address, socket, next_request_id: 1, closed: false };
        client.identify(config.password.as_deref())?;
        info!(address = %client.address, "connected to OBS");
        Ok(client)
    }

    fn identify(&mut self, password: Option<&str>) -> Result<(), AppError> {
        let hello: Hello = loop {
            let frame = self.read_frame().map_err(handshake_error)?;
            if frame.op == OP_HELLO {
                break decode(frame.d).map_err(handshake_error)?;
            }
        };
        debug!(version = ?hello.obs_web_socket_version, rpc = hello.rpc_version, "received Hello");

        let authentication = match (&hello.authentication, password) {
            (Some(challenge), Some(password)) => {
                Some(authentication_string(password, &challenge.salt, &challenge.challenge))
            }
            (Some(_), None) => {
                return Err(AppError::Connection(
                    "OBS requires a password but none was provided".to_string(),
                ));
            }
            (None, _) => None,
        };

        let identify = Identify {
            rpc_version: RPC_VERSION.min(hello.rpc_version),
            authentication,
            event_subscriptions: 0,
        };
        self.send_frame(OP_IDENTIFY, &identify).map_err(handshake_error)?;

        loop {
            let frame = self.read_frame().map_err(handshake_error)?;
            if frame.op == OP_IDENTIFIED {
                let identified: Identified = decode(frame.d).map_err(handshake_error)?;
                debug!(rpc = identified.negotiated_rpc_version, "identified");
                return Ok(());
            }
        }
    }

    fn send_frame<T: Serialize>(&mut self, op: u8, d: &T) -> Result<(), AppError> {
        let payload = serde_json::to_string(&Frame { op, d })?;
        self.socket
            .send(Message::text(payload))
            .map_err(|e| AppError::SceneProtocol(format!("send failed: {}", e)))
    }

    fn read_frame(&mut self) -> Result<Frame<Value>, AppError> {
        loop {
            let message = self
                .socket
                .read()
                .map_err(|e| AppError::SceneProtocol(format!("read failed: {}", e)))?;
            match message {
                Message::Text(_) => {
                    let text = message
                        .to_text()
                        .map_err(|e| AppError::SceneProtocol(format!("invalid text frame: {}", e)))?;
                    return serde_json::from_str(text).map_err(|e| {
                        AppError::SceneProtocol(format!("malformed message: {}", e))
                    });
                }
                Message::Close(_) => {
                    self.closed = true;
                    return Err(AppError::SceneProtocol("connection closed by OBS".to_string()));
                }
                _ => continue,
            }
        }
    }

    /// Issue one request and wait for its matching response.
    fn request(&mut self, request_type: &str, data: Option<Value>) -> Result<Value, AppError> {
        if self.closed {
            return Err(AppError::SceneProtocol("session already closed".to_string()));
        }
        let request_id = self.next_request_id.to_string();
        self.next_request_id += 1;

        debug!(request_type, %request_id, "sending request");
        let request = Request { request_type, request_id: request_id.clone(), request_data: data };
        self.send_frame(OP_REQUEST, &request)?;

        loop {
            let frame = self.read_frame()?;
            if frame.op != OP_REQUEST_RESPONSE {
                continue;
            }
            let response: RequestResponse = decode(frame.d)?;
            if response.request_id != request_id {
                continue;
            }
            if !response.request_status.result {
                return Err(AppError::SceneRequest {
                    request_type: response.request_type,
                    code: response.request_status.code,
                    comment: response.request_status.comment,
                });
            }
            return Ok(response.response_data.unwrap_or(Value::Null));
        }
    }

    fn call<T: DeserializeOwned>(&mut self, request_type: &str, data: Value) -> Result<T, AppError> {
        let value = self.request(request_type, Some(data))?;
        decode(value)
    }
}

fn open_stream(config: &ObsConfig, address: &str) -> Result<TcpStream, AppError> {
    let candidates = (config.host.as_str(), config.port)
        .to_socket_addrs()
        .map_err(|e| AppError::Connection(format!("could not resolve {}: {}", address, e)))?;

    let mut last_error = None;
    for candidate in candidates {
        match TcpStream::connect_timeout(&candidate, config.timeout()) {
            Ok(stream) => {
                stream.set_read_timeout(Some(config.timeout()))?;
                stream.set_write_timeout(Some(config.timeout()))?;
                stream.set_nodelay(true)?;
                return Ok(stream);
            }
            Err(err) => last_error = Some(err),
        }
    }

    match last_error {
        Some(err) if err.kind() == ErrorKind::ConnectionRefused => {
            Err(AppError::ConnectionRefused { address: address.to_string() })
        }
        Some(err) => Err(AppError::Connection(format!("{}: {}", address, err))),
        None => Err(AppError::Connection(format!("no addresses found for {}", address))),
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, AppError> {
    serde_json::from_value(value)
        .map_err(|e| AppError::SceneProtocol(format!("unexpected payload: {}", e)))
}

fn handshake_error(err: AppError) -> AppError {
    match err {
        AppError::SceneProtocol(details) => {
            AppError::Connection(format!("handshake failed: {}", details))
        }
        other => other,
    }
}

impl SceneClient for ObsWebSocketClient {
    fn get_scene_list(&mut self) -> Result<Vec<String>, AppError> {
        let value = self.request("GetSceneList", None)?;
        let list: SceneList = decode(value)?;
        Ok(list.scenes.into_iter().map(|scene| scene.scene_name).collect())
    }

    fn get_input_settings(&mut self, input_name: &str) -> Result<InputSettings, AppError> {
        let response: InputSettingsResponse =
            self.call("GetInputSettings", json!({ "inputName": input_name }))?;
        Ok(InputSettings { kind: response.input_kind, settings: response.input_settings })
    }

    fn set_input_settings(
        &mut self,
        input_name: &str,
        settings: &Map<String, Value>,
        overlay: bool,
    ) -> Result<(), AppError> {
        self.request(
            "SetInputSettings",
            Some(json!({ "inputName": input_name, "inputSettings": settings, "overlay": overlay })),
        )?;
        Ok(())
    }

    fn get_scene_item_list(&mut self, scene_name: &str) -> Result<Vec<SceneItem>, AppError> {
        let list: SceneItemList = self.call("GetSceneItemList", json!({ "sceneName": scene_name }))?;
        Ok(list.scene_items)
    }

    fn get_scene_item_transform(
        &mut self,
        scene_name: &str,
        item_id: SceneItemId,
    ) -> Result<SceneItemTransform, AppError> {
        let response: SceneItemTransformResponse = self.call(
            "GetSceneItemTransform",
            json!({ "sceneName": scene_name, "sceneItemId": item_id }),
        )?;
        Ok(response.scene_item_transform)
    }

    fn set_scene_item_transform(
        &mut self,
        scene_name: &str,
        item_id: SceneItemId,
        transform: &SceneItemTransform,
    ) -> Result<(), AppError> {
        self.request(
            "SetSceneItemTransform",
            Some(json!({
                "sceneName": scene_name,
                "sceneItemId": item_id,
                "sceneItemTransform": transform,
            })),
        )?;
        Ok(())
    }

    fn create_scene(&mut self, scene_name: &str) -> Result<(), AppError> {
        self.request("CreateScene", Some(json!({ "sceneName": scene_name })))?;
        Ok(())
    }

    fn create_input(
        &mut self,
        scene_name: &str,
        input_name: &str,
        input_kind: &str,
        settings: &Map<String, Value>,
    ) -> Result<(), AppError> {
        self.request(
            "CreateInput",
            Some(json!({
                "sceneName": scene_name,
                "inputName": input_name,
                "inputKind": input_kind,
                "inputSettings": settings,
                "sceneItemEnabled": true,
            })),
        )?;
        Ok(())
    }

    fn duplicate_scene_item(
        &mut self,
        scene_name: &str,
        item_id: SceneItemId,
        destination_scene: &str,
    ) -> Result<SceneItemId, AppError> {
        let response: SceneItemIdResponse = self.call(
            "DuplicateSceneItem",
            json!({
                "sceneName": scene_name,
                "sceneItemId": item_id,
                "destinationSceneName": destination_scene,
            }),
        )?;
        Ok(response.scene_item_id)
    }

    fn get_scene_item_id(
        &mut self,
        scene_name: &str,
        source_name: &str,
    ) -> Result<SceneItemId, AppError> {
        let response: SceneItemIdResponse = self
            .call("GetSceneItemId", json!({ "sceneName": scene_name, "sourceName": source_name }))?;
        Ok(response.scene_item_id)
    }

    fn get_scene_collection_list(&mut self) -> Result<Vec<String>, AppError> {
        let value = self.request("GetSceneCollectionList", None)?;
        let list: SceneCollectionList = decode(value)?;
        Ok(list.scene_collections)
    }

    fn get_current_scene_collection(&mut self) -> Result<String, AppError> {
        let value = self.request("GetSceneCollectionList", None)?;
        let list: SceneCollectionList = decode(value)?;
        Ok(list.current_scene_collection_name)
    }

    fn set_current_scene_collection(&mut self, collection_name: &str) -> Result<(), AppError> {
        self.request(
            "SetCurrentSceneCollection",
            Some(json!({ "sceneCollectionName": collection_name })),
        )?;
        Ok(())
    }

    fn create_scene_collection(&mut self, collection_name: &str) -> Result<(), AppError> {
        self.request(
            "CreateSceneCollection",
            Some(json!({ "sceneCollectionName": collection_name })),
        )?;
        Ok(())
    }

    fn set_current_program_scene(&mut self, scene_name: &str) -> Result<(), AppError> {
        self.request("SetCurrentProgramScene", Some(json!({ "sceneName": scene_name })))?;
        Ok(())
    }

    fn disconnect(&mut self) -> Result<(), AppError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        match self.socket.close(None) {
            Ok(()) => {}
            Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed) => {
                return Ok(());
            }
            Err(e) => return Err(AppError::SceneProtocol(format!("close failed: {}", e))),
        }
        // Drain until the peer acknowledges the close; the read timeout bounds this.
        while self.socket.read().is_ok() {}
        info!(address = %self.address, "disconnected from OBS");
        Ok(())
    }
}

/// Opens [`ObsWebSocketClient`] sessions from connection settings.
#[derive(Debug, Clone)]
pub struct ObsWebSocketFactory {
    config: ObsConfig,
}

impl ObsWebSocketFactory {
    pub fn new(config: ObsConfig) -> Self {
        Self { config }
    }
}

impl SceneClientFactory for ObsWebSocketFactory {
    fn connect(&self) -> Result<Box<dyn SceneClient>, AppError> {
        Ok(Box::new(ObsWebSocketClient::connect(&self.config)?))
    }
}
