mod gemini_http;
mod obs_websocket;
mod plan_filesystem;
mod scripture_http;

pub use gemini_http::GeminiImageGenerator;
pub use obs_websocket::{ObsWebSocketClient, ObsWebSocketFactory, authentication_string};
pub use plan_filesystem::FilesystemPlanStore;
pub use scripture_http::HttpScriptureSource;
