use std::io;

use thiserror::Error;

/// Library-wide error type for versecast operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Configuration values failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reference string does not match the accepted grammar.
    #[error("Could not parse reference '{input}': {reason}")]
    InvalidReference { input: String, reason: String },

    /// Reference is well formed but names a book the catalog does not know.
    #[error("Unknown book: '{0}'")]
    UnknownBook(String),

    /// Scripture source request or payload failure.
    #[error("Scripture API error: {0}")]
    Api(String),

    /// Image prompt or image generation request failed.
    #[error("Image API error: {0}")]
    ImageApi(String),

    /// Scene system refused the connection (not yet listening).
    #[error("Connection refused by OBS at {address}")]
    ConnectionRefused { address: String },

    /// Scene system unreachable or the handshake failed.
    #[error("Could not connect to OBS: {0}")]
    Connection(String),

    /// Scene system rejected a request.
    #[error("OBS request '{request_type}' failed (code {code}){}", comment_suffix(.comment))]
    SceneRequest { request_type: String, code: i64, comment: Option<String> },

    /// Unexpected frame or payload on the scene control channel.
    #[error("OBS protocol error: {0}")]
    SceneProtocol(String),

    /// Building or refreshing a single scene failed.
    #[error("Scene operation failed for '{scene}': {source}")]
    SceneOperation {
        scene: String,
        #[source]
        source: Box<AppError>,
    },

    /// Template scene has no item for the designated per-scene source.
    #[error("Template scene '{scene}' has no source named '{source_name}'")]
    TemplateSourceMissing { scene: String, source_name: String },

    /// Configured scene collection is not present in OBS.
    #[error("Scene collection '{0}' not found")]
    SceneCollectionNotFound(String),

    /// Some verses could not be replicated.
    #[error("{failed} of {total} verse scene(s) failed")]
    ReplicationIncomplete { failed: usize, total: usize },

    /// Study plan already tracks this reference.
    #[error("Reference '{0}' already exists in plan")]
    PlanItemExists(String),

    /// Study plan does not track this reference.
    #[error("Reference '{0}' not found in plan")]
    PlanItemNotFound(String),
}

fn comment_suffix(comment: &Option<String>) -> String {
    comment.as_deref().map(|c| format!(": {c}")).unwrap_or_default()
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub(crate) fn invalid_reference(input: &str, reason: impl Into<String>) -> Self {
        AppError::InvalidReference { input: input.to_string(), reason: reason.into() }
    }

    /// Whether a connect attempt that failed this way may be retried.
    pub fn is_connection_refused(&self) -> bool {
        matches!(self, AppError::ConnectionRefused { .. })
    }
}
