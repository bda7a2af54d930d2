//! Error types for Chard Runner

use thiserror::Error;
use wasm_bindgen::JsValue;

/// The main error type for game setup, persistence and frame rendering.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("DOM error: {0}")]
    Dom(&'static str),

    #[error("JS exception: {0}")]
    Js(String),
}

/// Result type alias for game operations
pub type Result<T> = std::result::Result<T, GameError>;

impl From<JsValue> for GameError {
    fn from(value: JsValue) -> Self {
        GameError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
