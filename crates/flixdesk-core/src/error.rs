//! Error types for FlixDesk

use thiserror::Error;

/// Result type alias for FlixDesk operations
pub type ShellResult<T> = Result<T, ShellError>;

/// Main error type for FlixDesk
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("WebView error: {0}")]
    WebView(String),

    #[error("Presence error: {0}")]
    Presence(String),

    #[error("Window error: {0}")]
    Window(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ShellError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new settings error
    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings(msg.into())
    }

    /// Create a new WebView error
    pub fn webview(msg: impl Into<String>) -> Self {
        Self::WebView(msg.into())
    }

    /// Create a new presence error
    pub fn presence(msg: impl Into<String>) -> Self {
        Self::Presence(msg.into())
    }

    /// Create a new window error
    pub fn window(msg: impl Into<String>) -> Self {
        Self::Window(msg.into())
    }
}
