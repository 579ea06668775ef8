use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("main window is not available")]
    NoWindow,

    #[error("webview '{0}' not found")]
    MissingView(String),

    #[error("webview error: {0}")]
    Webview(String),

    #[error("webview '{webview_label}' could not be created: {reason}")]
    ViewCreation { webview_label: String, reason: String },

    #[error("invalid url '{0}'")]
    InvalidUrl(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("browser state lock poisoned")]
    StatePoisoned,
}

impl From<tauri::Error> for BrowserError {
    fn from(e: tauri::Error) -> Self {
        Self::Webview(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BrowserError>;
