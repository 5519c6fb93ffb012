//! Error types for TINYDESK.

use std::io;

/// Errors produced by the TINYDESK kernel and its collaborators.
#[derive(Debug, thiserror::Error)]
pub enum DeskError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("command error: {0}")]
    Command(String),

    #[error("window already open: {0}")]
    DuplicateWindow(String),

    #[error("window manager error: {0}")]
    Wm(String),

    #[error("fetch error: {0}")]
    Fetch(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, DeskError>;
