//! Error types for auto-tmux.
//!
//! @author waabox(waabox[at]gmail[dot]com)

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutoTmuxError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("tmux error: {0}")]
    Tmux(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Layout \"{name}\" not found (expected at {})", .path.display())]
    LayoutNotFound { name: String, path: PathBuf },

    #[error("Failed to read layout file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse layout: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, AutoTmuxError>;
