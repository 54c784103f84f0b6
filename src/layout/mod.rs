//! Layout parsing and discovery.
//!
//! A layout is an ordered list of session descriptors, written by hand in
//! YAML and resolved either from the user's layout directory or from a
//! direct file path. Descriptors are plain data: they are parsed once,
//! handed to the executor, and never mutated.
//!
//! @author waabox(waabox[at]gmail[dot]com)

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::error::{ConfigError, Result};

/// The full declarative tree of sessions to realize.
///
/// Order is significant only for the default attach-target heuristic,
/// not for execution.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct Layout {
    pub sessions: Vec<SessionSpec>,
}

/// One tmux session to create.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionSpec {
    /// Session name; tmux assigns a default when absent.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub windows: Vec<WindowSpec>,
}

/// One window inside a session.
#[derive(Debug, Clone, Deserialize)]
pub struct WindowSpec {
    #[serde(default)]
    pub name: Option<String>,
    /// Initial working directory for the window (panes inherit it).
    #[serde(default)]
    pub dir: Option<PathBuf>,
    /// Command sent to the window's first pane after creation.
    #[serde(default)]
    pub cmd: Option<String>,
    #[serde(default)]
    pub panes: Vec<PaneSpec>,
}

/// One pane, produced by splitting its parent window.
///
/// `direction` stays a raw string here: an unrecognized value is a
/// per-pane execution error that skips only that pane, not a parse error
/// that rejects the whole layout.
#[derive(Debug, Clone, Deserialize)]
pub struct PaneSpec {
    pub direction: String,
    /// Size of the new pane as a percentage (1-99) of the split.
    #[serde(default)]
    pub percent: Option<u8>,
    #[serde(default)]
    pub cmd: Option<String>,
}

impl SessionSpec {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("(unnamed)")
    }
}

impl WindowSpec {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("(unnamed)")
    }
}

/// Orientation of a pane split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitDirection {
    Horizontal,
    Vertical,
}

/// Raised when a pane's `direction` value is not in the accepted set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("value \"{0}\" for key 'direction' is invalid; must be one of [hori, vert, horizontal, vertical]")]
pub struct InvalidDirection(pub String);

impl SplitDirection {
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Vertical)
    }
}

impl FromStr for SplitDirection {
    type Err = InvalidDirection;

    /// Case-insensitive, with the short synonyms `hori` and `vert`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hori" | "horizontal" => Ok(Self::Horizontal),
            "vert" | "vertical" => Ok(Self::Vertical),
            _ => Err(InvalidDirection(s.to_string())),
        }
    }
}

impl Layout {
    /// Load a layout from a YAML file.
    ///
    /// # Errors
    ///
    /// - `ConfigError::ReadError` if the file cannot be read
    /// - `ConfigError::ParseError` if the YAML content is invalid
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let layout = serde_yaml::from_str(&content).map_err(ConfigError::ParseError)?;
        Ok(layout)
    }

    /// Attach target to use when `-t` was given no explicit value.
    ///
    /// A layout with exactly one named session attaches to that session;
    /// anything else leaves the choice to tmux.
    pub fn default_attach_target(&self) -> Option<&str> {
        match self.sessions.as_slice() {
            [only] => only.name.as_deref(),
            _ => None,
        }
    }
}

/// Returns the directory where named layouts live.
///
/// The directory is `~/.config/auto-tmux/layouts/` on Linux/macOS.
/// Falls back to `./auto-tmux/layouts` if the config directory cannot be
/// determined.
pub fn layouts_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("auto-tmux")
        .join("layouts")
}

/// Resolves a layout identifier to a file path.
///
/// See [`resolve_in`]; this probes the default [`layouts_dir`].
pub fn resolve(name: &str) -> Result<PathBuf> {
    resolve_in(name, &layouts_dir())
}

/// Resolves a layout identifier against a layout directory.
///
/// Probes, in order: `dir/name`, `dir/name.yaml`, `dir/name.yml`, then
/// `name` as a direct filesystem path (absolute, relative, or a file in
/// the current directory).
///
/// # Errors
///
/// `ConfigError::LayoutNotFound` when none of the candidates is a file,
/// naming the path the layout was expected at.
pub fn resolve_in(name: &str, dir: &Path) -> Result<PathBuf> {
    let candidates = [name.to_string(), format!("{name}.yaml"), format!("{name}.yml")];
    for candidate in &candidates {
        let path = dir.join(candidate);
        if path.is_file() {
            return Ok(path);
        }
    }

    let direct = PathBuf::from(name);
    if direct.is_file() {
        return Ok(direct);
    }

    let assumed = if name.contains('/') {
        direct
    } else {
        dir.join(name)
    };
    Err(ConfigError::LayoutNotFound {
        name: name.to_string(),
        path: assumed,
    }
    .into())
}
