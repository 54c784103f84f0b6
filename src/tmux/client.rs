//! tmux client: session, window and pane creation over the tmux CLI.
//!
//! Every creation command is issued with `-P -F '#{..._id}'` so the caller
//! gets back the stable tmux id (`$n`, `@n`, `%n`) instead of a name or an
//! index. Names can collide and indices shift under concurrent creation;
//! ids do neither.
//!
//! @author waabox(waabox[at]gmail[dot]com)

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::{AutoTmuxError, Result};

/// Handle to a live tmux session (stable `$n` id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHandle(String);

/// Handle to a live tmux window (stable `@n` id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowHandle(String);

/// Handle to a live tmux pane (stable `%n` id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneHandle(String);

impl SessionHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Target string accepted by tmux `-t`.
    pub fn target(&self) -> &str {
        &self.0
    }
}

impl WindowHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Target string accepted by tmux `-t`.
    pub fn target(&self) -> &str {
        &self.0
    }
}

impl PaneHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Target string accepted by tmux `-t`.
    pub fn target(&self) -> &str {
        &self.0
    }
}

/// Result of creating a session.
///
/// tmux seeds every new session with one placeholder window; its handle is
/// captured here at creation time so the cleanup step can kill it by id,
/// independent of whatever order the declared windows were created in.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub session: SessionHandle,
    pub default_window: WindowHandle,
}

/// Interface to a running tmux server.
///
/// The single client value is shared by every concurrently running part of
/// the executor; tmux serializes its own command stream, so no client-side
/// locking is done here.
#[async_trait]
pub trait TmuxClient: Send + Sync {
    /// Whether a session with exactly this name is live on the server.
    async fn session_exists(&self, name: &str) -> Result<bool>;

    /// Creates a detached session, optionally named.
    async fn new_session(&self, name: Option<&str>) -> Result<NewSession>;

    /// Creates a detached window in `session` with an optional name and
    /// starting directory. Never steals terminal focus.
    async fn new_window(
        &self,
        session: &SessionHandle,
        name: Option<&str>,
        dir: Option<&Path>,
    ) -> Result<WindowHandle>;

    /// Splits `window`, vertically or horizontally, giving the new pane
    /// `percent` of the space (server default when absent).
    async fn split_window(
        &self,
        window: &WindowHandle,
        vertical: bool,
        percent: Option<u8>,
    ) -> Result<PaneHandle>;

    /// Sends `text` to `target` followed by a carriage return, so the
    /// command executes on arrival. A window target resolves to its active
    /// pane.
    async fn send_keys(&self, target: &str, text: &str) -> Result<()>;

    /// Destroys a window.
    async fn kill_window(&self, window: &WindowHandle) -> Result<()>;
}

/// Production client that shells out to the `tmux` binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct TmuxCli;

impl TmuxCli {
    pub fn new() -> Self {
        Self
    }

    /// Runs a tmux command, expecting success, and returns trimmed stdout.
    async fn run(mut cmd: Command, what: &str) -> Result<String> {
        let output = cmd
            .output()
            .await
            .map_err(|e| AutoTmuxError::Tmux(format!("Failed to execute tmux: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AutoTmuxError::Tmux(format!(
                "{what} failed with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[async_trait]
impl TmuxClient for TmuxCli {
    async fn session_exists(&self, name: &str) -> Result<bool> {
        // "=" forces exact-name matching; a bare -t value does prefix
        // matching and could collide on "dev" vs "dev-2".
        let status = Command::new("tmux")
            .args(["has-session", "-t", &format!("={name}")])
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| AutoTmuxError::Tmux(format!("Failed to execute tmux: {e}")))?;

        Ok(status.success())
    }

    async fn new_session(&self, name: Option<&str>) -> Result<NewSession> {
        let mut cmd = Command::new("tmux");
        cmd.args(["new-session", "-d", "-P", "-F", "#{session_id} #{window_id}"]);
        if let Some(name) = name {
            cmd.args(["-s", name]);
        }

        let printed = Self::run(cmd, "new-session").await?;
        let (session_id, window_id) = printed.split_once(' ').ok_or_else(|| {
            AutoTmuxError::Tmux(format!("unexpected new-session output: \"{printed}\""))
        })?;

        Ok(NewSession {
            session: SessionHandle::new(session_id),
            default_window: WindowHandle::new(window_id),
        })
    }

    async fn new_window(
        &self,
        session: &SessionHandle,
        name: Option<&str>,
        dir: Option<&Path>,
    ) -> Result<WindowHandle> {
        let mut cmd = Command::new("tmux");
        cmd.args(["new-window", "-d", "-P", "-F", "#{window_id}"]);
        cmd.args(["-t", session.target()]);
        if let Some(name) = name {
            cmd.args(["-n", name]);
        }
        if let Some(dir) = dir {
            cmd.arg("-c").arg(dir);
        }

        let window_id = Self::run(cmd, "new-window").await?;
        Ok(WindowHandle::new(window_id))
    }

    async fn split_window(
        &self,
        window: &WindowHandle,
        vertical: bool,
        percent: Option<u8>,
    ) -> Result<PaneHandle> {
        let mut cmd = Command::new("tmux");
        cmd.args(["split-window", "-d", "-P", "-F", "#{pane_id}"]);
        cmd.args(["-t", window.target()]);
        cmd.arg(if vertical { "-v" } else { "-h" });
        if let Some(percent) = percent {
            cmd.args(["-p", &percent.to_string()]);
        }

        let pane_id = Self::run(cmd, "split-window").await?;
        Ok(PaneHandle::new(pane_id))
    }

    async fn send_keys(&self, target: &str, text: &str) -> Result<()> {
        let mut cmd = Command::new("tmux");
        cmd.args(["send-keys", "-t", target, text, "Enter"]);

        Self::run(cmd, "send-keys").await?;
        Ok(())
    }

    async fn kill_window(&self, window: &WindowHandle) -> Result<()> {
        let mut cmd = Command::new("tmux");
        cmd.args(["kill-window", "-t", window.target()]);

        Self::run(cmd, "kill-window").await?;
        Ok(())
    }
}
