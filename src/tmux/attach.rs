//! Attaching the caller's terminal to a session.
//!
//! @author waabox(waabox[at]gmail[dot]com)

use std::process::Command;

use crate::error::{AutoTmuxError, Result};

/// Attaches the current terminal to a tmux session.
///
/// With no target (or an empty one) tmux picks the session itself, which
/// is the behavior wanted when the layout declared several sessions.
///
/// Unlike the creation commands this must take over the terminal, so the
/// child is spawned and waited on rather than captured.
///
/// # Errors
///
/// Returns `AutoTmuxError::Tmux` if tmux cannot be spawned or exits with a
/// failure status.
pub fn attach_client(target: Option<&str>) -> Result<()> {
    let mut cmd = Command::new("tmux");
    cmd.arg("attach");
    if let Some(name) = target.filter(|name| !name.is_empty()) {
        cmd.args(["-t", name]);
    }

    let status = cmd
        .spawn()
        .map_err(|e| AutoTmuxError::Tmux(format!("Failed to execute tmux: {e}")))?
        .wait()
        .map_err(|e| AutoTmuxError::Tmux(format!("Failed to wait for tmux: {e}")))?;

    if !status.success() {
        return Err(AutoTmuxError::Tmux(format!(
            "attach exited with status: {status}"
        )));
    }

    Ok(())
}
