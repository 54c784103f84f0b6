//! tmux installation check utilities.
//!
//! Provides functions to verify tmux CLI availability and version.
//!
//! @author waabox(waabox[at]gmail[dot]com)

use std::process::Command;

/// Checks whether tmux is installed and available in the system PATH.
///
/// This function attempts to run `tmux -V` to determine if the tmux
/// terminal multiplexer is installed and accessible.
///
/// # Returns
///
/// Returns `true` if tmux is installed and the version command succeeds,
/// `false` otherwise.
///
/// # Example
///
/// ```no_run
/// use auto_tmux::tmux::is_tmux_installed;
///
/// if is_tmux_installed() {
///     println!("tmux is available");
/// } else {
///     println!("Please install tmux first");
/// }
/// ```
pub fn is_tmux_installed() -> bool {
    Command::new("tmux")
        .arg("-V")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Retrieves the installed tmux version string.
///
/// Runs `tmux -V` and returns the trimmed output if successful.
///
/// # Returns
///
/// Returns `Some(version_string)` containing the tmux version if the command
/// succeeds, or `None` if tmux is not installed or the command fails.
pub fn tmux_version() -> Option<String> {
    let output = Command::new("tmux").arg("-V").output().ok()?;

    if !output.status.success() {
        return None;
    }

    let version = String::from_utf8_lossy(&output.stdout).trim().to_string();

    if version.is_empty() {
        None
    } else {
        Some(version)
    }
}
