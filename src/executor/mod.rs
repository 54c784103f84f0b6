//! The layout execution engine.
//!
//! Walks the declarative tree top-down and realizes it against the tmux
//! server: sessions fan out to windows, windows to panes, each level
//! launched concurrently and joined as a group. Failures are counted and
//! summed upward rather than short-circuited, so a bad entry never stops
//! its siblings; the run always finishes and reports one aggregate count.
//!
//! @author waabox(waabox[at]gmail[dot]com)

use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, error, warn};

use crate::error::Result;
use crate::layout::{Layout, PaneSpec, SessionSpec, SplitDirection, WindowSpec};
use crate::progress::{ProgressReporter, SilentProgress};
use crate::tmux::{SessionHandle, TmuxClient, WindowHandle};

/// Wait before sending keystrokes to a freshly created window or pane.
///
/// The shell inside is not guaranteed ready for input and tmux exposes no
/// readiness signal to wait on, so a conservative pause stands in for one.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(750);

/// Drives a parsed [`Layout`] against a live tmux server.
///
/// The client is shared by every concurrently running branch; descriptors
/// are immutable and private to their subtree.
pub struct LayoutExecutor<C> {
    client: C,
    settle_delay: Duration,
    progress: Box<dyn ProgressReporter>,
}

impl<C: TmuxClient> LayoutExecutor<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            settle_delay: DEFAULT_SETTLE_DELAY,
            progress: Box::new(SilentProgress),
        }
    }

    /// Overrides the settle delay. Zero makes tests deterministic and fast.
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Installs a progress reporter. Observational only.
    pub fn with_progress(mut self, progress: Box<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    /// Realizes every session in the layout, concurrently.
    ///
    /// Returns the total number of errors encountered. The run always
    /// continues to completion regardless of how many there were; a
    /// nonzero aggregate is logged, not raised.
    pub async fn load(&self, layout: &Layout) -> usize {
        let total = layout.sessions.len();
        let counts = join_all(layout.sessions.iter().map(|session| async move {
            let errors = self.setup_session(session).await;
            self.progress.session_done(session.display_name(), total);
            errors
        }))
        .await;

        let n_errors: usize = counts.into_iter().sum();
        if n_errors != 0 {
            warn!("encountered {n_errors} errors while setting up the layout");
        }

        n_errors
    }

    /// Realizes one session and its windows.
    ///
    /// A name collision with a live session aborts the whole entry before
    /// anything is created: reconfiguring existing sessions is
    /// unsupported. Sibling sessions are unaffected.
    async fn setup_session(&self, session: &SessionSpec) -> usize {
        if let Some(name) = session.name.as_deref() {
            match self.client.session_exists(name).await {
                Ok(true) => {
                    error!(
                        "a session named \"{name}\" already exists; \
                         reconfiguring existing sessions is not supported"
                    );
                    return 1;
                }
                Ok(false) => {}
                Err(e) => {
                    error!("could not check for an existing session named \"{name}\": {e}");
                    return 1;
                }
            }
        }

        let created = match self.client.new_session(session.name.as_deref()).await {
            Ok(created) => created,
            Err(e) => {
                error!(
                    "could not create session \"{}\": {e}",
                    session.display_name()
                );
                return 1;
            }
        };

        let counts = join_all(
            session
                .windows
                .iter()
                .map(|window| self.setup_window(window, &created.session)),
        )
        .await;
        let mut n_errors: usize = counts.into_iter().sum();

        // The placeholder window tmux seeded the session with. Killed by
        // id, unconditionally, so the session ends up holding exactly the
        // declared windows even when some of them failed.
        if let Err(e) = self.client.kill_window(&created.default_window).await {
            error!(
                "could not remove the default window of session \"{}\": {e}",
                session.display_name()
            );
            n_errors += 1;
        }

        if n_errors != 0 {
            error!(
                "encountered {n_errors} errors while setting up session \"{}\"",
                session.display_name()
            );
        }

        n_errors
    }

    /// Realizes one window and fans out to its panes.
    async fn setup_window(&self, window: &WindowSpec, session: &SessionHandle) -> usize {
        let handle = match self
            .client
            .new_window(session, window.name.as_deref(), window.dir.as_deref())
            .await
        {
            Ok(handle) => handle,
            Err(e) => {
                error!(
                    "could not create window \"{}\": {e}",
                    window.display_name()
                );
                return 1;
            }
        };

        let mut n_errors = 0;

        if let Some(cmd) = window.cmd.as_deref() {
            // Sent before any splitting, so the window target still
            // resolves to its initial pane.
            if let Err(e) = self.run_cmd(handle.target(), cmd).await {
                error!(
                    "could not run \"{cmd}\" in window \"{}\": {e}",
                    window.display_name()
                );
                n_errors += 1;
            }
        }

        n_errors += join_all(
            window
                .panes
                .iter()
                .map(|pane| self.setup_pane(pane, &handle, window.display_name())),
        )
        .await
        .into_iter()
        .sum::<usize>();

        n_errors
    }

    /// Realizes one pane by splitting its parent window.
    ///
    /// An unrecognized `direction` skips this pane without contacting
    /// tmux; sibling panes are unaffected.
    async fn setup_pane(&self, pane: &PaneSpec, window: &WindowHandle, window_label: &str) -> usize {
        let direction = match pane.direction.parse::<SplitDirection>() {
            Ok(direction) => direction,
            Err(e) => {
                error!(
                    "{e}; could not set up the pane with config {pane:?} \
                     in window \"{window_label}\""
                );
                return 1;
            }
        };

        let handle = match self
            .client
            .split_window(window, direction.is_vertical(), pane.percent)
            .await
        {
            Ok(handle) => handle,
            Err(e) => {
                error!("could not split window \"{window_label}\": {e}");
                return 1;
            }
        };

        if let Some(cmd) = pane.cmd.as_deref() {
            if let Err(e) = self.run_cmd(handle.target(), cmd).await {
                error!("could not run \"{cmd}\" in a pane of window \"{window_label}\": {e}");
                return 1;
            }
        }

        0
    }

    /// Sends a command to a window or pane after the settle delay.
    async fn run_cmd(&self, target: &str, cmd: &str) -> Result<()> {
        tokio::time::sleep(self.settle_delay).await;
        debug!("sending \"{cmd}\" to {target}");
        self.client.send_keys(target, cmd).await
    }
}
