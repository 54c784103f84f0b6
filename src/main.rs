//! auto-tmux: automate the creation of tmux sessions from human readable
//! YAML layouts.
//!
//! @author waabox(waabox[at]gmail[dot]com)

mod cli;
mod error;
mod executor;
mod layout;
mod progress;
mod tmux;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use executor::LayoutExecutor;
use layout::Layout;
use progress::{ConsoleProgress, ProgressReporter, SilentProgress};
use tmux::TmuxCli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing();

    // Resolve and parse before touching tmux; these failures are fatal.
    let path = match layout::resolve(&cli.layout) {
        Ok(path) => path,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };

    tracing::info!("loading layout config from \"{}\"...", path.display());
    let layout = match Layout::load_from(&path) {
        Ok(layout) => layout,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };

    if !tmux::is_tmux_installed() {
        eprintln!("Error: tmux is not installed or not in PATH.");
        std::process::exit(1);
    }
    if let Some(version) = tmux::tmux_version() {
        tracing::debug!("using {version}");
    }

    let progress: Box<dyn ProgressReporter> = if cli.quiet {
        Box::new(SilentProgress)
    } else {
        Box::new(ConsoleProgress::new())
    };
    let executor = LayoutExecutor::new(TmuxCli::new()).with_progress(progress);
    let n_errors = executor.load(&layout).await;

    if n_errors != 0 {
        tracing::error!(
            "encountered {n_errors} errors while setting up the \"{}\" layout",
            path.display()
        );
    }
    tracing::info!("layout config from \"{}\" has been loaded", path.display());

    if !cli.no_attach {
        let target = select_attach_target(&cli, &layout);
        match &target {
            Some(name) => tracing::info!("attaching to session \"{name}\""),
            None => tracing::info!("attaching to tmux's best guess"),
        }
        if let Err(e) = tmux::attach_client(target.as_deref()) {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    }
}

/// Picks the session to attach to after the layout is loaded.
///
/// An explicit `-t NAME` wins. Otherwise a layout with exactly one named
/// session attaches to it, and anything else is left to tmux's own choice.
fn select_attach_target(cli: &Cli, layout: &Layout) -> Option<String> {
    if let Some(Some(name)) = &cli.target {
        return Some(name.clone());
    }

    match layout.default_attach_target() {
        Some(name) => Some(name.to_string()),
        None => {
            if layout.sessions.len() > 1 {
                tracing::info!(
                    "no target given and the layout has more than one session; \
                     letting tmux guess"
                );
            }
            None
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout_from(yaml: &str) -> Layout {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn when_target_flag_has_value_should_win() {
        let cli = Cli::parse_from(["auto-tmux", "dev", "-t", "work"]);
        let layout = layout_from("- name: dev\n");
        assert_eq!(select_attach_target(&cli, &layout), Some("work".to_string()));
    }

    #[test]
    fn when_bare_target_flag_should_fall_back_to_layout() {
        let cli = Cli::parse_from(["auto-tmux", "dev", "-t"]);
        let layout = layout_from("- name: dev\n");
        assert_eq!(select_attach_target(&cli, &layout), Some("dev".to_string()));
    }

    #[test]
    fn when_single_session_is_unnamed_should_defer_to_tmux() {
        let cli = Cli::parse_from(["auto-tmux", "dev"]);
        let layout = layout_from("- windows: []\n");
        assert_eq!(select_attach_target(&cli, &layout), None);
    }

    #[test]
    fn when_layout_has_many_sessions_should_defer_to_tmux() {
        let cli = Cli::parse_from(["auto-tmux", "dev"]);
        let layout = layout_from("- name: dev\n- name: ops\n");
        assert_eq!(select_attach_target(&cli, &layout), None);
    }
}
