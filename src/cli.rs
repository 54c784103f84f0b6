//! CLI argument parsing for auto-tmux.
//!
//! @author waabox(waabox[at]gmail[dot]com)

use clap::Parser;

/// Automate the creation of tmux sessions from human readable YAML layouts.
#[derive(Parser, Debug)]
#[command(name = "auto-tmux")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// The session layout to load (a layout name or a path to a YAML file)
    pub layout: String,

    /// Turn off progress reporting
    #[arg(short, long)]
    pub quiet: bool,

    /// Session to attach to after the layout is loaded; without a value the
    /// target is picked from the layout, or left to tmux's best guess
    #[arg(short, long, num_args = 0..=1)]
    pub target: Option<Option<String>>,

    /// Don't attach the current terminal after the layout is loaded
    #[arg(short = 'd')]
    pub no_attach: bool,
}
