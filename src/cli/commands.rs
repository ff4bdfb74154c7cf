//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "notesync")]
#[command(about = "Export, clear and restore notes on a notes page", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the notesync home (default: NOTESYNC_HOME or the platform data dir)
    Init {
        /// Directory to initialize
        path: Option<PathBuf>,

        /// Base URL of the notes page
        #[arg(long)]
        base_url: Option<String>,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },

    /// Show which actions are currently available
    Status,

    /// Save the page's notes to the clipboard and the store, then clear them from the page
    Export,

    /// Add saved notes back to the page in their original order
    Restore {
        /// Where to restore from
        #[arg(long, value_enum, default_value_t = RestoreFrom::Store)]
        from: RestoreFrom,
    },

    /// Print the stored snapshot
    Show,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RestoreFrom {
    Store,
    Clipboard,
}
