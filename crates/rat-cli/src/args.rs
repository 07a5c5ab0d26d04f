use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "rat")]
#[command(
    about = "Terminal client for the rat knowledge graph",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Graph server URL (overrides RAT_SERVER and the config file)
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Path to config.toml
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Log verbosity (overrides RAT_LOG)
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Browse the graph interactively (default)
    Open {
        /// Node to open first (defaults to view.start_path)
        path: Option<String>,
    },

    /// Print a node's content and child columns as plain text
    Show {
        path: String,

        /// Layout width in columns (defaults to the terminal width)
        #[arg(long)]
        width: Option<usize>,
    },

    /// Print every node path
    Index,

    /// Search node paths on the server
    Search { query: String },

    /// Create a child node
    New { parent: String, name: String },

    /// Delete a node and everything below it
    Rm { path: String },

    /// Move a node to a new path
    Mv { id: String, new_path: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}
