//! Command-line interface for strictly_memory.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Memory - type-safe concentration game
#[derive(Parser, Debug)]
#[command(name = "strictly_memory")]
#[command(about = "Memory matching game server and automated player", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// Host to bind to (overrides config and environment)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides config and environment)
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to a TOML server config
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Play a board file to completion with the recall player
    Play {
        /// Path to the board file
        #[arg(short, long)]
        board: PathBuf,

        /// Server URL. If not provided, plays in-process.
        #[arg(long)]
        server_url: Option<String>,

        /// How long a mismatched pair stays visible, in milliseconds
        /// (overrides config, default 700)
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Path to a TOML config supplying `mismatch_delay_ms`
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Parse a board file and print it face down
    Show {
        /// Path to the board file
        #[arg(short, long)]
        board: PathBuf,
    },
}
