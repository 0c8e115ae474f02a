//! Command-line interface for ttt_matchmaker.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tic-tac-toe matchmaking server
#[derive(Parser, Debug)]
#[command(name = "ttt_matchmaker")]
#[command(about = "Pairs anonymous players into tic-tac-toe games", long_about = None)]
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
        /// Path to a TOML config file (optional)
        #[arg(short, long, default_value = "ttt_matchmaker.toml")]
        config: PathBuf,

        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides config and $PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory of static pages (overrides config)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}
