//! Command-line interface.

mod commands;

use clap::{Parser, Subcommand};

/// Quiz API server
/// Account login, a shared ticket counter and the small feature endpoints
#[derive(Parser)]
#[command(name = "quiz-api")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API (default)
    #[command(alias = "web")]
    Serve,

    /// Apply database migrations and exit
    Migrate,

    /// Operate the ticket counter directly against the database
    Queue {
        #[command(subcommand)]
        command: QueueCommands,
    },

    /// Create a default config file
    #[command(alias = "--init")]
    Init,
}

#[derive(Subcommand)]
pub enum QueueCommands {
    /// Show the last issued ticket
    Current,
    /// Issue the next ticket
    Issue,
    /// Reset the counter
    Clear,
}

pub use commands::*;
