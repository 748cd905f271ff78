//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for linkkeep using clap's derive macros.

use clap::{Parser, Subcommand};

/// LinkKeep - Keep your links short & smart
#[derive(Parser)]
#[command(name = "linkkeep")]
#[command(version)]
#[command(about = "Command-line client for the LinkKeep URL shortener", long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(long, short = 'c', global = true, default_value = "linkkeep.toml")]
    pub config: String,

    /// Override the API base URL (same as LINKKEEP_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Create an account and log in
    Register {
        #[arg(long)]
        username: String,

        #[arg(long)]
        email: String,

        /// Password (prompted with confirmation if omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Log in with email and password
    Login {
        #[arg(long)]
        email: String,

        /// Password (prompted if omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Forget the stored credential (no request is sent)
    Logout,

    /// Show the logged-in user
    Whoami,

    /// List saved links
    List {
        /// Case-insensitive filter on name, description and URL
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// Show one link with its click count
    Show {
        id: String,
    },

    /// Save a new short link
    Add {
        name: String,

        original_url: String,

        #[arg(long, short = 'd')]
        description: Option<String>,
    },

    /// Edit a saved link; omitted fields keep their current value
    Edit {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        url: Option<String>,

        /// New description, pass "" to remove it
        #[arg(long, short = 'd')]
        description: Option<String>,
    },

    /// Delete a saved link
    Remove {
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Create a temporary short link that is not saved to your list
    Quick {
        url: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: linkkeep.example.toml)
        output_path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
