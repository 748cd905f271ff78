//! CLI interface module
//!
//! The presentation layer: parses nothing itself (see [`crate::cli`]), wires
//! config, credential store, API client and session together, then runs one
//! command.

pub mod commands;

use std::fmt;
use std::sync::Arc;

use crate::api::{HttpApiClient, LinkKeepApi};
use crate::cli::{Commands, ConfigCommands};
use crate::client::{LinkCollection, SessionStore, default_clipboard};
use crate::config::StaticConfig;
use crate::errors::{ActionFailure, LinkKeepError};
use crate::storage::{CredentialStore, FileCredentialStore};

#[derive(Debug)]
pub enum CliError {
    /// The command needs a logged-in session
    NotLoggedIn,
    InputError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::NotLoggedIn => {
                "Not logged in. Run `linkkeep login` first.".to_string()
            }
            CliError::InputError(msg) => format!("Input error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::NotLoggedIn => format!(
                "{} Run {} first.",
                "Not logged in.".yellow().bold(),
                "linkkeep login".cyan()
            ),
            CliError::InputError(msg) => {
                format!("{} {}", "Input error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<ActionFailure> for CliError {
    fn from(failure: ActionFailure) -> Self {
        if failure.is_validation() {
            CliError::InputError(failure.message)
        } else {
            CliError::CommandError(failure.message)
        }
    }
}

impl From<LinkKeepError> for CliError {
    fn from(err: LinkKeepError) -> Self {
        CliError::CommandError(err.format_simple())
    }
}

/// Everything a command may need, built once per invocation
pub struct CliContext {
    pub config: StaticConfig,
    pub api: Arc<dyn LinkKeepApi>,
    pub session: SessionStore,
}

impl CliContext {
    /// Build the API client and session store without contacting the server
    pub fn new(config: StaticConfig) -> Self {
        let credentials: Arc<dyn CredentialStore> =
            Arc::new(FileCredentialStore::from_config(&config.storage));
        let api: Arc<dyn LinkKeepApi> =
            Arc::new(HttpApiClient::new(&config.api, Arc::clone(&credentials)));
        let session = SessionStore::new(Arc::clone(&api), credentials);
        Self {
            config,
            api,
            session,
        }
    }

    /// Link view-model for an authenticated session
    pub fn links(&self) -> Result<LinkCollection, CliError> {
        if !self.session.is_authenticated() {
            return Err(CliError::NotLoggedIn);
        }
        Ok(LinkCollection::new(Arc::clone(&self.api), default_clipboard()))
    }
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(cmd: Commands, config: StaticConfig) -> Result<(), CliError> {
    // Config generation needs neither network nor credentials
    if let Commands::Config {
        action: ConfigCommands::Generate { output_path, force },
    } = cmd
    {
        return commands::config_generate(output_path, force);
    }

    let ctx = CliContext::new(config);

    // logout is purely local, every other command starts from the restored session
    if let Commands::Logout = cmd {
        return commands::logout(&ctx);
    }
    ctx.session.recover().await;

    match cmd {
        Commands::Register {
            username,
            email,
            password,
        } => commands::register(&ctx, &username, &email, password).await,
        Commands::Login { email, password } => commands::login(&ctx, &email, password).await,
        Commands::Whoami => commands::whoami(&ctx),
        Commands::List { search } => commands::list_links(&ctx, search).await,
        Commands::Show { id } => commands::show_link(&ctx, &id).await,
        Commands::Add {
            name,
            original_url,
            description,
        } => commands::add_link(&ctx, name, original_url, description).await,
        Commands::Edit {
            id,
            name,
            url,
            description,
        } => commands::edit_link(&ctx, &id, name, url, description).await,
        Commands::Remove { id, yes } => commands::remove_link(&ctx, &id, yes).await,
        Commands::Quick { url } => commands::quick_link(&ctx, &url).await,
        Commands::Logout | Commands::Config { .. } => Ok(()),
    }
}
