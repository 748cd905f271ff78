//! Account commands: register, login, logout, whoami

use colored::Colorize;

use super::helpers::password_or_prompt;
use crate::interfaces::cli::{CliContext, CliError};

pub async fn register(
    ctx: &CliContext,
    username: &str,
    email: &str,
    password: Option<String>,
) -> Result<(), CliError> {
    let user = match password {
        Some(password) => ctx.session.register(username, email, &password).await?,
        None => {
            let password = password_or_prompt(None, "Password: ")?;
            let confirm = password_or_prompt(None, "Confirm password: ")?;
            ctx.session
                .register_confirmed(username, email, &password, &confirm)
                .await?
        }
    };

    println!(
        "{} Registered and logged in as {} <{}>",
        "✓".bold().green(),
        user.username.cyan(),
        user.email
    );
    Ok(())
}

pub async fn login(ctx: &CliContext, email: &str, password: Option<String>) -> Result<(), CliError> {
    let password = password_or_prompt(password, "Password: ")?;
    let user = ctx.session.login(email, &password).await?;
    println!(
        "{} Welcome, {}!",
        "✓".bold().green(),
        user.username.cyan()
    );
    Ok(())
}

pub fn logout(ctx: &CliContext) -> Result<(), CliError> {
    ctx.session.logout();
    println!("{} Logged out", "✓".bold().green());
    Ok(())
}

pub fn whoami(ctx: &CliContext) -> Result<(), CliError> {
    let user = ctx.session.user().ok_or(CliError::NotLoggedIn)?;
    println!("{} ({})", user.username.cyan().bold(), user.email);
    println!("{} {}", "API:".dimmed(), ctx.config.api.base_url.dimmed());
    Ok(())
}
