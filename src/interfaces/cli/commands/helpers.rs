//! Prompting and printing helpers shared by CLI commands

use std::io::{self, BufRead, IsTerminal, Write};

use colored::Colorize;

use crate::api::Link;
use crate::client::Notices;
use crate::interfaces::cli::CliError;

/// Use the flag value when given, otherwise prompt without echo
pub fn password_or_prompt(password: Option<String>, prompt: &str) -> Result<String, CliError> {
    if let Some(password) = password {
        return Ok(password);
    }
    // 非交互环境无法安全读取密码
    if !io::stdin().is_terminal() {
        return Err(CliError::InputError(
            "No password provided. Use --password or run interactively.".to_string(),
        ));
    }
    rpassword::prompt_password(prompt)
        .map_err(|e| CliError::InputError(format!("Failed to read password: {}", e)))
}

/// Ask a yes/no question, defaulting to no
pub fn confirm(question: &str) -> Result<bool, CliError> {
    print!("{} {} ", question.yellow(), "[y/N]".dimmed());
    io::stdout()
        .flush()
        .map_err(|e| CliError::InputError(e.to_string()))?;

    let mut input = String::new();
    io::stdin()
        .lock()
        .read_line(&mut input)
        .map_err(|e| CliError::InputError(format!("Failed to read from stdin: {}", e)))?;
    Ok(is_yes(&input))
}

fn is_yes(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Print whatever banner the last operation left behind
pub fn print_notices(notices: &Notices) {
    let state = notices.snapshot();
    if let Some(error) = state.error {
        println!("{} {}", "✗".bold().red(), error.red());
    }
    if let Some(success) = state.success {
        println!("{} {}", "✓".bold().green(), success);
    }
}

pub fn print_link_line(link: &Link) {
    println!(
        "  {} {} -> {}",
        format!("[{}]", link.id).dimmed(),
        link.short_url.cyan(),
        link.original_url.blue().underline()
    );
    let mut details = vec![link.name.bold().to_string()];
    if let Some(description) = &link.description {
        details.push(description.dimmed().to_string());
    }
    details.push(
        format!("(clicks: {})", link.clicks)
            .dimmed()
            .cyan()
            .to_string(),
    );
    println!("      {}", details.join("  "));
}

pub fn print_link_details(link: &Link) {
    println!("{} {}", "Name:".bold(), link.name);
    println!("{} {}", "Short URL:".bold(), link.short_url.cyan());
    println!(
        "{} {}",
        "Original URL:".bold(),
        link.original_url.blue().underline()
    );
    if let Some(description) = &link.description {
        println!("{} {}", "Description:".bold(), description);
    }
    println!("{} {}", "Clicks:".bold(), link.clicks.to_string().green());
    println!(
        "{} {}",
        "Created:".bold(),
        link.created_at
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d")
    );
}
