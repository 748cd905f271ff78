//! List links command

use colored::Colorize;

use crate::interfaces::cli::commands::helpers::print_link_line;
use crate::interfaces::cli::{CliContext, CliError};

pub async fn list_links(ctx: &CliContext, search: Option<String>) -> Result<(), CliError> {
    let mut links = ctx.links()?;
    links.refresh().await?;
    if let Some(query) = search {
        links.set_query(query);
    }

    let visible = links.visible();
    if visible.is_empty() {
        if links.query().is_empty() {
            println!(
                "{} No saved links yet. Use {} to save one, or {} for a temporary link.",
                "ℹ".bold().blue(),
                "linkkeep add".cyan(),
                "linkkeep quick".cyan()
            );
        } else {
            println!(
                "{} No links found matching \"{}\"",
                "ℹ".bold().blue(),
                links.query()
            );
        }
        return Ok(());
    }

    println!(
        "{}",
        format!("Your Saved Links ({})", visible.len()).bold().green()
    );
    println!();
    for link in &visible {
        print_link_line(link);
    }
    println!();
    if let Some(summary) = links.visible_summary() {
        println!("{} {}", "ℹ".bold().blue(), summary);
    }
    Ok(())
}
