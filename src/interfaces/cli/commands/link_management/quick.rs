//! Quick link command

use colored::Colorize;

use crate::interfaces::cli::commands::helpers::print_notices;
use crate::interfaces::cli::{CliContext, CliError};

pub async fn quick_link(ctx: &CliContext, url: &str) -> Result<(), CliError> {
    let mut links = ctx.links()?;
    let short_url = links.create_quick(url).await?;

    print_notices(links.notices());
    println!("  {}", short_url.cyan().bold());
    println!(
        "  {}",
        "This link is temporary and won't appear in your saved links list.".dimmed()
    );
    Ok(())
}
