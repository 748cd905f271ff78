//! Add link command

use colored::Colorize;

use crate::api::NewLink;
use crate::interfaces::cli::commands::helpers::print_notices;
use crate::interfaces::cli::{CliContext, CliError};
use crate::utils::validate_url;

pub async fn add_link(
    ctx: &CliContext,
    name: String,
    original_url: String,
    description: Option<String>,
) -> Result<(), CliError> {
    if name.trim().is_empty() {
        return Err(CliError::InputError("Link name cannot be empty".to_string()));
    }
    validate_url(&original_url).map_err(|e| CliError::InputError(e.to_string()))?;

    let mut new_link = NewLink::new(name, original_url);
    if let Some(description) = description {
        new_link = new_link.with_description(description);
    }

    let mut links = ctx.links()?;
    let created = links.create(new_link).await?;

    print_notices(links.notices());
    println!(
        "  {} -> {}",
        created.short_url.cyan(),
        created.original_url.blue().underline()
    );
    Ok(())
}
