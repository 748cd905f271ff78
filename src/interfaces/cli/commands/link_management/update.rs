//! Edit link command

use colored::Colorize;

use crate::api::NewLink;
use crate::interfaces::cli::commands::helpers::print_notices;
use crate::interfaces::cli::{CliContext, CliError};
use crate::utils::validate_url;

pub async fn edit_link(
    ctx: &CliContext,
    id: &str,
    name: Option<String>,
    url: Option<String>,
    description: Option<String>,
) -> Result<(), CliError> {
    if name.is_none() && url.is_none() && description.is_none() {
        return Err(CliError::InputError(
            "Nothing to change. Pass --name, --url or --description".to_string(),
        ));
    }
    if let Some(url) = &url {
        validate_url(url).map_err(|e| CliError::InputError(e.to_string()))?;
    }

    let mut links = ctx.links()?;
    links.refresh().await?;
    let current = links
        .find(id)
        .ok_or_else(|| CliError::CommandError(format!("Link does not exist: {}", id)))?;

    let mut form = NewLink::from_link(current);
    if let Some(name) = name {
        form.name = name;
    }
    if let Some(url) = url {
        form.original_url = url;
    }
    if let Some(description) = description {
        form = form.replace_description(description);
    }

    let updated = links.update(id, form).await?;
    print_notices(links.notices());
    println!(
        "  {} {} -> {}",
        updated.name.bold(),
        updated.short_url.cyan(),
        updated.original_url.blue().underline()
    );
    Ok(())
}
