//! Remove link command

use colored::Colorize;

use crate::interfaces::cli::commands::helpers::{confirm, print_notices};
use crate::interfaces::cli::{CliContext, CliError};

pub async fn remove_link(ctx: &CliContext, id: &str, yes: bool) -> Result<(), CliError> {
    let mut links = ctx.links()?;
    links.refresh().await?;

    let Some(link) = links.find(id) else {
        return Err(CliError::CommandError(format!(
            "Link does not exist: {}",
            id
        )));
    };

    if !yes {
        let question = format!("Delete \"{}\" ({})?", link.name, link.short_url);
        if !confirm(&question)? {
            println!("{}", "Aborted.".red());
            return Ok(());
        }
    }

    links.delete(id).await?;
    print_notices(links.notices());
    Ok(())
}
