//! Show link command

use crate::interfaces::cli::commands::helpers::print_link_details;
use crate::interfaces::cli::{CliContext, CliError};

pub async fn show_link(ctx: &CliContext, id: &str) -> Result<(), CliError> {
    let mut links = ctx.links()?;
    let link = links.fetch(id).await?;
    print_link_details(&link);
    Ok(())
}
