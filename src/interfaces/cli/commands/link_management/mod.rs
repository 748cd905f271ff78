//! Link management commands

mod add;
mod list;
mod quick;
mod remove;
mod show;
mod update;

pub use add::add_link;
pub use list::list_links;
pub use quick::quick_link;
pub use remove::remove_link;
pub use show::show_link;
pub use update::edit_link;
