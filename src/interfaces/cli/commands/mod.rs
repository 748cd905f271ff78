//! CLI command implementations
//!
//! This module re-exports all CLI command functions.

mod auth;
mod config_gen;
mod helpers;
mod link_management;

pub use auth::*;
pub use config_gen::*;
pub use link_management::*;
