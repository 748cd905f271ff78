//! LinkKeep - Keep your links short & smart
//!
//! Client library for a LinkKeep URL-shortener account: session handling,
//! the saved-link collection with search and quick links, and the HTTP
//! transport that talks to the remote API.
//!
//! # Features
//! - **cli**: Command-line interface (default)
//! - **clipboard**: System clipboard support via arboard (default)
//!
//! # Architecture
//! - `api`: Wire types, the `LinkKeepApi` trait and its HTTP client
//! - `client`: Session store, link collection, notices, clipboard
//! - `storage`: Credential persistence
//! - `config`: Configuration loading (TOML + environment)
//! - `system`: Logging setup
//! - `interfaces`: User interfaces (CLI)

pub mod api;
#[cfg(feature = "cli")]
pub mod cli;
pub mod client;
pub mod config;
pub mod errors;
#[cfg(feature = "cli")]
pub mod interfaces;
pub mod storage;
pub mod system;
pub mod utils;
