//! Static configuration
//!
//! Loaded once in `main` and passed down explicitly.

mod structs;

pub use structs::*;
