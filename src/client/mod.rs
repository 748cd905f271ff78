//! Client-side state
//!
//! The non-presentational layer between the remote API and whatever shows the
//! data (the CLI in this crate).
//!
//! # Lifecycle
//!
//! ```text
//! main ─→ SessionStore::open (recovery, once) ─→ LinkCollection::new ─→ commands
//!                                                                  └→ dropped at exit
//! ```
//!
//! Both state objects are plain owned values; nothing here is a global.

mod clipboard;
mod links;
mod notices;
mod session;

pub use clipboard::{Clipboard, MemoryClipboard, NoClipboard, default_clipboard};
#[cfg(feature = "clipboard")]
pub use clipboard::SystemClipboard;
pub use links::{LinkCollection, filter_links, quick_link_request};
pub use notices::{NOTICE_TTL, NoticeState, Notices};
pub use session::{SessionPhase, SessionSnapshot, SessionStore};
