//! Clipboard access

use std::sync::Arc;

use parking_lot::Mutex;

use crate::errors::{LinkKeepError, Result};

pub trait Clipboard: Send + Sync {
    fn copy(&self, text: &str) -> Result<()>;
}

/// The desktop clipboard via arboard. A new handle is opened per copy.
#[cfg(feature = "clipboard")]
#[derive(Debug, Default)]
pub struct SystemClipboard;

#[cfg(feature = "clipboard")]
impl Clipboard for SystemClipboard {
    fn copy(&self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| LinkKeepError::storage(format!("Clipboard unavailable: {}", e)))?;
        clipboard
            .set_text(text)
            .map_err(|e| LinkKeepError::storage(format!("Clipboard write failed: {}", e)))
    }
}

/// Keeps the last copied text in memory
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn copy(&self, text: &str) -> Result<()> {
        *self.contents.lock() = Some(text.to_string());
        Ok(())
    }
}

/// For headless environments: every copy fails and the caller logs it
#[derive(Debug, Default)]
pub struct NoClipboard;

impl Clipboard for NoClipboard {
    fn copy(&self, _text: &str) -> Result<()> {
        Err(LinkKeepError::storage("No clipboard available"))
    }
}

/// System clipboard when compiled in, otherwise [`NoClipboard`]
pub fn default_clipboard() -> Arc<dyn Clipboard> {
    #[cfg(feature = "clipboard")]
    {
        Arc::new(SystemClipboard)
    }
    #[cfg(not(feature = "clipboard"))]
    {
        Arc::new(NoClipboard)
    }
}
