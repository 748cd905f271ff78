//! Transient success / error banners
//!
//! A success notice clears itself [`NOTICE_TTL`] after it was shown, unless a
//! newer one replaced it first. Error notices stay until cleared or replaced.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, trace};

pub const NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Default)]
pub struct NoticeState {
    pub success: Option<String>,
    pub error: Option<String>,
    generation: u64,
}

/// Cloneable handle; all clones share the same banners.
#[derive(Clone)]
pub struct Notices {
    tx: Arc<watch::Sender<NoticeState>>,
}

impl Default for Notices {
    fn default() -> Self {
        Self::new()
    }
}

impl Notices {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(NoticeState::default());
        Self { tx: Arc::new(tx) }
    }

    pub fn subscribe(&self) -> watch::Receiver<NoticeState> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> NoticeState {
        self.tx.borrow().clone()
    }

    pub fn success(&self) -> Option<String> {
        self.tx.borrow().success.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.tx.borrow().error.clone()
    }

    /// Show a success message and schedule its removal.
    ///
    /// Without a tokio runtime there is nothing to run the timer on, so the
    /// message stays until replaced or cleared.
    pub fn show_success<T: Into<String>>(&self, message: T) {
        let message = message.into();
        let mut generation = 0;
        self.tx.send_modify(|state| {
            state.generation += 1;
            generation = state.generation;
            state.success = Some(message);
            state.error = None;
        });

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            debug!("No tokio runtime, success notice #{} will not expire", generation);
            return;
        };
        let deadline = tokio::time::Instant::now() + NOTICE_TTL;
        let tx = Arc::clone(&self.tx);
        handle.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let cleared = tx.send_if_modified(|state| {
                if state.generation == generation && state.success.is_some() {
                    state.success = None;
                    true
                } else {
                    false
                }
            });
            if cleared {
                trace!("Success notice #{} expired", generation);
            }
        });
    }

    pub fn show_error<T: Into<String>>(&self, message: T) {
        let message = message.into();
        self.tx.send_modify(|state| {
            state.error = Some(message);
        });
    }

    pub fn clear_error(&self) {
        self.tx.send_if_modified(|state| state.error.take().is_some());
    }

    pub fn clear(&self) {
        self.tx.send_modify(|state| {
            state.success = None;
            state.error = None;
        });
    }
}
