//! Link collection view-model
//!
//! Holds the user's saved links in server order and mirrors confirmed
//! server responses only. Quick links never enter the collection.

use std::sync::Arc;

use chrono::{Local, NaiveTime};
use tracing::{debug, info, warn};

use super::clipboard::Clipboard;
use super::notices::Notices;
use crate::api::{Link, LinkKeepApi, NewLink, QuickLinkRequest};
use crate::errors::{ActionFailure, LinkKeepError, Outcome};
use crate::utils::{display_host, validate_url};

const LOAD_FAILED: &str = "Failed to load links";
const FETCH_FAILED: &str = "Failed to load link";
const SAVE_FAILED: &str = "Failed to save link";
const QUICK_FAILED: &str = "Failed to create quick link";
const DELETE_FAILED: &str = "Failed to delete link";
const COPY_FAILED: &str = "Failed to copy to clipboard";

const QUICK_DESCRIPTION: &str = "Temporary quick link";

pub struct LinkCollection {
    api: Arc<dyn LinkKeepApi>,
    clipboard: Arc<dyn Clipboard>,
    links: Vec<Link>,
    query: String,
    quick_short_url: Option<String>,
    loading: bool,
    notices: Notices,
}

impl LinkCollection {
    pub fn new(api: Arc<dyn LinkKeepApi>, clipboard: Arc<dyn Clipboard>) -> Self {
        Self {
            api,
            clipboard,
            links: Vec::new(),
            query: String::new(),
            quick_short_url: None,
            loading: true,
            notices: Notices::new(),
        }
    }

    /// Replace the whole collection with the server's list.
    ///
    /// On failure the previous collection is kept.
    pub async fn refresh(&mut self) -> Outcome<usize> {
        let result = self.api.list_links().await;
        self.loading = false;
        match result {
            Ok(links) => {
                debug!("Loaded {} links", links.len());
                self.links = links;
                Ok(self.links.len())
            }
            Err(e) => {
                warn!("Error fetching links: {}", e);
                self.notices.show_error(LOAD_FAILED);
                Err(ActionFailure::fixed(e, LOAD_FAILED))
            }
        }
    }

    /// Fetch one record (for fresh click counts) and replace it in place.
    ///
    /// Records not already in the collection are returned but not inserted.
    pub async fn fetch(&mut self, id: &str) -> Outcome<Link> {
        match self.api.get_link(id).await {
            Ok(link) => {
                if let Some(slot) = self.links.iter_mut().find(|l| l.id == link.id) {
                    *slot = link.clone();
                }
                Ok(link)
            }
            Err(e) => Err(self.fail(e, FETCH_FAILED)),
        }
    }

    pub async fn create(&mut self, link: NewLink) -> Outcome<Link> {
        self.notices.clear();
        match self.api.create_link(&link).await {
            Ok(created) => {
                info!("Created link {} ({})", created.id, created.short_url);
                self.links.insert(0, created.clone());
                self.notices.show_success("Link created successfully!");
                Ok(created)
            }
            Err(e) => Err(self.fail(e, SAVE_FAILED)),
        }
    }

    /// Create a throw-away short link and copy it to the clipboard.
    ///
    /// The URL is validated before anything is sent. The saved collection
    /// is never modified, whatever the server answers.
    pub async fn create_quick(&mut self, url: &str) -> Outcome<String> {
        self.notices.clear();
        let request = match quick_link_request(url, Local::now().time()) {
            Ok(request) => request,
            Err(failure) => {
                self.notices.show_error(failure.message.clone());
                return Err(failure);
            }
        };

        let link = match self.api.create_quick_link(&request).await {
            Ok(link) => link,
            Err(e) => return Err(self.fail(e, QUICK_FAILED)),
        };

        let short_url = link.short_url;
        info!("Created quick link {}", short_url);
        self.quick_short_url = Some(short_url.clone());
        match self.clipboard.copy(&short_url) {
            Ok(()) => self
                .notices
                .show_success("Quick link created and copied to clipboard!"),
            Err(e) => {
                warn!("Could not copy quick link: {}", e);
                self.notices.show_success("Quick link created!");
            }
        }
        Ok(short_url)
    }

    /// Replace the record with `id` in place, keeping collection order
    pub async fn update(&mut self, id: &str, link: NewLink) -> Outcome<Link> {
        self.notices.clear();
        self.position(id)?;
        match self.api.update_link(id, &link).await {
            Ok(updated) => {
                info!("Updated link {}", id);
                // 请求期间集合可能已被刷新，重新定位
                match self.links.iter_mut().find(|l| l.id == id) {
                    Some(slot) => *slot = updated.clone(),
                    None => debug!("Link {} vanished while updating, not re-inserted", id),
                }
                self.notices.show_success("Link updated successfully!");
                Ok(updated)
            }
            Err(e) => Err(self.fail(e, SAVE_FAILED)),
        }
    }

    /// Delete the record with `id`. Asking the user first is the caller's
    /// job. Server error detail is dropped for this operation.
    pub async fn delete(&mut self, id: &str) -> Outcome<()> {
        self.notices.clear();
        self.position(id)?;
        match self.api.delete_link(id).await {
            Ok(()) => {
                info!("Deleted link {}", id);
                self.links.retain(|l| l.id != id);
                self.notices.show_success("Link deleted successfully!");
                Ok(())
            }
            Err(e) => {
                warn!("Failed to delete link {}: {}", id, e);
                self.notices.show_error(DELETE_FAILED);
                Err(ActionFailure::fixed(e, DELETE_FAILED))
            }
        }
    }

    fn position(&self, id: &str) -> Outcome<usize> {
        self.links
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| not_found(id))
    }

    fn fail(&self, error: LinkKeepError, fallback: &str) -> ActionFailure {
        warn!("{}: {}", fallback, error);
        let failure = ActionFailure::from_error(error, fallback);
        self.notices.show_error(failure.message.clone());
        failure
    }

    /// Outside a tokio runtime the success notice is shown but never expires.
    pub fn copy_short_url(&self, id: &str) -> Outcome<()> {
        let link = self.find(id).ok_or_else(|| not_found(id))?;
        self.copy(&link.short_url, "Short URL copied to clipboard!")
    }

    /// Copy the last quick link again; no-op when there is none
    pub fn copy_quick_link(&self) -> Outcome<()> {
        match &self.quick_short_url {
            Some(url) => self.copy(url, "Quick link copied to clipboard!"),
            None => Ok(()),
        }
    }

    fn copy(&self, text: &str, success: &str) -> Outcome<()> {
        match self.clipboard.copy(text) {
            Ok(()) => {
                self.notices.show_success(success);
                Ok(())
            }
            Err(e) => {
                warn!("Clipboard write failed: {}", e);
                self.notices.show_error(COPY_FAILED);
                Err(ActionFailure::fixed(e, COPY_FAILED))
            }
        }
    }

    pub fn clear_quick(&mut self) {
        self.quick_short_url = None;
        self.notices.clear_error();
    }

    pub fn quick_short_url(&self) -> Option<&str> {
        self.quick_short_url.as_deref()
    }

    pub fn set_query<T: Into<String>>(&mut self, query: T) {
        self.query = query.into();
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Links matching `query`, without touching the stored query
    pub fn search(&self, query: &str) -> Vec<&Link> {
        filter_links(&self.links, query)
    }

    /// Links matching the current query, derived on every call
    pub fn visible(&self) -> Vec<&Link> {
        filter_links(&self.links, &self.query)
    }

    /// "Showing N of M links" while a search is active
    pub fn visible_summary(&self) -> Option<String> {
        if self.query.trim().is_empty() {
            return None;
        }
        Some(format!(
            "Showing {} of {} links",
            self.visible().len(),
            self.links.len()
        ))
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn find(&self, id: &str) -> Option<&Link> {
        self.links.iter().find(|l| l.id == id)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// True until the first refresh finished, successfully or not
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }
}

fn not_found(id: &str) -> ActionFailure {
    ActionFailure {
        error: LinkKeepError::not_found_local(id),
        message: format!("Link {} is no longer available", id),
    }
}

/// Case-insensitive substring match on name, description and original URL.
/// A blank query matches everything.
pub fn filter_links<'a>(links: &'a [Link], query: &str) -> Vec<&'a Link> {
    if query.trim().is_empty() {
        return links.iter().collect();
    }
    let needle = query.to_lowercase();
    links
        .iter()
        .filter(|link| {
            link.name.to_lowercase().contains(&needle)
                || link
                    .description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&needle))
                || link.original_url.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Build the quick-link payload: `Quick-<host>-<HH:MM>`, host without `www.`
pub fn quick_link_request(url: &str, at: NaiveTime) -> Outcome<QuickLinkRequest> {
    if url.trim().is_empty() {
        return Err(ActionFailure::validation("Please enter a URL"));
    }
    let parsed = validate_url(url).map_err(|e| {
        debug!("Rejected quick link URL {:?}: {}", url, e);
        ActionFailure::validation("Please enter a valid URL")
    })?;

    Ok(QuickLinkRequest {
        name: format!("Quick-{}-{}", display_host(&parsed), at.format("%H:%M")),
        original_url: url.trim().to_string(),
        description: QUICK_DESCRIPTION.to_string(),
        temporary: true,
    })
}
