//! In-memory LinkKeep server shared by the integration tests

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use tokio::sync::Notify;

use linkkeep::api::{
    AuthResponse, Link, LinkKeepApi, LoginRequest, NewLink, QuickLinkRequest, RegisterRequest,
    User,
};
use linkkeep::errors::{LinkKeepError, Result};
use linkkeep::storage::{CredentialStore, MemoryCredentialStore};

pub const TOKEN: &str = "test-token";
pub const EMAIL: &str = "ada@example.com";
pub const PASSWORD: &str = "correct horse";

/// Endpoint selector for injected failures and holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Login,
    List,
    Get,
    Create,
    Quick,
    Update,
    Delete,
    CurrentUser,
}

#[derive(Default)]
struct State {
    links: Vec<Link>,
    next_id: u64,
    fail: Vec<(Endpoint, u16, Option<String>)>,
    held: Vec<(Endpoint, Arc<Notify>)>,
    quick_requests: Vec<QuickLinkRequest>,
}

/// Fake API with per-endpoint call counters and injectable failures.
///
/// All link endpoints require the bearer token to be present in `credentials`.
pub struct FakeApi {
    credentials: Arc<dyn CredentialStore>,
    state: Mutex<State>,
    calls: AtomicUsize,
    current_user_calls: AtomicUsize,
}

impl FakeApi {
    pub fn new(credentials: Arc<dyn CredentialStore>) -> Arc<Self> {
        Arc::new(Self {
            credentials,
            state: Mutex::new(State {
                next_id: 1,
                ..Default::default()
            }),
            calls: AtomicUsize::new(0),
            current_user_calls: AtomicUsize::new(0),
        })
    }

    pub fn user() -> User {
        User {
            id: "u1".to_string(),
            username: "ada".to_string(),
            email: EMAIL.to_string(),
        }
    }

    pub fn fail(&self, endpoint: Endpoint, status: u16, message: Option<&str>) {
        self.state
            .lock()
            .fail
            .push((endpoint, status, message.map(str::to_string)));
    }

    /// Park requests to `endpoint` until the returned handle is notified
    pub fn hold(&self, endpoint: Endpoint) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.state.lock().held.push((endpoint, Arc::clone(&notify)));
        notify
    }

    pub fn heal(&self) {
        self.state.lock().fail.clear();
    }

    /// Insert a record server-side without going through the client
    pub fn seed(&self, name: &str, url: &str, description: Option<&str>) -> Link {
        let mut state = self.state.lock();
        let link = make_link(&mut state, name, url, description.map(str::to_string));
        state.links.push(link.clone());
        link
    }

    pub fn set_clicks(&self, id: &str, clicks: u64) {
        let mut state = self.state.lock();
        if let Some(link) = state.links.iter_mut().find(|l| l.id == id) {
            link.clicks = clicks;
        }
    }

    pub fn server_links(&self) -> Vec<Link> {
        self.state.lock().links.clone()
    }

    pub fn quick_requests(&self) -> Vec<QuickLinkRequest> {
        self.state.lock().quick_requests.clone()
    }

    /// Total number of requests received
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn current_user_calls(&self) -> usize {
        self.current_user_calls.load(Ordering::SeqCst)
    }

    fn enter(&self, endpoint: Option<Endpoint>) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(endpoint) = endpoint {
            let state = self.state.lock();
            if let Some((_, status, message)) = state.fail.iter().find(|(f, _, _)| *f == endpoint)
            {
                return Err(LinkKeepError::request(*status, message.clone()));
            }
        }
        Ok(())
    }

    async fn wait_if_held(&self, endpoint: Endpoint) {
        let notify = {
            let state = self.state.lock();
            state
                .held
                .iter()
                .find(|(e, _)| *e == endpoint)
                .map(|(_, n)| Arc::clone(n))
        };
        if let Some(notify) = notify {
            notify.notified().await;
        }
    }

    fn authorized(&self) -> Result<()> {
        match self.credentials.load()? {
            Some(token) if token == TOKEN => Ok(()),
            _ => Err(LinkKeepError::request(401, Some("Not authorized".to_string()))),
        }
    }
}

fn make_link(state: &mut State, name: &str, url: &str, description: Option<String>) -> Link {
    let id = state.next_id.to_string();
    state.next_id += 1;
    Link {
        short_url: format!("https://lk.test/s{}", id),
        id,
        name: name.to_string(),
        original_url: url.to_string(),
        description,
        clicks: 0,
        created_at: Utc::now(),
    }
}

#[async_trait]
impl LinkKeepApi for FakeApi {
    async fn register(&self, req: &RegisterRequest) -> Result<AuthResponse> {
        self.enter(None)?;
        if req.email == EMAIL {
            return Err(LinkKeepError::request(
                400,
                Some("User already exists".to_string()),
            ));
        }
        Ok(AuthResponse {
            token: TOKEN.to_string(),
            user: User {
                id: "u2".to_string(),
                username: req.username.clone(),
                email: req.email.clone(),
            },
        })
    }

    async fn login(&self, req: &LoginRequest) -> Result<AuthResponse> {
        self.wait_if_held(Endpoint::Login).await;
        self.enter(Some(Endpoint::Login))?;
        if req.email == EMAIL && req.password == PASSWORD {
            Ok(AuthResponse {
                token: TOKEN.to_string(),
                user: Self::user(),
            })
        } else {
            Err(LinkKeepError::request(
                400,
                Some("Invalid credentials".to_string()),
            ))
        }
    }

    async fn current_user(&self) -> Result<User> {
        self.current_user_calls.fetch_add(1, Ordering::SeqCst);
        self.wait_if_held(Endpoint::CurrentUser).await;
        self.enter(Some(Endpoint::CurrentUser))?;
        self.authorized()?;
        Ok(Self::user())
    }

    async fn create_link(&self, link: &NewLink) -> Result<Link> {
        self.enter(Some(Endpoint::Create))?;
        self.authorized()?;
        let mut state = self.state.lock();
        let created = make_link(
            &mut state,
            &link.name,
            &link.original_url,
            link.description.clone(),
        );
        state.links.insert(0, created.clone());
        Ok(created)
    }

    async fn create_quick_link(&self, req: &QuickLinkRequest) -> Result<Link> {
        self.enter(Some(Endpoint::Quick))?;
        self.authorized()?;
        let mut state = self.state.lock();
        state.quick_requests.push(req.clone());
        // 临时链接不进入列表
        Ok(make_link(
            &mut state,
            &req.name,
            &req.original_url,
            Some(req.description.clone()),
        ))
    }

    async fn list_links(&self) -> Result<Vec<Link>> {
        self.enter(Some(Endpoint::List))?;
        self.authorized()?;
        Ok(self.state.lock().links.clone())
    }

    async fn get_link(&self, id: &str) -> Result<Link> {
        self.enter(Some(Endpoint::Get))?;
        self.authorized()?;
        self.state
            .lock()
            .links
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .ok_or_else(|| LinkKeepError::request(404, Some("Link not found".to_string())))
    }

    async fn update_link(&self, id: &str, link: &NewLink) -> Result<Link> {
        self.enter(Some(Endpoint::Update))?;
        self.authorized()?;
        let mut state = self.state.lock();
        let Some(slot) = state.links.iter_mut().find(|l| l.id == id) else {
            return Err(LinkKeepError::request(404, Some("Link not found".to_string())));
        };
        slot.name = link.name.clone();
        slot.original_url = link.original_url.clone();
        slot.description = link.description.clone();
        Ok(slot.clone())
    }

    async fn delete_link(&self, id: &str) -> Result<()> {
        self.enter(Some(Endpoint::Delete))?;
        self.authorized()?;
        let mut state = self.state.lock();
        let before = state.links.len();
        state.links.retain(|l| l.id != id);
        if state.links.len() == before {
            return Err(LinkKeepError::request(404, Some("Link not found".to_string())));
        }
        Ok(())
    }
}

/// Credential store already holding the valid token
pub fn logged_in_store() -> Arc<dyn CredentialStore> {
    Arc::new(MemoryCredentialStore::with_token(TOKEN))
}

pub fn empty_store() -> Arc<dyn CredentialStore> {
    Arc::new(MemoryCredentialStore::new())
}
