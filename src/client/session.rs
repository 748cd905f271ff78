//! Session store
//!
//! Owns the current user and keeps it consistent with the stored credential.
//!
//! ```text
//! Unknown ──recover()──→ Recovering ──/auth/me ok──→ Authenticated
//!    │                        └──────/auth/me err──→ Anonymous
//!    └── no credential ─────────────────────────────→ Anonymous
//! ```
//!
//! `login`/`register` move any phase to `Authenticated`; `logout` moves any
//! phase to `Anonymous`.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api::{AuthResponse, LinkKeepApi, LoginRequest, RegisterRequest, User};
use crate::errors::{ActionFailure, LinkKeepError, Outcome, Result};
use crate::storage::CredentialStore;

const LOGIN_FAILED: &str = "Login failed";
const REGISTRATION_FAILED: &str = "Registration failed";
const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Recovery not attempted yet
    Unknown,
    /// Stored credential found, current-user fetch in flight
    Recovering,
    Authenticated,
    Anonymous,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub user: Option<User>,
    /// A login or register call is in flight
    pub submitting: bool,
}

impl SessionSnapshot {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, SessionPhase::Unknown | SessionPhase::Recovering)
    }
}

pub struct SessionStore {
    api: Arc<dyn LinkKeepApi>,
    credentials: Arc<dyn CredentialStore>,
    state: watch::Sender<SessionSnapshot>,
    recovery_started: AtomicBool,
}

impl SessionStore {
    /// Build a store in the `Unknown` phase without touching the network
    pub fn new(api: Arc<dyn LinkKeepApi>, credentials: Arc<dyn CredentialStore>) -> Self {
        let (state, _rx) = watch::channel(SessionSnapshot {
            phase: SessionPhase::Unknown,
            user: None,
            submitting: false,
        });
        Self {
            api,
            credentials,
            state,
            recovery_started: AtomicBool::new(false),
        }
    }

    /// Build a store and run startup recovery
    pub async fn open(api: Arc<dyn LinkKeepApi>, credentials: Arc<dyn CredentialStore>) -> Self {
        let store = Self::new(api, credentials);
        store.recover().await;
        store
    }

    /// Restore the session from the stored credential. Only the first call
    /// does anything.
    ///
    /// A rejected or unreadable credential is removed and the session becomes
    /// anonymous; nothing is retried and no error surfaces.
    pub async fn recover(&self) {
        if self.recovery_started.swap(true, Ordering::SeqCst) {
            debug!("Session recovery already attempted, skipping");
            return;
        }

        let token = match self.credentials.load() {
            Ok(token) => token,
            Err(e) => {
                warn!("Failed to read stored credential: {}", e);
                self.invalidate(&LinkKeepError::auth(e.to_string()));
                return;
            }
        };

        if token.is_none() {
            debug!("No stored credential, starting anonymous");
            self.state.send_modify(|s| {
                s.phase = SessionPhase::Anonymous;
                s.user = None;
            });
            return;
        }

        self.state.send_modify(|s| s.phase = SessionPhase::Recovering);
        match self.api.current_user().await {
            Ok(user) => {
                info!("Session restored for {}", user.username);
                self.state.send_modify(|s| {
                    s.phase = SessionPhase::Authenticated;
                    s.user = Some(user);
                });
            }
            Err(e) => {
                self.invalidate(&LinkKeepError::auth(format!(
                    "Stored credential rejected: {}",
                    e
                )));
            }
        }
    }

    fn invalidate(&self, reason: &LinkKeepError) {
        warn!("Session recovery failed, logging out: {}", reason);
        self.logout();
    }

    pub async fn login(&self, email: &str, password: &str) -> Outcome<User> {
        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.set_submitting(true);
        let result = self.api.login(&req).await;
        self.set_submitting(false);
        self.accept(result, LOGIN_FAILED)
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> Outcome<User> {
        let req = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        self.set_submitting(true);
        let result = self.api.register(&req).await;
        self.set_submitting(false);
        self.accept(result, REGISTRATION_FAILED)
    }

    /// Registration form flow: the confirmation must match before anything is sent
    pub async fn register_confirmed(
        &self,
        username: &str,
        email: &str,
        password: &str,
        confirm: &str,
    ) -> Outcome<User> {
        if password != confirm {
            return Err(ActionFailure::validation(PASSWORDS_DO_NOT_MATCH));
        }
        self.register(username, email, password).await
    }

    /// Persist the credential first; state only changes once that succeeded,
    /// so a failed write never leaves a half-authenticated session.
    fn accept(&self, result: Result<AuthResponse>, fallback: &str) -> Outcome<User> {
        let AuthResponse { token, user } =
            result.map_err(|e| {
                debug!("Authentication rejected: {}", e);
                ActionFailure::from_error(e, fallback)
            })?;

        self.credentials
            .save(&token)
            .map_err(|e| ActionFailure::from_error(e, fallback))?;

        info!("Authenticated as {}", user.username);
        self.state.send_modify(|s| {
            s.phase = SessionPhase::Authenticated;
            s.user = Some(user.clone());
        });
        Ok(user)
    }

    /// Purely local: no request is sent
    pub fn logout(&self) {
        if let Err(e) = self.credentials.clear() {
            warn!("Failed to remove stored credential: {}", e);
        }
        self.state.send_modify(|s| {
            s.phase = SessionPhase::Anonymous;
            s.user = None;
        });
    }

    fn set_submitting(&self, submitting: bool) {
        self.state.send_modify(|s| s.submitting = submitting);
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.borrow().phase
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    pub fn is_submitting(&self) -> bool {
        self.state.borrow().submitting
    }
}
