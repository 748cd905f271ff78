//! Remote API layer
//!
//! [`LinkKeepApi`] is the seam between the view-models and the network. The
//! production implementation is [`HttpApiClient`]; tests plug in fakes.
//!
//! # Endpoints
//!
//! ```text
//! POST   /auth/register   {username, email, password} → {token, user}
//! POST   /auth/login      {email, password}           → {token, user}
//! GET    /auth/me                                     → {user}
//! POST   /links           {name, originalUrl, description?} → {link}
//! GET    /links                                       → {links}
//! GET    /links/:id                                   → {link}
//! PUT    /links/:id       {name, originalUrl, description?} → {link}
//! DELETE /links/:id                                   → {}
//! ```

mod http_client;
mod types;

pub use http_client::{HttpApiClient, QuickLinkEndpoint};
pub use types::{
    AuthResponse, Link, LoginRequest, NewLink, QuickLinkRequest, RegisterRequest, User,
};

use async_trait::async_trait;

use crate::errors::Result;

/// One method per remote endpoint. Failures are returned as-is, never retried.
#[async_trait]
pub trait LinkKeepApi: Send + Sync {
    async fn register(&self, req: &RegisterRequest) -> Result<AuthResponse>;

    async fn login(&self, req: &LoginRequest) -> Result<AuthResponse>;

    /// Requires a stored credential
    async fn current_user(&self) -> Result<User>;

    async fn create_link(&self, link: &NewLink) -> Result<Link>;

    /// Goes to the quick-link endpoint chosen when the client was built
    async fn create_quick_link(&self, req: &QuickLinkRequest) -> Result<Link>;

    async fn list_links(&self) -> Result<Vec<Link>>;

    async fn get_link(&self, id: &str) -> Result<Link>;

    async fn update_link(&self, id: &str, link: &NewLink) -> Result<Link>;

    async fn delete_link(&self, id: &str) -> Result<()>;
}
