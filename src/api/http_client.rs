//! HTTP implementation of [`LinkKeepApi`] on top of `ureq`
//!
//! ureq is blocking, so every request runs on tokio's blocking pool and the
//! calling task is suspended until the response arrives.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace, warn};
use ureq::{Agent, RequestBuilder};

use super::LinkKeepApi;
use super::types::{
    AuthResponse, ErrorBody, Link, LinkEnvelope, LinkList, LoginRequest, NewLink,
    QuickLinkRequest, RegisterRequest, User, UserEnvelope,
};
use crate::config::ApiConfig;
use crate::errors::{LinkKeepError, Result};
use crate::storage::CredentialStore;

const LINKS_PATH: &str = "/links";

/// Where quick links are sent, fixed when the client is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuickLinkEndpoint {
    /// `POST /links` with `temporary: true` in the body
    CreateWithFlag,
    /// A server-provided endpoint dedicated to quick links
    Dedicated(String),
}

impl QuickLinkEndpoint {
    pub fn from_config(path: Option<&str>) -> Self {
        match path.map(str::trim).filter(|p| !p.is_empty()) {
            Some(p) if p.starts_with('/') => Self::Dedicated(p.to_string()),
            Some(p) => Self::Dedicated(format!("/{}", p)),
            None => Self::CreateWithFlag,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::CreateWithFlag => LINKS_PATH,
            Self::Dedicated(path) => path,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

pub struct HttpApiClient {
    agent: Agent,
    base_url: String,
    credentials: Arc<dyn CredentialStore>,
    quick_link: QuickLinkEndpoint,
}

impl HttpApiClient {
    pub fn new(config: &ApiConfig, credentials: Arc<dyn CredentialStore>) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
            quick_link: QuickLinkEndpoint::from_config(config.quick_link_path.as_deref()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn quick_link_endpoint(&self) -> &QuickLinkEndpoint {
        &self.quick_link
    }

    fn link_path(id: &str) -> String {
        format!("{}/{}", LINKS_PATH, urlencoding::encode(id))
    }

    /// Send a request and return the raw body of a 2xx response
    async fn send_raw(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<String> {
        // 每次请求都重新读取凭证，登录/登出后立即生效
        let token = self.credentials.load()?;
        let agent = self.agent.clone();
        let url = format!("{}{}", self.base_url, path);

        debug!("{} {}", method, path);
        tokio::task::spawn_blocking(move || {
            execute_sync(&agent, method, &url, token.as_deref(), body.as_ref())
        })
        .await
        .map_err(|e| LinkKeepError::network(format!("Request task failed: {}", e)))?
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T> {
        let text = self.send_raw(method, path, body).await?;
        serde_json::from_str(&text).map_err(|e| {
            warn!("Unexpected response body from {} {}: {}", method, path, e);
            LinkKeepError::serialization(format!("{} {}: {}", method, path, e))
        })
    }
}

fn to_body<T: Serialize>(payload: &T) -> Result<Option<serde_json::Value>> {
    Ok(Some(serde_json::to_value(payload)?))
}

fn with_auth<B>(request: RequestBuilder<B>, token: Option<&str>) -> RequestBuilder<B> {
    let request = request.header("Accept", "application/json");
    match token {
        Some(token) => request.header("Authorization", format!("Bearer {}", token)),
        None => request,
    }
}

fn execute_sync(
    agent: &Agent,
    method: Method,
    url: &str,
    token: Option<&str>,
    body: Option<&serde_json::Value>,
) -> Result<String> {
    let payload = body.unwrap_or(&serde_json::Value::Null);
    let response = match method {
        Method::Get => with_auth(agent.get(url), token).call(),
        Method::Delete => with_auth(agent.delete(url), token).call(),
        Method::Post => with_auth(agent.post(url), token).send_json(payload),
        Method::Put => with_auth(agent.put(url), token).send_json(payload),
    };

    let mut response =
        response.map_err(|e| LinkKeepError::network(format!("{} {}: {}", method, url, e)))?;
    let status = response.status().as_u16();
    trace!("{} {} -> {}", method, url, status);

    if !(200..300).contains(&status) {
        let text = response.body_mut().read_to_string().unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|b| b.message);
        return Err(LinkKeepError::request(status, message));
    }

    response
        .body_mut()
        .read_to_string()
        .map_err(|e| LinkKeepError::network(format!("{} {}: {}", method, url, e)))
}

#[async_trait]
impl LinkKeepApi for HttpApiClient {
    async fn register(&self, req: &RegisterRequest) -> Result<AuthResponse> {
        self.send_json(Method::Post, "/auth/register", to_body(req)?)
            .await
    }

    async fn login(&self, req: &LoginRequest) -> Result<AuthResponse> {
        self.send_json(Method::Post, "/auth/login", to_body(req)?)
            .await
    }

    async fn current_user(&self) -> Result<User> {
        let envelope: UserEnvelope = self.send_json(Method::Get, "/auth/me", None).await?;
        Ok(envelope.user)
    }

    async fn create_link(&self, link: &NewLink) -> Result<Link> {
        let envelope: LinkEnvelope = self
            .send_json(Method::Post, LINKS_PATH, to_body(link)?)
            .await?;
        Ok(envelope.link)
    }

    async fn create_quick_link(&self, req: &QuickLinkRequest) -> Result<Link> {
        let envelope: LinkEnvelope = self
            .send_json(Method::Post, self.quick_link.path(), to_body(req)?)
            .await?;
        Ok(envelope.link)
    }

    async fn list_links(&self) -> Result<Vec<Link>> {
        let list: LinkList = self.send_json(Method::Get, LINKS_PATH, None).await?;
        Ok(list.links)
    }

    async fn get_link(&self, id: &str) -> Result<Link> {
        let envelope: LinkEnvelope = self
            .send_json(Method::Get, &Self::link_path(id), None)
            .await?;
        Ok(envelope.link)
    }

    async fn update_link(&self, id: &str, link: &NewLink) -> Result<Link> {
        let envelope: LinkEnvelope = self
            .send_json(Method::Put, &Self::link_path(id), to_body(link)?)
            .await?;
        Ok(envelope.link)
    }

    async fn delete_link(&self, id: &str) -> Result<()> {
        // 响应体为 {}，内容无需解析
        self.send_raw(Method::Delete, &Self::link_path(id), None)
            .await
            .map(|_| ())
    }
}
