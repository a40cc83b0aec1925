use async_trait::async_trait;
use serde_json::Value;

use crate::api::ApiClient;
use crate::models::Session;

pub const SESSION_ENDPOINT: &str = "/auth/me";

/// Result of asking the API who the current client is
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeOutcome {
    Authenticated(Session),
    /// 401 from the API, or an identity that does not count as a session
    NoSession,
    /// The check itself failed (transport, 5xx, undecodable body)
    Unreachable(String),
}

impl ProbeOutcome {
    pub fn into_session(self) -> Option<Session> {
        match self {
            ProbeOutcome::Authenticated(session) => Some(session),
            ProbeOutcome::NoSession | ProbeOutcome::Unreachable(_) => None,
        }
    }
}

/// Anything that can tell the route guard whether a session exists.
/// Implementations never fail: every problem degrades to `None`.
#[async_trait]
pub trait SessionCheck: Send + Sync {
    async fn probe(&self) -> Option<Session>;
}

pub struct SessionProber {
    api: ApiClient,
}

impl SessionProber {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Single `GET /auth/me`, classified
    pub async fn check(&self) -> ProbeOutcome {
        match self.api.get_json::<Value>(SESSION_ENDPOINT).await {
            Ok(identity) => match Session::from_identity(identity) {
                Some(session) => ProbeOutcome::Authenticated(session),
                None => {
                    tracing::debug!("Session check returned an empty identity");
                    ProbeOutcome::NoSession
                }
            },
            Err(e) if e.is_unauthorized() => {
                tracing::info!("Session invalid or expired");
                ProbeOutcome::NoSession
            }
            Err(e) => {
                tracing::error!("Session check failed: {}", e);
                ProbeOutcome::Unreachable(e.to_string())
            }
        }
    }
}

#[async_trait]
impl SessionCheck for SessionProber {
    async fn probe(&self) -> Option<Session> {
        self.check().await.into_session()
    }
}
