use std::sync::Arc;

use crate::auth::SessionCheck;
use crate::models::Session;
use crate::routes::Route;

/// Decision taken before a protected view is built
#[derive(Debug, Clone, PartialEq)]
pub enum GuardOutcome {
    Proceed(Session),
    RedirectTo(Route),
}

/// Gate in front of every protected route. Probes on each evaluation,
/// nothing is remembered between navigations.
#[derive(Clone)]
pub struct RouteGuard {
    sessions: Arc<dyn SessionCheck>,
    login: Route,
}

impl RouteGuard {
    pub fn new(sessions: Arc<dyn SessionCheck>) -> Self {
        Self {
            sessions,
            login: Route::Login,
        }
    }

    pub async fn evaluate(&self) -> GuardOutcome {
        tracing::debug!("Checking whether the user is authenticated");
        match self.sessions.probe().await {
            Some(session) => GuardOutcome::Proceed(session),
            None => GuardOutcome::RedirectTo(self.login),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedSession {
        session: Option<Session>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SessionCheck for FixedSession {
        async fn probe(&self) -> Option<Session> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.session.clone()
        }
    }

    fn fixed(session: Option<Session>) -> Arc<FixedSession> {
        Arc::new(FixedSession {
            session,
            calls: AtomicUsize::new(0),
        })
    }

    #[tokio::test]
    async fn test_no_session_redirects_to_login() {
        let guard = RouteGuard::new(fixed(None));
        assert_eq!(guard.evaluate().await, GuardOutcome::RedirectTo(Route::Login));
    }

    #[tokio::test]
    async fn test_session_proceeds() {
        let session = Session::from_identity(json!({"user_id": 3})).unwrap();
        let guard = RouteGuard::new(fixed(Some(session.clone())));
        assert_eq!(guard.evaluate().await, GuardOutcome::Proceed(session));
    }

    #[tokio::test]
    async fn test_probes_on_every_evaluation() {
        let check = fixed(None);
        let guard = RouteGuard::new(check.clone());
        guard.evaluate().await;
        guard.evaluate().await;
        guard.evaluate().await;
        assert_eq!(check.calls.load(Ordering::SeqCst), 3);
    }
}
